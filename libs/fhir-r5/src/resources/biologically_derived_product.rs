//! FHIR BiologicallyDerivedProduct resource

use crate::datatypes::{
    Attachment, CodeableConcept, Coding, Extension, Identifier, Meta, Narrative, Period, Quantity,
    Range, Ratio, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// This resource reflects an instance of a biologically derived product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "BiologicallyDerivedProduct")]
pub struct BiologicallyDerivedProduct {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// organ | tissue | fluid | cells | biologicalAgent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub biological_source_event: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_facility: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,

    /// available | unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_status: Option<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<BiologicallyDerivedProductCollection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_temp_requirements: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<BiologicallyDerivedProductProperty>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "BiologicallyDerivedProduct".to_string()
}

/// How this product was collected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BiologicallyDerivedProductCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector: Option<Reference>,

    /// The patient or entity providing the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub collected: Option<BiologicallyDerivedProductCollected>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum BiologicallyDerivedProductCollected {
    #[serde(rename = "collectedDateTime")]
    DateTime(String),
    #[serde(rename = "collectedPeriod")]
    Period(Period),
}

/// A property that is specific to this BiologicallyDerivedProduct instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BiologicallyDerivedProductProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub type_: Option<CodeableConcept>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<BiologicallyDerivedProductPropertyValue>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum BiologicallyDerivedProductPropertyValue {
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueInteger")]
    Integer(i32),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valuePeriod")]
    Period(Period),
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueRatio")]
    Ratio(Ratio),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueAttachment")]
    Attachment(Attachment),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_value_required() {
        let product: BiologicallyDerivedProduct = serde_json::from_value(json!({
            "resourceType": "BiologicallyDerivedProduct",
            "property": [
                { "type": { "text": "volume" }, "valueQuantity": { "value": 250, "unit": "mL" } },
                { "type": { "text": "blood group" } }
            ]
        }))
        .unwrap();

        let err = product.validate().unwrap_err();
        assert_eq!(err.location(), "property[1].value[x]");
    }

    #[test]
    fn test_collected_choice_serializes_under_key() {
        let product: BiologicallyDerivedProduct = serde_json::from_value(json!({
            "resourceType": "BiologicallyDerivedProduct",
            "collection": { "collectedDateTime": "2024-03-01T10:00:00Z" }
        }))
        .unwrap();

        assert!(product.validate().is_ok());
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["collection"]["collectedDateTime"], "2024-03-01T10:00:00Z");
    }
}
