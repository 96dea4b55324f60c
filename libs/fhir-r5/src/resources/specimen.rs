//! FHIR Specimen resource

use crate::datatypes::{
    Annotation, CodeableConcept, CodeableReference, Duration, Extension, Identifier, Meta,
    Narrative, Period, Quantity, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Sample for analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Specimen")]
pub struct Specimen {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession_identifier: Option<Identifier>,

    /// available | unavailable | unsatisfactory | entered-in-error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Vec<Reference>>,

    /// grouped | pooled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<SpecimenFeature>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<SpecimenCollection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<Vec<SpecimenProcessing>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Vec<SpecimenContainer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,
}

fn default_resource_type() -> String {
    "Specimen".to_string()
}

/// The physical feature of a specimen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenFeature {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub type_: Option<CodeableConcept>,

    #[serde(default)]
    #[fhir(required)]
    pub description: String,
}

/// Collection details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub collected: Option<SpecimenCollected>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<CodeableReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableReference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub fasting_status: Option<SpecimenFastingStatus>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenCollected {
    #[serde(rename = "collectedDateTime")]
    DateTime(String),
    #[serde(rename = "collectedPeriod")]
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenFastingStatus {
    #[serde(rename = "fastingStatusCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "fastingStatusDuration")]
    Duration(Duration),
}

/// Processing and processing step details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenProcessing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additive: Option<Vec<Reference>>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub time: Option<SpecimenProcessingTime>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenProcessingTime {
    #[serde(rename = "timeDateTime")]
    DateTime(String),
    #[serde(rename = "timePeriod")]
    Period(Period),
}

/// Direct container of specimen (tube/slide, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub device: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen_quantity: Option<Quantity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_description_required() {
        let specimen: Specimen = serde_json::from_value(json!({
            "resourceType": "Specimen",
            "feature": [{ "type": { "text": "lesion" } }]
        }))
        .unwrap();

        assert_eq!(specimen.validate().unwrap_err().location(), "feature[0].description");
    }

    #[test]
    fn test_collection_fasting_status_conflict() {
        let specimen: Specimen = serde_json::from_value(json!({
            "resourceType": "Specimen",
            "collection": {
                "collectedDateTime": "2011-05-30T06:15:00Z",
                "fastingStatusCodeableConcept": { "text": "fasting" },
                "fastingStatusDuration": { "value": 12, "unit": "h" }
            }
        }))
        .unwrap();

        assert!(matches!(
            specimen.collection.as_ref().and_then(|c| c.collected.as_ref()),
            Some(SpecimenCollected::DateTime(_))
        ));
        assert_eq!(
            specimen.validate().unwrap_err().location(),
            "collection.fastingStatus[x]"
        );
    }

    #[test]
    fn test_container_device_required() {
        let specimen: Specimen = serde_json::from_value(json!({
            "resourceType": "Specimen",
            "processing": [{ "timeDateTime": "2015-08-18T07:03:00Z" }],
            "container": [{ "specimenQuantity": { "value": 3, "unit": "mL" } }]
        }))
        .unwrap();

        assert_eq!(specimen.validate().unwrap_err().location(), "container[0].device");
    }
}
