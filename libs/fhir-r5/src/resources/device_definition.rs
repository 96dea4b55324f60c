//! FHIR DeviceDefinition resource

use crate::datatypes::{
    Annotation, Attachment, CodeableConcept, ContactPoint, Extension, Identifier, Meta, Narrative,
    Period, Quantity, Range, Reference, RelatedArtifact,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An instance of a medical-related component of a medical device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "DeviceDefinition")]
pub struct DeviceDefinition {
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
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub udi_device_identifier: Option<Vec<DeviceDefinitionUdiDeviceIdentifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_identifier: Option<Vec<DeviceDefinitionRegulatoryIdentifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<Vec<DeviceDefinitionDeviceName>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Vec<DeviceDefinitionClassification>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conforms_to: Option<Vec<DeviceDefinitionConformsTo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_part: Option<Vec<DeviceDefinitionHasPart>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Vec<DeviceDefinitionVersion>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<DeviceDefinitionProperty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactPoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Vec<DeviceDefinitionMaterial>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<Vec<CodeableConcept>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "DeviceDefinition".to_string()
}

/// Unique Device Identifier (UDI) Barcode string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionUdiDeviceIdentifier {
    #[serde(default)]
    #[fhir(required)]
    pub device_identifier: String,

    #[serde(default)]
    #[fhir(required)]
    pub issuer: String,

    #[serde(default)]
    #[fhir(required)]
    pub jurisdiction: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_distribution: Option<Vec<DeviceDefinitionMarketDistribution>>,
}

/// Indicates whether and when the device is available on the market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionMarketDistribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub market_period: Option<Period>,

    #[serde(default)]
    #[fhir(required)]
    pub sub_jurisdiction: String,
}

/// Regulatory identifier(s) associated with this device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionRegulatoryIdentifier {
    /// basic | master | license
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default)]
    #[fhir(required)]
    pub device_identifier: String,

    #[serde(default)]
    #[fhir(required)]
    pub issuer: String,

    #[serde(default)]
    #[fhir(required)]
    pub jurisdiction: String,
}

/// The name or names of the device as given by the manufacturer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionDeviceName {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    /// registered-name | user-friendly-name | patient-reported-name
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionClassification {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Vec<RelatedArtifact>>,
}

/// Identifies the standards, specifications, or formal guidances for the capabilities supported by the device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionConformsTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub specification: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<RelatedArtifact>>,
}

/// A device, part of the current one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionHasPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
}

/// The version of the device or software
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionVersion {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Identifier>,

    #[serde(default)]
    #[fhir(required)]
    pub value: String,
}

/// Inherent, essentially fixed, characteristics of this kind of device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub type_: Option<CodeableConcept>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub value: Option<DeviceDefinitionPropertyValue>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum DeviceDefinitionPropertyValue {
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueInteger")]
    Integer(i32),
    #[serde(rename = "valueRange")]
    Range(Range),
    #[serde(rename = "valueAttachment")]
    Attachment(Attachment),
}

/// A substance used to create the material(s) of which the device is made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDefinitionMaterial {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub substance: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergenic_indicator: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_distribution_period_required() {
        let definition: DeviceDefinition = serde_json::from_value(json!({
            "resourceType": "DeviceDefinition",
            "udiDeviceIdentifier": [{
                "deviceIdentifier": "00844588003288",
                "issuer": "http://hl7.org/fhir/NamingSystem/gs1-di",
                "jurisdiction": "http://hl7.org/fhir/NamingSystem/fda-udi",
                "marketDistribution": [{ "subJurisdiction": "http://example.org/eu" }]
            }]
        }))
        .unwrap();

        assert_eq!(
            definition.validate().unwrap_err().location(),
            "udiDeviceIdentifier[0].marketDistribution[0].marketPeriod"
        );
    }

    #[test]
    fn test_collects_all_nested_violations() {
        let definition: DeviceDefinition = serde_json::from_value(json!({
            "resourceType": "DeviceDefinition",
            "deviceName": [{ "name": "Pump" }],
            "property": [{ "type": { "text": "flow" } }],
            "material": [{}]
        }))
        .unwrap();

        let locations: Vec<String> = definition.violations().iter().map(|e| e.location()).collect();
        assert_eq!(
            locations,
            ["deviceName[0].type", "property[0].value[x]", "material[0].substance"]
        );
    }
}
