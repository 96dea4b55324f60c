//! FHIR SpecimenDefinition resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Duration, Extension, Identifier, Meta, Narrative,
    Period, PublicationStatus, Quantity, Range, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Kind of specimen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "SpecimenDefinition")]
pub struct SpecimenDefinition {
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
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub version_algorithm: Option<SpecimenDefinitionVersionAlgorithm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from_canonical: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from_uri: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub subject: Option<SpecimenDefinitionSubject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Vec<UsageContext>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_collected: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_preparation: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_aspect: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_tested: Option<Vec<SpecimenDefinitionTypeTested>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "SpecimenDefinition".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenDefinitionVersionAlgorithm {
    #[serde(rename = "versionAlgorithmString")]
    String(String),
    #[serde(rename = "versionAlgorithmCoding")]
    Coding(Coding),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenDefinitionSubject {
    #[serde(rename = "subjectCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "subjectReference")]
    Reference(Reference),
}

/// Specimen in container intended for testing by lab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenDefinitionTypeTested {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_derived: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// preferred | alternate
    #[serde(default)]
    #[fhir(required)]
    pub preference: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<SpecimenDefinitionContainer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_time: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_use: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_criterion: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling: Option<Vec<SpecimenDefinitionHandling>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub testing_destination: Option<Vec<CodeableConcept>>,
}

/// The specimen's container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenDefinitionContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<CodeableConcept>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Quantity>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub minimum_volume: Option<SpecimenDefinitionMinimumVolume>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additive: Option<Vec<SpecimenDefinitionAdditive>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenDefinitionMinimumVolume {
    #[serde(rename = "minimumVolumeQuantity")]
    Quantity(Quantity),
    #[serde(rename = "minimumVolumeString")]
    String(String),
}

/// Additive associated with container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenDefinitionAdditive {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub additive: Option<SpecimenDefinitionAdditiveValue>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum SpecimenDefinitionAdditiveValue {
    #[serde(rename = "additiveCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "additiveReference")]
    Reference(Reference),
}

/// Specimen handling before testing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenDefinitionHandling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_qualifier: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}
