//! FHIR ResearchSubject resource

use crate::datatypes::{CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Reference};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Participant or object which is the recipient of investigative activities in a study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ResearchSubject")]
pub struct ResearchSubject {
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

    /// draft | active | retired | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Vec<ResearchSubjectProgress>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Study subject is part of
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub study: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_comparison_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_comparison_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<Vec<Reference>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ResearchSubject".to_string()
}

/// Subject status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSubjectProgress {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_state: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
