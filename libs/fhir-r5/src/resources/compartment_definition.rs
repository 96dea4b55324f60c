//! FHIR CompartmentDefinition resource

use crate::datatypes::{ContactDetail, Extension, Meta, Narrative, PublicationStatus, UsageContext};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Compartment Definition for a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "CompartmentDefinition")]
pub struct CompartmentDefinition {
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

    #[serde(default)]
    #[fhir(required)]
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

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
    pub purpose: Option<String>,

    /// Patient | Encounter | RelatedPerson | Practitioner | Device | EpisodeOfCare
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    /// Whether the search syntax is supported
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub search: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<CompartmentDefinitionResource>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CompartmentDefinition".to_string()
}

/// How a resource is related to the compartment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompartmentDefinitionResource {
    /// Name of resource type
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    /// Search Parameter Name, or chained parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_param: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_param: Option<String>,
}
