//! FHIR ExampleScenario resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative,
    PublicationStatus, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Example of workflow instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ExampleScenario")]
pub struct ExampleScenario {
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
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

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
    pub jurisdiction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Vec<ExampleScenarioActor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<Vec<ExampleScenarioInstance>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<Vec<ExampleScenarioProcess>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ExampleScenario".to_string()
}

/// Individual involved in exchange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioActor {
    #[serde(default)]
    #[fhir(required)]
    pub key: String,

    /// person | system
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Data used in the scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioInstance {
    #[serde(default)]
    #[fhir(required)]
    pub key: String,

    /// Data structure for example
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub structure_type: Option<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_version: Option<String>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub structure_profile: Option<ExampleScenarioStructureProfile>,

    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Vec<ExampleScenarioInstanceVersion>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained_instance: Option<Vec<ExampleScenarioContainedInstance>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ExampleScenarioStructureProfile {
    #[serde(rename = "structureProfileCanonical")]
    Canonical(String),
    #[serde(rename = "structureProfileUri")]
    Uri(String),
}

/// Snapshot of instance that changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioInstanceVersion {
    #[serde(default)]
    #[fhir(required)]
    pub key: String,

    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Reference>,
}

/// Resources contained in the instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioContainedInstance {
    /// Key of contained instance
    #[serde(default)]
    #[fhir(required)]
    pub instance_reference: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_reference: Option<String>,
}

/// Major process within scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioProcess {
    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_conditions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_conditions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Vec<ExampleScenarioStep>>,
}

/// Event within of the process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Step is nested process
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<Box<ExampleScenarioProcess>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<ExampleScenarioOperation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<Vec<ExampleScenarioAlternative>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<bool>,
}

/// Step is simple action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioOperation {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Coding>,

    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ExampleScenarioContainedInstance>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ExampleScenarioContainedInstance>,
}

/// Alternate non-typical step action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExampleScenarioAlternative {
    #[serde(default)]
    #[fhir(required)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Vec<ExampleScenarioStep>>,
}

impl ExampleScenario {
    pub fn actor(&self, key: &str) -> Option<&ExampleScenarioActor> {
        self.actor.as_ref()?.iter().find(|a| a.key == key)
    }
}
