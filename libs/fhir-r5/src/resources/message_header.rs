//! FHIR MessageHeader resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactPoint, Extension, Identifier, Meta, Narrative, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A resource that describes a message that is exchanged between systems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "MessageHeader")]
pub struct MessageHeader {
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

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub event: Option<MessageHeaderEvent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Vec<MessageHeaderDestination>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    /// Message source application
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub source: Option<MessageHeaderSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<MessageHeaderResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "MessageHeader".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum MessageHeaderEvent {
    #[serde(rename = "eventCoding")]
    Coding(Coding),
    #[serde(rename = "eventCanonical")]
    Canonical(String),
}

/// Actual or potential target system or endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum MessageHeaderEndpoint {
    #[serde(rename = "endpointUrl")]
    Url(String),
    #[serde(rename = "endpointReference")]
    Reference(Reference),
}

/// Message destination application(s)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeaderDestination {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub endpoint: Option<MessageHeaderEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Reference>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeaderSource {
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub endpoint: Option<MessageHeaderEndpoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactPoint>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

/// If this is a reply to prior message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeaderResponse {
    /// Bundle.identifier of original message
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub identifier: Option<Identifier>,

    /// ok | transient-error | fatal-error
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Reference>,
}

impl MessageHeader {
    pub fn is_response(&self) -> bool {
        self.response.is_some()
    }
}
