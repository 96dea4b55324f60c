//! FHIR ActorDefinition resource

use crate::datatypes::{
    CodeableConcept, ContactDetail, Extension, Identifier, Meta, Narrative, PublicationStatus,
    UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An application, a device, a person or an organization that participates in exchanges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ActorDefinition")]
pub struct ActorDefinition {
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

    /// person | system
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Vec<String>>,

    /// CapabilityStatement for the actor (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Vec<String>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ActorDefinition".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{Resource, ValidationError};
    use serde_json::json;

    #[test]
    fn test_status_and_type_required() {
        let actor: ActorDefinition =
            serde_json::from_value(json!({ "resourceType": "ActorDefinition" })).unwrap();

        assert_eq!(
            actor.violations(),
            vec![
                ValidationError::RequiredField { field: "status" },
                ValidationError::RequiredField { field: "type" },
            ]
        );
        assert_eq!(
            actor.validate(),
            Err(ValidationError::RequiredField { field: "status" })
        );
    }

    #[test]
    fn test_empty_type_is_missing() {
        let actor = ActorDefinition {
            status: Some(PublicationStatus::Draft),
            ..ActorDefinition::empty()
        };
        assert_eq!(
            actor.validate(),
            Err(ValidationError::RequiredField { field: "type" })
        );

        let actor = ActorDefinition {
            type_: "system".to_string(),
            ..actor
        };
        assert!(actor.validate().is_ok());
    }

    #[test]
    fn test_type_is_serialized_as_keyword() {
        let actor: ActorDefinition = serde_json::from_value(json!({
            "resourceType": "ActorDefinition",
            "status": "active",
            "type": "person",
            "capabilities": "http://example.org/CapabilityStatement/ehr"
        }))
        .unwrap();

        assert_eq!(actor.type_, "person");
        assert!(actor.validate().is_ok());
        assert_eq!(serde_json::to_value(&actor).unwrap()["type"], "person");
    }
}
