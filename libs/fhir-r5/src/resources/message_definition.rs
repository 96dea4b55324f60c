//! FHIR MessageDefinition resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative,
    PublicationStatus, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A resource that defines a type of message that can be exchanged between systems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "MessageDefinition")]
pub struct MessageDefinition {
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
    pub replaces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(default)]
    #[fhir(required)]
    pub date: String,

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
    pub base: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<String>>,

    /// Event code or link to the EventDefinition
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(required, choice)]
    pub event: Option<MessageDefinitionEvent>,

    /// consequence | currency | notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Vec<MessageDefinitionFocus>>,

    /// always | on-error | never | on-success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_required: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_response: Option<Vec<MessageDefinitionAllowedResponse>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "MessageDefinition".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum MessageDefinitionEvent {
    #[serde(rename = "eventCoding")]
    Coding(Coding),
    #[serde(rename = "eventUri")]
    Uri(String),
}

/// Resource(s) that are the subject of the event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageDefinitionFocus {
    /// Type of resource
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Minimum number of focuses of this type
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub min: Option<u32>,

    /// Maximum number of focuses of this type, or `*`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// Responses to this message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageDefinitionAllowedResponse {
    #[serde(default)]
    #[fhir(required)]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    fn definition(extra: Value) -> MessageDefinition {
        let mut base = json!({
            "resourceType": "MessageDefinition",
            "status": "draft",
            "date": "2016-11-09",
            "eventCoding": { "system": "http://example.org/fhir/message-events", "code": "admin-notify" }
        });
        if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
            base.extend(extra);
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_event_required() {
        let mut md = definition(json!({}));
        assert!(md.validate().is_ok());

        md.event = None;
        assert_eq!(
            md.validate().unwrap_err(),
            ValidationError::RequiredField { field: "event[x]" }
        );
    }

    #[test]
    fn test_focus_min_zero_is_present() {
        let md = definition(json!({ "focus": [{ "code": "Patient", "min": 0 }] }));
        assert!(md.validate().is_ok());
    }

    #[test]
    fn test_focus_min_missing() {
        let md = definition(json!({ "focus": [{ "code": "Patient", "max": "1" }] }));
        assert_eq!(md.validate().unwrap_err().location(), "focus[0].min");
    }

    #[test]
    fn test_date_required() {
        let md = definition(json!({ "date": "" }));
        assert_eq!(md.validate().unwrap_err(), ValidationError::RequiredField { field: "date" });
    }
}
