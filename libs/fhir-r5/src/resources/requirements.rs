//! FHIR Requirements resource

use crate::datatypes::{
    CodeableConcept, ContactDetail, Extension, Identifier, Meta, Narrative, PublicationStatus,
    Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A set of requirements - features of systems that are necessary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Requirements")]
pub struct Requirements {
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
    pub derived_from: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<Vec<RequirementsStatement>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Requirements".to_string()
}

/// Actual statement as markdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsStatement {
    #[serde(default)]
    #[fhir(required)]
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// SHALL | SHOULD | MAY | SHOULD-NOT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conformance: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditionality: Option<bool>,

    #[serde(default)]
    #[fhir(required)]
    pub requirement: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfied_by: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<Reference>>,
}

impl Requirements {
    pub fn statement(&self, key: &str) -> Option<&RequirementsStatement> {
        self.statement.as_ref()?.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statement_requirement_required() {
        let requirements: Requirements = serde_json::from_value(json!({
            "resourceType": "Requirements",
            "status": "draft",
            "statement": [
                { "key": "order-create", "requirement": "The system SHALL allow orders to be created" },
                { "key": "order-cancel", "conformance": ["SHOULD"] }
            ]
        }))
        .unwrap();

        assert!(requirements.statement("order-create").is_some());
        assert_eq!(
            requirements.validate().unwrap_err().location(),
            "statement[1].requirement"
        );
    }
}
