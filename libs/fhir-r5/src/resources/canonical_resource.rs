//! FHIR CanonicalResource
//!
//! The common header shared by every resource published under a canonical URL.

use crate::datatypes::{
    CodeableConcept, ContactDetail, Extension, Identifier, Meta, Narrative, PublicationStatus,
    UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "CanonicalResource")]
pub struct CanonicalResource {
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

    /// Canonical identifier for this resource, represented as an absolute URI
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

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CanonicalResource".to_string()
}

impl CanonicalResource {
    /// Canonical reference in `url|version` form, if a url is set
    pub fn canonical(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        Some(match self.version.as_deref() {
            Some(version) => format!("{url}|{version}"),
            None => url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{Resource, ValidationError};

    #[test]
    fn test_status_required() {
        assert_eq!(
            CanonicalResource::empty().validate(),
            Err(ValidationError::RequiredField { field: "status" })
        );
    }

    #[test]
    fn test_canonical_with_version() {
        let resource = CanonicalResource {
            url: Some("http://example.org/fhir/ValueSet/x".to_string()),
            version: Some("1.0.0".to_string()),
            status: Some(PublicationStatus::Active),
            ..CanonicalResource::empty()
        };
        assert_eq!(
            resource.canonical().as_deref(),
            Some("http://example.org/fhir/ValueSet/x|1.0.0")
        );
        assert!(resource.validate().is_ok());
    }

    #[test]
    fn test_use_context_checked_in_order() {
        let resource = CanonicalResource {
            status: Some(PublicationStatus::Draft),
            use_context: Some(vec![UsageContext::default()]),
            ..CanonicalResource::empty()
        };
        assert_eq!(resource.validate().unwrap_err().location(), "useContext[0].code");
    }
}
