//! FHIR CapabilityStatement resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative,
    PublicationStatus, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A statement of system capabilities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "CapabilityStatement")]
pub struct CapabilityStatement {
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

    /// instance | capability | requirements
    #[serde(default)]
    #[fhir(required)]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<CapabilityStatementSoftware>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<CapabilityStatementImplementation>,

    /// FHIR Version the system supports
    #[serde(default)]
    #[fhir(required)]
    pub fhir_version: String,

    /// Formats supported (xml | json | ttl | mime type)
    #[serde(default)]
    #[fhir(min = 1)]
    pub format: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_format: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_language: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_guide: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<Vec<CapabilityStatementRest>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging: Option<Vec<CapabilityStatementMessaging>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Vec<CapabilityStatementDocument>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CapabilityStatement".to_string()
}

/// Software that is covered by this capability statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementSoftware {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// If this describes a specific instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementImplementation {
    #[serde(default)]
    #[fhir(required)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian: Option<Reference>,
}

/// If the endpoint is a RESTful one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementRest {
    /// client | server
    #[serde(default)]
    #[fhir(required)]
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<CapabilityStatementRestSecurity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<CapabilityStatementRestResource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Vec<CapabilityStatementInteraction>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_param: Option<Vec<CapabilityStatementSearchParam>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Vec<CapabilityStatementOperation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compartment: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementRestSecurity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<bool>,

    /// OAuth | SMART-on-FHIR | NTLM | Basic | Kerberos | Certificates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Resource served on the REST interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementRestResource {
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_profile: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Vec<CapabilityStatementInteraction>>,

    /// no-version | versioned | versioned-update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_history: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_create: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_create: Option<bool>,

    /// not-supported | modified-since | not-match | full-support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_read: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_update: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_patch: Option<bool>,

    /// not-supported | single | multiple
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_delete: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_policy: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_include: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_rev_include: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_param: Option<Vec<CapabilityStatementSearchParam>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Vec<CapabilityStatementOperation>>,
}

/// What operations are supported, at the resource or system level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementInteraction {
    /// read | vread | update | patch | delete | history-instance | create | search-type | ...
    #[serde(default)]
    #[fhir(required)]
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Search parameters supported by implementation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementSearchParam {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// number | date | string | token | reference | composite | quantity | uri | special
    #[serde(rename = "type", default)]
    #[fhir(required)]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Definition of an operation or a named query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementOperation {
    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(default)]
    #[fhir(required)]
    pub definition: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// If messaging is supported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementMessaging {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Vec<CapabilityStatementMessagingEndpoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliable_cache: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_message: Option<Vec<CapabilityStatementSupportedMessage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementMessagingEndpoint {
    /// http | ftp | mllp +
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub protocol: Option<Coding>,

    #[serde(default)]
    #[fhir(required)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementSupportedMessage {
    /// sender | receiver
    #[serde(default)]
    #[fhir(required)]
    pub mode: String,

    #[serde(default)]
    #[fhir(required)]
    pub definition: String,
}

/// Document definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatementDocument {
    /// producer | consumer
    #[serde(default)]
    #[fhir(required)]
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Constraint on the resources used in the document
    #[serde(default)]
    #[fhir(required)]
    pub profile: String,
}

impl CapabilityStatement {
    /// Resource types served by any server-mode REST endpoint
    pub fn server_resource_types(&self) -> Vec<&str> {
        self.rest
            .iter()
            .flatten()
            .filter(|rest| rest.mode == "server")
            .flat_map(|rest| rest.resource.iter().flatten())
            .map(|resource| resource.type_.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    fn statement(format: Value) -> CapabilityStatement {
        serde_json::from_value(json!({
            "resourceType": "CapabilityStatement",
            "status": "active",
            "date": "2024-05-01",
            "kind": "instance",
            "fhirVersion": "5.0.0",
            "format": format,
            "rest": [{
                "mode": "server",
                "resource": [{ "type": "Patient", "interaction": [{ "code": "read" }] }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_format_min_cardinality() {
        let err = statement(json!([])).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MinCardinality {
                field: "format",
                min: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_single_format_is_enough() {
        let cs = statement(json!(["json"]));
        assert!(cs.validate().is_ok());
        assert_eq!(cs.server_resource_types(), vec!["Patient"]);
    }

    #[test]
    fn test_missing_format_key_counts_as_empty() {
        let mut value = serde_json::to_value(statement(json!(["json"]))).unwrap();
        value.as_object_mut().unwrap().remove("format");
        let cs: CapabilityStatement = serde_json::from_value(value).unwrap();
        assert_eq!(cs.validate().unwrap_err().field(), "format");
    }

    #[test]
    fn test_interaction_code_location() {
        let mut cs = statement(json!(["json"]));
        cs.rest.as_mut().unwrap()[0].resource.as_mut().unwrap()[0]
            .interaction
            .as_mut()
            .unwrap()
            .push(CapabilityStatementInteraction::default());

        let err = cs.validate().unwrap_err();
        assert_eq!(err.location(), "rest[0].resource[0].interaction[1].code");
    }
}
