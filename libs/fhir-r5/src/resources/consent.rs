//! FHIR Consent resource

use crate::datatypes::{
    Attachment, CodeableConcept, Coding, Expression, Extension, Identifier, Meta, Narrative,
    Period, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A healthcare consumer's or third party's choices to permit or deny recipients or roles to perform actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Consent")]
pub struct Consent {
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

    /// draft | active | inactive | not-done | entered-in-error | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantor: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantee: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_attachment: Option<Vec<Attachment>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_basis: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Vec<ConsentVerification>>,

    /// deny | permit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provision: Option<Vec<ConsentProvision>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Consent".to_string()
}

/// Consent Verified by patient or family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsentVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub verified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_with: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<Vec<String>>,
}

/// Constraints to the base Consent.policyRule/Consent.policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Vec<ConsentProvisionActor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_label: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<Vec<Coding>>,

    /// e.g. Resource Type, Profile, CDA, etc
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ConsentProvisionData>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,

    /// Nested Exception Provisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provision: Option<Vec<ConsentProvision>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvisionActor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

/// Data controlled by this provision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvisionData {
    /// instance | related | dependents | authoredby
    #[serde(default)]
    #[fhir(required)]
    pub meaning: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub reference: Option<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    #[test]
    fn test_nested_provision_data() {
        let consent: Consent = serde_json::from_value(json!({
            "resourceType": "Consent",
            "status": "active",
            "decision": "permit",
            "provision": [{
                "provision": [{
                    "data": [{ "meaning": "related" }]
                }]
            }]
        }))
        .unwrap();

        let err = consent.validate().unwrap_err();
        assert_eq!(err.location(), "provision[0].provision[0].data[0].reference");
        assert_eq!(err.leaf(), &ValidationError::RequiredField { field: "reference" });
    }

    #[test]
    fn test_verified_false_is_present() {
        let consent = Consent {
            status: "active".to_string(),
            verification: Some(vec![ConsentVerification {
                verified: Some(false),
                ..Default::default()
            }]),
            ..Default::default()
        };
        // resourceType defaults only through serde
        assert_eq!(
            consent.validate().unwrap_err().kind(),
            ferrum_validator::ViolationKind::InvalidResourceType
        );

        let consent = Consent {
            resource_type: "Consent".to_string(),
            ..consent
        };
        assert!(consent.validate().is_ok());
    }
}
