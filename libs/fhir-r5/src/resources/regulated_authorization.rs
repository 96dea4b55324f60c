//! FHIR RegulatedAuthorization resource

use crate::datatypes::{
    CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative, Period, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Regulatory approval, clearance or licencing related to a regulated product, treatment, facility or activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "RegulatedAuthorization")]
pub struct RegulatedAuthorization {
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

    /// The product type, treatment, facility or activity that is being authorized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<Reference>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indication: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_use: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulator: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_document: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<RegulatedAuthorizationCase>,
}

fn default_resource_type() -> String {
    "RegulatedAuthorization".to_string()
}

/// The case or regulatory procedure for granting or amending a regulated authorization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegulatedAuthorizationCase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CodeableConcept>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub date: Option<RegulatedAuthorizationCaseDate>,

    /// Applications submitted to obtain a regulated authorization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Vec<RegulatedAuthorizationCase>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum RegulatedAuthorizationCaseDate {
    #[serde(rename = "datePeriod")]
    Period(Period),
    #[serde(rename = "dateDateTime")]
    DateTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ViolationKind;
    use serde_json::json;

    #[test]
    fn test_application_date_conflict() {
        let authorization: RegulatedAuthorization = serde_json::from_value(json!({
            "resourceType": "RegulatedAuthorization",
            "case": {
                "dateDateTime": "2015-08-01",
                "application": [
                    { "dateDateTime": "2014-09-01" },
                    { "datePeriod": { "start": "2014-09-01" }, "dateDateTime": "2014-09-02" }
                ]
            }
        }))
        .unwrap();

        let err = authorization.validate().unwrap_err();
        assert_eq!(err.kind(), ViolationKind::ChoiceConflict);
        assert_eq!(err.location(), "case.application[1].date[x]");
    }

    #[test]
    fn test_empty_authorization_is_valid() {
        let authorization: RegulatedAuthorization =
            serde_json::from_value(json!({ "resourceType": "RegulatedAuthorization" })).unwrap();
        assert!(authorization.validate().is_ok());
    }
}
