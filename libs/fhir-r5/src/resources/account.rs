//! FHIR Account resource

use crate::datatypes::{
    CodeableConcept, CodeableReference, Extension, Identifier, Meta, Money, Narrative, Period,
    Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Tracks balance, charges, for patient or cost center
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Account")]
pub struct Account {
    /// Resource type - always "Account"
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

    /// active | inactive | entered-in-error | on-hold | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_status: Option<CodeableConcept>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The entity that caused the expenses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_period: Option<Period>,

    /// The party(s) that are responsible for covering the payment of this account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Vec<AccountCoverage>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantor: Option<Vec<AccountGuarantor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Vec<AccountDiagnosis>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<Vec<AccountProcedure>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_account: Option<Vec<AccountRelatedAccount>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Vec<AccountBalance>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_at: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Account".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountCoverage {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub coverage: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountGuarantor {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub party: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_hold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountDiagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub condition: Option<CodeableReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_diagnosis: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_admission: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<Vec<CodeableConcept>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountProcedure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_service: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Vec<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountRelatedAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub account: Option<Reference>,
}

/// Calculated account balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Who is expected to pay this part of the balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<CodeableConcept>,

    /// current | 30 | 60 | 90 | 120
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub amount: Option<Money>,
}

impl Account {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            resource_type: default_resource_type(),
            status: status.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::ValidationError;
    use serde_json::json;

    #[test]
    fn test_empty_status_is_required() {
        let mut account = Account::new("");
        let err = account.validate().unwrap_err();
        assert_eq!(err.to_string(), "field 'status' is required");

        account.status = "active".to_string();
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_guarantor_party_required() {
        let account: Account = serde_json::from_value(json!({
            "resourceType": "Account",
            "status": "active",
            "guarantor": [{ "party": { "reference": "Patient/1" } }, { "onHold": true }]
        }))
        .unwrap();

        let err = account.validate().unwrap_err();
        assert_eq!(err.location(), "guarantor[1].party");
        assert_eq!(err.leaf(), &ValidationError::RequiredField { field: "party" });
    }

    #[test]
    fn test_balance_amount_required() {
        let account = Account {
            balance: Some(vec![AccountBalance::default()]),
            ..Account::new("active")
        };
        assert_eq!(account.validate().unwrap_err().location(), "balance[0].amount");
    }
}
