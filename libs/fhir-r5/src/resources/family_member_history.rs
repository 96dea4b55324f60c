//! FHIR FamilyMemberHistory resource

use crate::datatypes::{
    Age, Annotation, CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative,
    Period, Range, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Information about patient's relatives, relevant for patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "FamilyMemberHistory")]
pub struct FamilyMemberHistory {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates_canonical: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates_uri: Option<Vec<String>>,

    /// partial | completed | entered-in-error | health-unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub patient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<FamilyMemberHistoryParticipant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Relationship to the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub relationship: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<CodeableConcept>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub born: Option<FamilyMemberHistoryBorn>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub age: Option<FamilyMemberHistoryAge>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_age: Option<bool>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub deceased: Option<FamilyMemberHistoryDeceased>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<FamilyMemberHistoryCondition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<Vec<FamilyMemberHistoryProcedure>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "FamilyMemberHistory".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum FamilyMemberHistoryBorn {
    #[serde(rename = "bornPeriod")]
    Period(Period),
    #[serde(rename = "bornDate")]
    Date(String),
    #[serde(rename = "bornString")]
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum FamilyMemberHistoryAge {
    #[serde(rename = "ageAge")]
    Age(Age),
    #[serde(rename = "ageRange")]
    Range(Range),
    #[serde(rename = "ageString")]
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum FamilyMemberHistoryDeceased {
    #[serde(rename = "deceasedBoolean")]
    Boolean(bool),
    #[serde(rename = "deceasedAge")]
    Age(Age),
    #[serde(rename = "deceasedRange")]
    Range(Range),
    #[serde(rename = "deceasedDate")]
    Date(String),
    #[serde(rename = "deceasedString")]
    String(String),
}

/// The party or parties responsible for the family member history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberHistoryParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub actor: Option<Reference>,
}

/// Condition that the related person had
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberHistoryCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributed_to_death: Option<bool>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub onset: Option<FamilyMemberHistoryConditionOnset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum FamilyMemberHistoryConditionOnset {
    #[serde(rename = "onsetAge")]
    Age(Age),
    #[serde(rename = "onsetRange")]
    Range(Range),
    #[serde(rename = "onsetPeriod")]
    Period(Period),
    #[serde(rename = "onsetString")]
    String(String),
}

/// Procedures that the related person had
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberHistoryProcedure {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributed_to_death: Option<bool>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub performed: Option<FamilyMemberHistoryProcedurePerformed>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum FamilyMemberHistoryProcedurePerformed {
    #[serde(rename = "performedAge")]
    Age(Age),
    #[serde(rename = "performedRange")]
    Range(Range),
    #[serde(rename = "performedPeriod")]
    Period(Period),
    #[serde(rename = "performedString")]
    String(String),
    #[serde(rename = "performedDateTime")]
    DateTime(String),
}

impl FamilyMemberHistory {
    pub fn is_deceased(&self) -> bool {
        !matches!(
            self.deceased,
            None | Some(FamilyMemberHistoryDeceased::Boolean(false))
        )
    }
}
