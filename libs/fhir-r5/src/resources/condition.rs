//! FHIR Condition resource

use crate::datatypes::{
    Age, Annotation, CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative,
    Period, Range, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Detailed information about conditions, problems or diagnoses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Condition")]
pub struct Condition {
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

    /// active | recurrence | relapse | inactive | remission | resolved | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub clinical_status: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodeableConcept>,

    /// Identification of the condition, problem or diagnosis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub onset: Option<ConditionOnset>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub abatement: Option<ConditionAbatement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<ConditionParticipant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Vec<ConditionStage>>,

    /// Supporting evidence for the verification status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Condition".to_string()
}

/// Condition.onset[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ConditionOnset {
    #[serde(rename = "onsetDateTime")]
    DateTime(String),
    #[serde(rename = "onsetAge")]
    Age(Age),
    #[serde(rename = "onsetPeriod")]
    Period(Period),
    #[serde(rename = "onsetRange")]
    Range(Range),
    #[serde(rename = "onsetString")]
    String(String),
}

/// Condition.abatement[x]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ConditionAbatement {
    #[serde(rename = "abatementDateTime")]
    DateTime(String),
    #[serde(rename = "abatementAge")]
    Age(Age),
    #[serde(rename = "abatementPeriod")]
    Period(Period),
    #[serde(rename = "abatementRange")]
    Range(Range),
    #[serde(rename = "abatementString")]
    String(String),
}

/// Who or what participated in the activities related to the condition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConditionParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub actor: Option<Reference>,
}

/// Stage/grade, usually assessed formally
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConditionStage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Vec<Reference>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,
}

impl Condition {
    /// Whether the condition carries an abatement, i.e. is no longer current
    pub fn is_abated(&self) -> bool {
        self.abatement.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{Choice, ValidationError, ViolationKind};
    use serde_json::json;

    fn condition(onset: Value) -> Value {
        let mut value = json!({
            "resourceType": "Condition",
            "clinicalStatus": { "coding": [{ "code": "active" }] },
            "subject": { "reference": "Patient/example" }
        });
        if let (Some(target), Some(source)) = (value.as_object_mut(), onset.as_object()) {
            target.extend(source.clone());
        }
        value
    }

    #[test]
    fn test_onset_variant_is_kept() {
        let c: Condition = serde_json::from_value(condition(json!({
            "onsetAge": { "value": 52, "unit": "a" }
        })))
        .unwrap();

        assert!(c.validate().is_ok());
        assert_eq!(c.onset.as_ref().map(Choice::key), Some("onsetAge"));
        assert!(!c.is_abated());
    }

    #[test]
    fn test_onset_conflict() {
        let c: Condition = serde_json::from_value(condition(json!({
            "onsetAge": { "value": 52, "unit": "a" },
            "onsetString": "in his fifties"
        })))
        .unwrap();

        let err = c.validate().unwrap_err();
        assert_eq!(err.kind(), ViolationKind::ChoiceConflict);
        assert_eq!(
            err,
            ValidationError::ChoiceConflict {
                field: "onset[x]",
                variants: vec!["onsetAge", "onsetString"],
            }
        );
    }

    #[test]
    fn test_badly_typed_onset_is_a_deserialization_error() {
        let err = serde_json::from_value::<Condition>(condition(json!({
            "onsetAge": "ten years"
        })))
        .unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");
    }

    #[test]
    fn test_badly_typed_variant_is_not_hidden_by_a_second_variant() {
        let result = serde_json::from_value::<Condition>(condition(json!({
            "onsetAge": "bad",
            "onsetString": "x"
        })));
        assert!(result.is_err());
    }

    #[test]
    fn test_onset_survives_round_trip() {
        let c: Condition = serde_json::from_value(condition(json!({
            "onsetPeriod": { "start": "2020-01-01" }
        })))
        .unwrap();

        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["onsetPeriod"]["start"], "2020-01-01");
        assert!(c.extensions.is_empty());

        let back: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_absent_onset_is_none() {
        let c: Condition = serde_json::from_value(condition(json!({}))).unwrap();
        assert!(c.onset.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_onset_and_abatement_are_independent() {
        let c: Condition = serde_json::from_value(condition(json!({
            "onsetDateTime": "2020-01-01",
            "abatementString": "resolved in spring"
        })))
        .unwrap();

        assert!(c.validate().is_ok());
        assert!(c.is_abated());
    }

    #[test]
    fn test_subject_required() {
        let mut value = condition(json!({}));
        value.as_object_mut().unwrap().remove("subject");
        let c: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(
            c.validate(),
            Err(ValidationError::RequiredField { field: "subject" })
        );
    }
}
