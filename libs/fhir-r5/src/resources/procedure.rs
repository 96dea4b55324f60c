//! FHIR Procedure resource

use crate::datatypes::{
    Age, Annotation, CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative,
    Period, Range, Reference, Timing,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An action that is being or was performed on an individual or entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Procedure")]
pub struct Procedure {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    /// preparation | in-progress | not-done | on-hold | stopped | completed | entered-in-error | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Individual or entity the procedure was performed on
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub occurrence: Option<ProcedureOccurrence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub reported: Option<ProcedureReported>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<ProcedurePerformer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub complication: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_device: Option<Vec<ProcedureFocalDevice>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_info: Option<Vec<Reference>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Procedure".to_string()
}

/// When the procedure occurred or is occurring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ProcedureOccurrence {
    #[serde(rename = "occurrenceDateTime")]
    DateTime(String),
    #[serde(rename = "occurrencePeriod")]
    Period(Period),
    #[serde(rename = "occurrenceString")]
    String(String),
    #[serde(rename = "occurrenceAge")]
    Age(Age),
    #[serde(rename = "occurrenceRange")]
    Range(Range),
    #[serde(rename = "occurrenceTiming")]
    Timing(Timing),
}

/// Reported rather than primary record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum ProcedureReported {
    #[serde(rename = "reportedBoolean")]
    Boolean(bool),
    #[serde(rename = "reportedReference")]
    Reference(Reference),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcedurePerformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub actor: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Manipulated, implanted, or removed device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureFocalDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub manipulated: Option<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_focal_device_manipulated_required() {
        let procedure: Procedure = serde_json::from_value(json!({
            "resourceType": "Procedure",
            "status": "completed",
            "subject": { "reference": "Patient/example" },
            "occurrenceDateTime": "2015-04-05",
            "reportedBoolean": false,
            "focalDevice": [{ "action": { "text": "implanted" } }]
        }))
        .unwrap();

        assert!(matches!(
            procedure.reported,
            Some(ProcedureReported::Boolean(false))
        ));
        assert_eq!(
            procedure.validate().unwrap_err().location(),
            "focalDevice[0].manipulated"
        );
    }

    #[test]
    fn test_occurrence_conflict() {
        let procedure: Procedure = serde_json::from_value(json!({
            "resourceType": "Procedure",
            "status": "completed",
            "subject": { "reference": "Patient/example" },
            "occurrenceDateTime": "2015-04-05",
            "occurrencePeriod": { "start": "2015-04-05" }
        }))
        .unwrap();

        let err = procedure.validate().unwrap_err();
        assert_eq!(err.location(), "occurrence[x]");
        assert_eq!(
            err.to_string(),
            "field 'occurrence[x]' has more than one value: occurrenceDateTime, occurrencePeriod"
        );
    }
}
