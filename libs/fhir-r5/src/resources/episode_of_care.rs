//! FHIR EpisodeOfCare resource

use crate::datatypes::{
    CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative, Period, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An association of a Patient with an Organization and Healthcare Provider(s) for a period of time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "EpisodeOfCare")]
pub struct EpisodeOfCare {
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

    /// planned | waitlist | active | onhold | finished | cancelled | entered-in-error
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_history: Option<Vec<EpisodeOfCareStatusHistory>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<EpisodeOfCareReason>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Vec<EpisodeOfCareDiagnosis>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub patient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub managing_organization: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_request: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_manager: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_team: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Vec<Reference>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "EpisodeOfCare".to_string()
}

/// Past list of status codes (the current status may be included to cover the start date of the status)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeOfCareStatusHistory {
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeOfCareReason {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<CodeableReference>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeOfCareDiagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<CodeableReference>>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<CodeableConcept>,
}

impl EpisodeOfCare {
    /// Most recent status transition recorded in the history, if any
    pub fn last_transition(&self) -> Option<&EpisodeOfCareStatusHistory> {
        self.status_history.as_ref()?.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_history_period_required() {
        let episode: EpisodeOfCare = serde_json::from_value(json!({
            "resourceType": "EpisodeOfCare",
            "status": "active",
            "statusHistory": [
                { "status": "planned", "period": { "start": "2024-01-01", "end": "2024-01-14" } },
                { "status": "active" }
            ],
            "patient": { "reference": "Patient/example" }
        }))
        .unwrap();

        assert_eq!(episode.last_transition().map(|h| h.status.as_str()), Some("active"));
        assert_eq!(
            episode.validate().unwrap_err().location(),
            "statusHistory[1].period"
        );
    }
}
