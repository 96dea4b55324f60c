//! FHIR ResearchStudy resource

use crate::datatypes::{
    Annotation, CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative,
    Period, Reference, RelatedArtifact,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Investigation to increase healthcare-related patient-independent knowledge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ResearchStudy")]
pub struct ResearchStudy {
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
    pub label: Option<Vec<ResearchStudyLabel>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_artifact: Option<Vec<RelatedArtifact>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// draft | active | retired | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_purpose_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_design: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_party: Option<Vec<ResearchStudyAssociatedParty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_status: Option<Vec<ResearchStudyProgressStatus>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_stopped: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruitment: Option<ResearchStudyRecruitment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_group: Option<Vec<ResearchStudyComparisonGroup>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<Vec<ResearchStudyObjective>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_measure: Option<Vec<ResearchStudyOutcomeMeasure>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Reference>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ResearchStudy".to_string()
}

/// Additional names for the study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyLabel {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Sponsors, collaborators, and other parties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyAssociatedParty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// sponsor | lead-sponsor | sponsor-investigator | primary-investigator | collaborator | funding-source | general-contact | recruitment-contact | sub-investigator | study-director | study-chair
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Vec<Period>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<Reference>,
}

/// Status of study with time for that status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyProgressStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub state: Option<CodeableConcept>,

    /// Actual if true else anticipated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Target or actual group of participants enrolled in study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyRecruitment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_group: Option<Reference>,
}

/// Defined path through the study for a subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyComparisonGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,

    #[serde(default)]
    #[fhir(required)]
    pub name: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_exposure: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_group: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyObjective {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudyOutcomeMeasure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl ResearchStudy {
    /// Latest progress state flagged as actual
    pub fn current_state(&self) -> Option<&CodeableConcept> {
        self.progress_status
            .iter()
            .flatten()
            .rev()
            .find(|s| s.actual == Some(true))
            .and_then(|s| s.state.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_state_required() {
        let study: ResearchStudy = serde_json::from_value(json!({
            "resourceType": "ResearchStudy",
            "status": "active",
            "progressStatus": [
                { "state": { "text": "overall-study" }, "actual": true },
                { "actual": false }
            ]
        }))
        .unwrap();

        assert_eq!(
            study.current_state().and_then(|c| c.text.as_deref()),
            Some("overall-study")
        );
        assert_eq!(study.validate().unwrap_err().location(), "progressStatus[1].state");
    }

    #[test]
    fn test_comparison_group_and_party_collected() {
        let study: ResearchStudy = serde_json::from_value(json!({
            "resourceType": "ResearchStudy",
            "status": "active",
            "associatedParty": [{ "name": "Sponsor Inc" }],
            "comparisonGroup": [{ "description": "placebo arm" }]
        }))
        .unwrap();

        let locations: Vec<_> = study.violations().iter().map(|e| e.location()).collect();
        assert_eq!(
            locations,
            vec!["associatedParty[0].role", "comparisonGroup[0].name"]
        );
    }
}
