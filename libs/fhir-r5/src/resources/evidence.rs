//! FHIR Evidence resource

use crate::datatypes::{
    Annotation, CodeableConcept, ContactDetail, Extension, Identifier, Meta, Narrative,
    PublicationStatus, Quantity, Range, Reference, RelatedArtifact, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Single evidence bit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Evidence")]
pub struct Evidence {
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

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub cite_as: Option<EvidenceCiteAs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endorser: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Vec<UsageContext>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_artifact: Option<Vec<RelatedArtifact>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    /// Evidence variable such as population, exposure, or outcome
    #[serde(default)]
    #[fhir(min = 1)]
    pub variable_definition: Vec<EvidenceVariableDefinition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_design: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Vec<EvidenceStatistic>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<Vec<EvidenceCertainty>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Evidence".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum EvidenceCiteAs {
    #[serde(rename = "citeAsReference")]
    Reference(Reference),
    #[serde(rename = "citeAsMarkdown")]
    Markdown(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceVariableDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    /// population | subpopulation | exposure | referenceExposure | measuredVariable | confounder
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub variable_role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub directness_match: Option<CodeableConcept>,
}

/// Values and parameters for a single statistic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceStatistic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_events: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_affected: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<EvidenceStatisticSampleSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_estimate: Option<Vec<EvidenceStatisticAttributeEstimate>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_characteristic: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceStatisticSampleSize {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_studies: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_participants: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_data_count: Option<u32>,
}

/// An attribute of the Statistic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceStatisticAttributeEstimate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_estimate: Option<Vec<EvidenceStatisticAttributeEstimate>>,
}

/// Certainty or quality of the evidence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCertainty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rater: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcomponent: Option<Vec<EvidenceCertainty>>,
}

impl EvidenceCertainty {
    /// Depth of the subcomponent tree rooted here
    pub fn depth(&self) -> usize {
        1 + self
            .subcomponent
            .iter()
            .flatten()
            .map(EvidenceCertainty::depth)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_role_required() {
        let evidence: Evidence = serde_json::from_value(json!({
            "resourceType": "Evidence",
            "status": "active",
            "variableDefinition": [
                { "variableRole": { "text": "population" } },
                { "description": "exposure without role" }
            ]
        }))
        .unwrap();

        assert_eq!(
            evidence.validate().unwrap_err().location(),
            "variableDefinition[1].variableRole"
        );
    }

    #[test]
    fn test_certainty_subcomponents_nest() {
        let certainty: EvidenceCertainty = serde_json::from_value(json!({
            "rating": { "text": "moderate" },
            "subcomponent": [{ "subcomponent": [{ "rater": "GRADE" }] }]
        }))
        .unwrap();

        assert_eq!(certainty.depth(), 3);
        assert!(certainty.validate().is_ok());
    }

    #[test]
    fn test_cite_as_markdown() {
        let evidence: Evidence = serde_json::from_value(json!({
            "resourceType": "Evidence",
            "status": "draft",
            "citeAsMarkdown": "Example et al. 2024",
            "variableDefinition": [{ "variableRole": { "text": "outcome" } }]
        }))
        .unwrap();

        assert!(matches!(evidence.cite_as, Some(EvidenceCiteAs::Markdown(_))));
        assert!(evidence.validate().is_ok());
    }
}
