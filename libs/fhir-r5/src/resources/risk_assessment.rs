//! FHIR RiskAssessment resource

use crate::datatypes::{
    Annotation, CodeableConcept, CodeableReference, Extension, Identifier, Meta, Narrative,
    Period, Range, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Potential outcomes for a subject with likelihood
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "RiskAssessment")]
pub struct RiskAssessment {
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
    pub based_on: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,

    /// registered | preliminary | final | amended | corrected | cancelled | entered-in-error | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

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
    pub occurrence: Option<RiskAssessmentOccurrence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Vec<RiskAssessmentPrediction>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "RiskAssessment".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum RiskAssessmentOccurrence {
    #[serde(rename = "occurrenceDateTime")]
    DateTime(String),
    #[serde(rename = "occurrencePeriod")]
    Period(Period),
}

/// Outcome predicted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentPrediction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CodeableConcept>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub probability: Option<RiskAssessmentProbability>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualitative_risk: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_risk: Option<f64>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub when: Option<RiskAssessmentWhen>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum RiskAssessmentProbability {
    #[serde(rename = "probabilityDecimal")]
    Decimal(f64),
    #[serde(rename = "probabilityRange")]
    Range(Range),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum RiskAssessmentWhen {
    #[serde(rename = "whenPeriod")]
    Period(Period),
    #[serde(rename = "whenRange")]
    Range(Range),
}

impl RiskAssessmentPrediction {
    /// Point probability, if the prediction carries one
    pub fn probability_decimal(&self) -> Option<f64> {
        match self.probability {
            Some(RiskAssessmentProbability::Decimal(p)) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_probability() {
        let assessment: RiskAssessment = serde_json::from_value(json!({
            "resourceType": "RiskAssessment",
            "status": "final",
            "subject": { "reference": "Patient/genetic-risk" },
            "occurrenceDateTime": "2006-01-13T23:01:00Z",
            "prediction": [{
                "outcome": { "text": "Breast Cancer" },
                "probabilityDecimal": 0.000168,
                "whenRange": { "low": { "value": 53, "unit": "years" }, "high": { "value": 57, "unit": "years" } }
            }]
        }))
        .unwrap();

        let prediction = &assessment.prediction.as_ref().unwrap()[0];
        assert_eq!(prediction.probability_decimal(), Some(0.000168));
        assert!(assessment.validate().is_ok());
    }

    #[test]
    fn test_prediction_when_conflict() {
        let assessment: RiskAssessment = serde_json::from_value(json!({
            "resourceType": "RiskAssessment",
            "status": "final",
            "subject": { "reference": "Patient/example" },
            "prediction": [{
                "whenPeriod": { "start": "2024-01-01" },
                "whenRange": { "low": { "value": 1 } }
            }]
        }))
        .unwrap();

        assert_eq!(assessment.validate().unwrap_err().location(), "prediction[0].when[x]");
    }
}
