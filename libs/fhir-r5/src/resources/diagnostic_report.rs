//! FHIR DiagnosticReport resource

use crate::datatypes::{
    Annotation, Attachment, CodeableConcept, Extension, Identifier, Meta, Narrative, Period,
    Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A Diagnostic report - a combination of request information, atomic results, images, interpretation, as well as formatted reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "DiagnosticReport")]
pub struct DiagnosticReport {
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
    pub based_on: Option<Vec<Reference>>,

    /// registered | partial | preliminary | modified | final | amended | corrected | appended | cancelled | entered-in-error | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// Name/Code for this diagnostic report
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    pub effective: Option<DiagnosticReportEffective>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_interpreter: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Vec<Reference>>,

    /// Observations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub study: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_info: Option<Vec<DiagnosticReportSupportingInfo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<DiagnosticReportMedia>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presented_form: Option<Vec<Attachment>>,

    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "DiagnosticReport".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub enum DiagnosticReportEffective {
    #[serde(rename = "effectiveDateTime")]
    DateTime(String),
    #[serde(rename = "effectivePeriod")]
    Period(Period),
}

/// Additional information supporting the diagnostic report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReportSupportingInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub reference: Option<Reference>,
}

/// Key images or data associated with this report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReportMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub link: Option<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{ValidationError, ViolationKind};
    use serde_json::json;

    fn report(extra: Value) -> DiagnosticReport {
        let mut value = json!({
            "resourceType": "DiagnosticReport",
            "status": "final",
            "code": { "text": "Complete blood count" }
        });
        if let (Some(target), Value::Object(extra)) = (value.as_object_mut(), extra) {
            target.extend(extra);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_and_code_required() {
        let report: DiagnosticReport =
            serde_json::from_value(json!({ "resourceType": "DiagnosticReport" })).unwrap();

        assert_eq!(
            report.violations(),
            vec![
                ValidationError::RequiredField { field: "status" },
                ValidationError::RequiredField { field: "code" },
            ]
        );
    }

    #[test]
    fn test_supporting_info_requires_type_and_reference() {
        let report = report(json!({
            "supportingInfo": [
                {
                    "type": { "text": "citation" },
                    "reference": { "reference": "Citation/example" }
                },
                { "type": { "text": "imaging" } }
            ]
        }));

        let err = report.validate().unwrap_err();
        assert_eq!(err.kind(), ViolationKind::RequiredField);
        assert_eq!(err.location(), "supportingInfo[1].reference");
    }

    #[test]
    fn test_media_requires_link() {
        let report = report(json!({
            "media": [{ "comment": "axial slice" }],
            "supportingInfo": [{}]
        }));

        let locations: Vec<String> = report
            .violations()
            .iter()
            .map(ValidationError::location)
            .collect();
        assert_eq!(
            locations,
            vec![
                "supportingInfo[0].type",
                "supportingInfo[0].reference",
                "media[0].link",
            ]
        );
    }

    #[test]
    fn test_effective_choice() {
        let report = report(json!({ "effectiveDateTime": "2024-03-01T10:00:00Z" }));
        assert_eq!(
            report.effective,
            Some(DiagnosticReportEffective::DateTime(
                "2024-03-01T10:00:00Z".to_string()
            ))
        );
        assert!(report.validate().is_ok());
    }
}
