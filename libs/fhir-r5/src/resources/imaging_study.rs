//! FHIR ImagingStudy resource

use crate::datatypes::{
    Annotation, CodeableConcept, CodeableReference, Coding, Extension, Identifier, Meta,
    Narrative, Reference,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A set of images produced in single study (one or more series of references images)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ImagingStudy")]
pub struct ImagingStudy {
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

    /// registered | available | cancelled | entered-in-error | unknown
    #[serde(default)]
    #[fhir(required)]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_series: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_instances: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<ImagingStudySeries>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ImagingStudy".to_string()
}

/// Each study has one or more series of instances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImagingStudySeries {
    /// DICOM Series Instance UID for the series
    #[serde(default)]
    #[fhir(required)]
    pub uid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub modality: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_instances: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableReference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub laterality: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<ImagingStudySeriesPerformer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<Vec<ImagingStudySeriesInstance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImagingStudySeriesPerformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub actor: Option<Reference>,
}

/// A single SOP instance from the series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImagingStudySeriesInstance {
    #[serde(default)]
    #[fhir(required)]
    pub uid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub sop_class: Option<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ImagingStudy {
    /// Instances across every series
    pub fn instance_count(&self) -> usize {
        self.series
            .iter()
            .flatten()
            .map(|s| s.instance.as_ref().map_or(0, Vec::len))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::Resource;
    use serde_json::json;

    #[test]
    fn test_instance_sop_class_required() {
        let study: ImagingStudy = serde_json::from_value(json!({
            "resourceType": "ImagingStudy",
            "status": "available",
            "subject": { "reference": "Patient/dicom" },
            "series": [{
                "uid": "2.16.124.113543.6003.2588828330.45298.17418.2723805630",
                "modality": { "coding": [{ "system": "http://dicom.nema.org/resources/ontology/DCM", "code": "CT" }] },
                "instance": [
                    { "uid": "2.16.124.113543.6003.189642796.63084.16748.2599092903", "sopClass": { "code": "urn:oid:1.2.840.10008.5.1.4.1.1.2" } },
                    { "uid": "2.16.124.113543.6003.189642796.63084.16748.2599092904" }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(study.instance_count(), 2);
        assert_eq!(
            study.validate().unwrap_err().location(),
            "series[0].instance[1].sopClass"
        );
    }

    #[test]
    fn test_series_uid_required() {
        let study = ImagingStudy {
            status: "registered".to_string(),
            subject: Some(Reference::to("Patient/1")),
            series: Some(vec![ImagingStudySeries::default()]),
            ..ImagingStudy::empty()
        };
        assert_eq!(study.validate().unwrap_err().location(), "series[0].uid");
    }
}
