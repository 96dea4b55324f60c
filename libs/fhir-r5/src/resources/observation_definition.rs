//! FHIR ObservationDefinition resource

use crate::datatypes::{
    CodeableConcept, Coding, ContactDetail, Extension, Identifier, Meta, Narrative, Period,
    PublicationStatus, Range, Reference, UsageContext,
};
use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Definition of an observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "ObservationDefinition")]
pub struct ObservationDefinition {
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
    pub identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub status: Option<PublicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_context: Option<Vec<UsageContext>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from_canonical: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from_uri: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// Type of observation
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableConcept>,

    /// Quantity | CodeableConcept | string | boolean | integer | Range | Ratio | SampledData | time | dateTime | Period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_data_type: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_results_allowed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_report_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_unit: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_value: Option<Vec<ObservationDefinitionQualifiedValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_member: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Vec<ObservationDefinitionComponent>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    #[fhir(extensions)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ObservationDefinition".to_string()
}

/// Set of qualified values for observation results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDefinitionQualifiedValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<Vec<CodeableConcept>>,

    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestational_age: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// reference | critical | absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_coded_value_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_coded_value_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abnormal_coded_value_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_coded_value_set: Option<String>,
}

/// Component results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDefinitionComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_data_type: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_unit: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_value: Option<Vec<ObservationDefinitionQualifiedValue>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_code_required() {
        let definition: ObservationDefinition = serde_json::from_value(json!({
            "resourceType": "ObservationDefinition",
            "status": "active",
            "code": { "coding": [{ "system": "http://loinc.org", "code": "85354-9" }] },
            "component": [
                { "code": { "coding": [{ "system": "http://loinc.org", "code": "8480-6" }] } },
                { "permittedDataType": ["Quantity"] }
            ]
        }))
        .unwrap();

        assert_eq!(definition.validate().unwrap_err().location(), "component[1].code");
    }

    #[test]
    fn test_collects_missing_status_and_code() {
        let definition: ObservationDefinition =
            serde_json::from_value(json!({ "resourceType": "ObservationDefinition" })).unwrap();

        let fields: Vec<_> = definition.violations().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["status", "code"]);
    }
}
