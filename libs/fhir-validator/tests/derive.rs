use std::collections::HashMap;

use ferrum_validator::{
    Choice, Resource, Validate, ValidationError, ValidationMode, Validator, ValidatorConfig,
    ViolationKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(default)]
    #[fhir(required)]
    code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
enum Status {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "inactive")]
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
enum Onset {
    #[serde(rename = "onsetDateTime")]
    DateTime(String),
    #[serde(rename = "onsetCoding")]
    Coding(Coding),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct Link {
    #[serde(default)]
    #[fhir(required)]
    relation: String,
    #[serde(default)]
    #[fhir(required)]
    url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[fhir(resource = "Sample")]
struct Sample {
    #[serde(default = "default_resource_type")]
    resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[fhir(required)]
    status: Option<Status>,
    #[serde(default, rename = "format")]
    #[fhir(min = 1)]
    formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    link: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<Coding>,
    #[serde(
        flatten,
        deserialize_with = "ferrum_validator::choice::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    #[fhir(choice)]
    onset: Option<Onset>,
    #[serde(flatten)]
    #[fhir(extensions)]
    extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Sample".to_string()
}

fn sample(value: Value) -> Sample {
    serde_json::from_value(value).unwrap()
}

#[test]
fn empty_resource_reports_first_required_field() {
    let err = Sample::empty().validate().unwrap_err();
    assert_eq!(err, ValidationError::RequiredField { field: "status" });
}

#[test]
fn resource_type_is_checked_before_fields() {
    let doc = Sample {
        resource_type: "Sampel".to_string(),
        ..Default::default()
    };
    let err = doc.validate().unwrap_err();
    assert_eq!(err.kind(), ViolationKind::InvalidResourceType);
    assert_eq!(Sample::RESOURCE_TYPE, "Sample");
}

#[test]
fn min_cardinality_uses_json_name() {
    let doc = sample(json!({ "resourceType": "Sample", "status": "active" }));
    let err = doc.validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::MinCardinality {
            field: "format",
            min: 1,
            found: 0
        }
    );
}

#[test]
fn nested_list_error_carries_index() {
    let doc = sample(json!({
        "resourceType": "Sample",
        "status": "active",
        "format": ["json"],
        "link": [
            { "relation": "self", "url": "http://example.org" },
            { "relation": "next" }
        ]
    }));
    let err = doc.validate().unwrap_err();
    assert_eq!(err.location(), "link[1].url");
    assert_eq!(err.to_string(), "link[1]: field 'url' is required");
}

#[test]
fn valid_document_passes() {
    let doc = sample(json!({
        "resourceType": "Sample",
        "status": "inactive",
        "format": ["xml"],
        "code": { "code": "x" },
        "onsetDateTime": "2024-01-01"
    }));
    assert!(doc.validate().is_ok());
    assert!(doc.violations().is_empty());
}

#[test]
fn choice_payload_is_validated_under_its_key() {
    let doc = sample(json!({
        "resourceType": "Sample",
        "status": "active",
        "format": ["json"],
        "onsetCoding": { "system": "http://loinc.org" }
    }));
    let err = doc.validate().unwrap_err();
    assert_eq!(err.location(), "onsetCoding.code");
    assert_eq!(doc.onset.as_ref().map(Choice::key), Some("onsetCoding"));
}

#[test]
fn choice_conflict_is_detected() {
    let doc = sample(json!({
        "resourceType": "Sample",
        "status": "active",
        "format": ["json"],
        "onsetDateTime": "2024-01-01",
        "onsetCoding": { "code": "x" }
    }));
    let err = doc.validate().unwrap_err();
    assert_eq!(err.kind(), ViolationKind::ChoiceConflict);
    assert_eq!(err.field(), "onset[x]");
    assert_eq!(Onset::KEYS, &["onsetDateTime", "onsetCoding"]);
}

#[test]
fn collect_mode_reports_in_declaration_order() {
    let doc = Sample {
        resource_type: "Sample".to_string(),
        link: vec![Link::default()],
        ..Default::default()
    };
    let fields: Vec<String> = doc.violations().iter().map(|e| e.location()).collect();
    assert_eq!(fields, ["status", "format", "link[0].relation", "link[0].url"]);
}

#[test]
fn validator_locates_issues_under_resource_type() {
    let config = ValidatorConfig::builder()
        .mode(ValidationMode::Collect)
        .build();
    let outcome = Validator::new(config).validate(&Sample::empty());
    assert_eq!(outcome.error_count(), 2);
    assert_eq!(outcome.issues[0].location.as_deref(), Some("Sample.status"));
    assert_eq!(outcome.issues[1].location.as_deref(), Some("Sample.format"));
}

#[test]
fn validation_is_repeatable() {
    let doc = Sample::empty();
    assert_eq!(doc.validate(), doc.validate());
}
