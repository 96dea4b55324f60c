use ferrum_r5::{
    Account, Bundle, CapabilityStatement, Condition, ConditionOnset, ImagingStudy, Invoice,
    ObservationDefinition, Questionnaire, Requirements, ResearchStudy, ResearchSubject,
    ResourceRegistry, SubscriptionTopic,
};
use ferrum_validator::{
    IssueCode, IssueSeverity, Resource, Validate, ValidationError, ValidationMode, Validator,
    ValidatorConfig, ViolationKind,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::{fs::File, path::PathBuf};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture<T: DeserializeOwned>(relative: &str) -> T {
    let path = fixtures_root().join(relative);
    assert!(path.exists(), "fixture missing at {:?}", path);

    let file = File::open(&path).expect("failed to open fixture");
    serde_json::from_reader(file).expect("failed to deserialize fixture")
}

#[test]
fn parse_and_validate_account() {
    let account: Account = load_fixture("account-valid.json");

    assert_eq!(account.resource_type(), "Account");
    assert_eq!(account.status, "active");
    assert_eq!(account.subject.as_ref().map(Vec::len), Some(1));
    assert!(account.validate().is_ok());
}

#[test]
fn account_without_status_reports_required_field() {
    let account: Account = load_fixture("account-missing-status.json");

    let err = account.validate().unwrap_err();
    assert_eq!(err, ValidationError::RequiredField { field: "status" });
    assert_eq!(err.to_string(), "field 'status' is required");
}

#[test]
fn bundle_typo_fails_discriminator_check() {
    let bundle: Bundle = load_fixture("bundle-typo.json");

    let err = bundle.validate().unwrap_err();
    assert_eq!(err.kind(), ViolationKind::InvalidResourceType);
    assert_eq!(err.location(), "resourceType");
}

#[test]
fn bundle_request_method_error_is_path_annotated() {
    let bundle: Bundle = load_fixture("bundle-transaction.json");

    assert!(bundle.is_transaction());
    let err = bundle.validate().unwrap_err();
    assert!(err.is_nested());
    assert_eq!(err.location(), "entry[2].request.method");
    assert_eq!(err.to_string(), "entry[2]: request: field 'method' is required");
}

#[test]
fn capability_statement_with_empty_format() {
    let cs: CapabilityStatement = load_fixture("capability-statement-no-format.json");

    let violations = cs.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0],
        ValidationError::MinCardinality {
            field: "format",
            min: 1,
            found: 0
        }
    );
}

#[test]
fn condition_with_two_onsets_is_a_conflict() {
    let condition: Condition = load_fixture("condition-onset-conflict.json");

    assert!(matches!(condition.onset, Some(ConditionOnset::DateTime(_))));
    assert!(condition.extensions.contains_key("onsetAge"));

    let err = condition.validate().unwrap_err();
    assert_eq!(
        err,
        ValidationError::ChoiceConflict {
            field: "onset[x]",
            variants: vec!["onsetDateTime", "onsetAge"],
        }
    );
}

#[test]
fn invoice_line_item_without_charge_item() {
    let invoice: Invoice = load_fixture("invoice-missing-charge-item.json");

    let err = invoice.validate().unwrap_err();
    assert_eq!(err.location(), "lineItem[0].chargeItem[x]");
    assert_eq!(err.kind(), ViolationKind::RequiredField);
}

#[test]
fn questionnaire_nested_items() {
    let questionnaire: Questionnaire = load_fixture("questionnaire-valid.json");

    assert!(questionnaire.validate().is_ok());
    let dob = questionnaire.find_item("2.2").expect("nested item");
    assert_eq!(dob.type_, "date");
}

#[test]
fn registry_resolves_bundle_entries() {
    let bundle: serde_json::Value = load_fixture("bundle-embedded.json");
    let registry = ResourceRegistry::r5();

    let opaque = registry.validate(&bundle, &Validator::default());
    assert!(opaque.valid);
    assert!(opaque.issues.is_empty());

    let validator = Validator::new(
        ValidatorConfig::builder()
            .mode(ValidationMode::Collect)
            .resolve_embedded(true)
            .build(),
    );
    let outcome = registry.validate(&bundle, &validator);
    assert!(!outcome.valid);
    assert_eq!(outcome.error_count(), 1);

    let missing = &outcome.issues[0];
    assert_eq!(missing.code, IssueCode::Required);
    assert_eq!(
        missing.location.as_deref(),
        Some("Bundle.entry[1].resource.status")
    );

    let unknown = &outcome.issues[1];
    assert_eq!(unknown.severity, IssueSeverity::Warning);
    assert_eq!(unknown.code, IssueCode::NotSupported);

    let op = outcome.to_operation_outcome();
    assert_eq!(op["issue"][0]["expression"][0], "Bundle.entry[1].resource.status");
    assert_eq!(op["issue"][1]["severity"], "warning");
}

#[test]
fn typed_validator_matches_registry_dispatch() {
    let condition: Condition = load_fixture("condition-onset-conflict.json");
    let raw: serde_json::Value = load_fixture("condition-onset-conflict.json");

    let validator = Validator::default();
    let typed = validator.validate(&condition);
    let dispatched = ResourceRegistry::r5().validate(&raw, &validator);

    assert_eq!(typed.issues, dispatched.issues);
    assert_eq!(
        typed.issues[0].location.as_deref(),
        Some("Condition.onset[x]")
    );
}

#[test]
fn validation_is_repeatable() {
    let bundle: Bundle = load_fixture("bundle-transaction.json");
    assert_eq!(bundle.validate(), bundle.validate());
    assert_eq!(bundle.violations(), bundle.violations());

    let raw: serde_json::Value = load_fixture("bundle-embedded.json");
    let registry = ResourceRegistry::r5();
    let validator = Validator::new(
        ValidatorConfig::builder()
            .mode(ValidationMode::Collect)
            .resolve_embedded(true)
            .build(),
    );
    let first = registry.validate(&raw, &validator);
    let second = registry.validate(&raw, &validator);
    assert_eq!(first.valid, second.valid);
    assert_eq!(first.issues, second.issues);
}

fn keeps_modifier_extension<T>(resource_type: &str)
where
    T: DeserializeOwned + Serialize + Validate,
{
    let modifier = json!([{
        "url": "http://example.org/fhir/StructureDefinition/flag",
        "valueBoolean": true
    }]);
    let resource: T = serde_json::from_value(json!({
        "resourceType": resource_type,
        "modifierExtension": modifier,
    }))
    .unwrap();

    let output = serde_json::to_value(&resource).unwrap();
    assert_eq!(output["modifierExtension"], modifier, "{resource_type}");
}

#[test]
fn unmodelled_members_survive_round_trip() {
    keeps_modifier_extension::<ImagingStudy>("ImagingStudy");
    keeps_modifier_extension::<ObservationDefinition>("ObservationDefinition");
    keeps_modifier_extension::<Requirements>("Requirements");
    keeps_modifier_extension::<ResearchStudy>("ResearchStudy");
    keeps_modifier_extension::<ResearchSubject>("ResearchSubject");
    keeps_modifier_extension::<SubscriptionTopic>("SubscriptionTopic");
    keeps_modifier_extension::<Account>("Account");
}
