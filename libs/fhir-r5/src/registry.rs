//! `resourceType` resolution for untyped payloads
//!
//! `contained`, bundle entry resources, bundle entry outcomes and
//! `Bundle.issues` are kept as raw JSON. A [`ResourceRegistry`] turns such a
//! payload into its concrete model type and validates it, optionally walking
//! into the payloads it embeds in turn.

use std::collections::HashMap;

use ferrum_validator::{
    IssueCode, Resource, Validate, ValidationIssue, ValidationMode, ValidationOutcome, Validator,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::resources::*;

/// A parsed resource, erased to its validation interface.
pub type DynResource = Box<dyn Validate + Send + Sync>;

type Parser = fn(Value) -> Result<DynResource>;

fn parse_typed<T>(value: Value) -> Result<DynResource>
where
    T: Resource + DeserializeOwned + Send + Sync + 'static,
{
    let resource: T = serde_json::from_value(value)?;
    Ok(Box::new(resource))
}

/// Maps `resourceType` literals to parsers for their model types.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    parsers: HashMap<&'static str, Parser>,
}

impl ResourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every resource type in this crate.
    pub fn r5() -> Self {
        let mut registry = Self::new();
        registry
            .register::<Account>()
            .register::<ActorDefinition>()
            .register::<BiologicallyDerivedProduct>()
            .register::<Bundle>()
            .register::<CanonicalResource>()
            .register::<CapabilityStatement>()
            .register::<CompartmentDefinition>()
            .register::<Composition>()
            .register::<Condition>()
            .register::<Consent>()
            .register::<DeviceDefinition>()
            .register::<DiagnosticReport>()
            .register::<EpisodeOfCare>()
            .register::<EventDefinition>()
            .register::<Evidence>()
            .register::<ExampleScenario>()
            .register::<FamilyMemberHistory>()
            .register::<ImagingStudy>()
            .register::<ImplementationGuide>()
            .register::<Invoice>()
            .register::<MessageDefinition>()
            .register::<MessageHeader>()
            .register::<ObservationDefinition>()
            .register::<Procedure>()
            .register::<Questionnaire>()
            .register::<QuestionnaireResponse>()
            .register::<RegulatedAuthorization>()
            .register::<Requirements>()
            .register::<ResearchStudy>()
            .register::<ResearchSubject>()
            .register::<RiskAssessment>()
            .register::<Specimen>()
            .register::<SpecimenDefinition>()
            .register::<SubscriptionTopic>();
        registry
    }

    /// Registers `T` under its `resourceType`, replacing any earlier parser.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Resource + DeserializeOwned + Send + Sync + 'static,
    {
        self.parsers.insert(T::RESOURCE_TYPE, parse_typed::<T>);
        self
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.parsers.contains_key(resource_type)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Registered resource types, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.parsers.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Parses a payload into the model type named by its `resourceType`.
    pub fn parse(&self, value: &Value) -> Result<DynResource> {
        let resource_type = resource_type_of(value)?;
        let parser = self
            .parsers
            .get(resource_type)
            .ok_or_else(|| Error::UnknownResourceType(resource_type.to_string()))?;
        parser(value.clone())
    }

    /// Parses a payload into the model registered for `resource_type`,
    /// whatever its own `resourceType` says. A mismatched discriminator is
    /// then reported by validation rather than by dispatch.
    pub fn parse_as(&self, resource_type: &str, value: &Value) -> Result<DynResource> {
        if !value.is_object() {
            return Err(Error::InvalidResource("expected a JSON object".to_string()));
        }
        let parser = self
            .parsers
            .get(resource_type)
            .ok_or_else(|| Error::UnknownResourceType(resource_type.to_string()))?;
        parser(value.clone())
    }

    /// Validates a payload through its model type.
    ///
    /// Issues are located under the payload's `resourceType`. With
    /// `resolve_embedded` set, contained resources and bundle payloads are
    /// validated too and their issues are located under the parent path
    /// (e.g. `Bundle.entry[0].resource.status`).
    pub fn validate(&self, value: &Value, validator: &Validator) -> ValidationOutcome {
        self.validate_node(value, validator, None, None)
    }

    /// Like [`validate`](Self::validate), but parses the top-level payload as
    /// `resource_type` whatever its own discriminator says. Embedded payloads
    /// still dispatch on their `resourceType`.
    pub fn validate_as(
        &self,
        resource_type: &str,
        value: &Value,
        validator: &Validator,
    ) -> ValidationOutcome {
        self.validate_node(value, validator, Some(resource_type), None)
    }

    /// `model` forces the parser; `None` dispatches on `resourceType`.
    /// `root` is `None` for the top-level payload and the parent path for an
    /// embedded one.
    fn validate_node(
        &self,
        value: &Value,
        validator: &Validator,
        model: Option<&str>,
        root: Option<&str>,
    ) -> ValidationOutcome {
        let resource_type = match model {
            Some(model) if value.is_object() => Ok(model),
            Some(model) => {
                let diagnostics = "expected a JSON object".to_string();
                let issue = ValidationIssue::error(IssueCode::Structure, diagnostics);
                let issue = located(issue, Some(root.unwrap_or(model)));
                return ValidationOutcome::rejected(Some(model.to_string()), issue);
            }
            None => resource_type_of(value),
        };
        let resource_type = match resource_type {
            Ok(resource_type) => resource_type,
            Err(err) => {
                let issue = ValidationIssue::error(IssueCode::Structure, err.to_string());
                return ValidationOutcome::rejected(None, located(issue, root));
            }
        };
        let known = Some(resource_type.to_string());
        let path = root.unwrap_or(resource_type).to_string();

        let Some(parser) = self.parsers.get(resource_type) else {
            let diagnostics = format!("no model registered for resourceType '{resource_type}'");
            let issue = match root {
                None => ValidationIssue::error(IssueCode::NotSupported, diagnostics),
                Some(path) => {
                    tracing::warn!(
                        resource_type,
                        path,
                        "skipping embedded resource of unknown type"
                    );
                    ValidationIssue::warning(IssueCode::NotSupported, diagnostics)
                }
            };
            return ValidationOutcome::rejected(known, located(issue, root));
        };

        let typed = match parser(value.clone()) {
            Ok(typed) => typed,
            Err(err) => {
                tracing::debug!(resource_type, error = %err, "payload does not match its model");
                let issue = ValidationIssue::error(IssueCode::Structure, err.to_string());
                return ValidationOutcome::rejected(known, located(issue, Some(&path)));
            }
        };

        let mut outcome = validator.validate_at(typed.as_ref(), &path);

        if validator.config().resolve_embedded {
            for (child_path, child) in embedded(value, resource_type, &path) {
                if validator.config().mode == ValidationMode::FailFast && outcome.has_errors() {
                    break;
                }
                tracing::debug!(path = %child_path, "resolving embedded resource");
                outcome.merge(self.validate_node(child, validator, None, Some(&child_path)));
            }
        }

        outcome
    }
}

fn resource_type_of(value: &Value) -> Result<&str> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidResource("expected a JSON object".to_string()))?;
    object
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(Error::MissingResourceType)
}

fn located(issue: ValidationIssue, root: Option<&str>) -> ValidationIssue {
    match root {
        Some(path) => issue
            .with_location(path.to_string())
            .with_expression(vec![path.to_string()]),
        None => issue,
    }
}

/// Untyped payloads carried by `value`, with their paths below `path`.
fn embedded<'a>(value: &'a Value, resource_type: &str, path: &str) -> Vec<(String, &'a Value)> {
    let mut children = Vec::new();

    if let Some(contained) = value.get("contained").and_then(Value::as_array) {
        for (index, child) in contained.iter().enumerate() {
            children.push((format!("{path}.contained[{index}]"), child));
        }
    }

    if resource_type == Bundle::RESOURCE_TYPE {
        if let Some(entries) = value.get("entry").and_then(Value::as_array) {
            for (index, entry) in entries.iter().enumerate() {
                if let Some(resource) = entry.get("resource") {
                    children.push((format!("{path}.entry[{index}].resource"), resource));
                }
                if let Some(outcome) = entry.get("response").and_then(|r| r.get("outcome")) {
                    children.push((format!("{path}.entry[{index}].response.outcome"), outcome));
                }
            }
        }
        if let Some(issues) = value.get("issues") {
            children.push((format!("{path}.issues"), issues));
        }
    }

    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_validator::{IssueSeverity, ValidatorConfig};
    use serde_json::json;

    fn resolving() -> Validator {
        Validator::new(ValidatorConfig::builder().resolve_embedded(true).build())
    }

    fn validate_default(value: Value) -> ValidationOutcome {
        ResourceRegistry::r5().validate(&value, &Validator::default())
    }

    fn bundle_with(resource: Value) -> Value {
        json!({
            "resourceType": "Bundle",
            "type": "collection",
            "entry": [{ "fullUrl": "urn:uuid:1", "resource": resource }]
        })
    }

    #[test]
    fn test_r5_registers_every_resource() {
        let registry = ResourceRegistry::r5();
        assert_eq!(registry.len(), 34);
        assert!(registry.contains("Questionnaire"));
        assert!(!registry.contains("Patient"));

        let types = registry.resource_types();
        assert_eq!(types.first(), Some(&"Account"));
        assert_eq!(types.last(), Some(&"SubscriptionTopic"));
    }

    #[test]
    fn test_parse_dispatches_on_resource_type() {
        let registry = ResourceRegistry::r5();
        let parsed = registry
            .parse(&json!({ "resourceType": "Account", "status": "active" }))
            .unwrap();
        assert_eq!(parsed.type_name(), "Account");
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_parse_errors() {
        let registry = ResourceRegistry::r5();
        assert!(matches!(
            registry.parse(&json!({ "status": "active" })),
            Err(Error::MissingResourceType)
        ));
        assert!(matches!(
            registry.parse(&json!(["Account"])),
            Err(Error::InvalidResource(_))
        ));
        assert!(matches!(
            registry.parse(&json!({ "resourceType": "Patient" })),
            Err(Error::UnknownResourceType(t)) if t == "Patient"
        ));
        assert!(matches!(
            registry.parse(&json!({ "resourceType": "Account", "status": 5 })),
            Err(Error::SerializationError(_))
        ));
    }

    #[test]
    fn test_parse_as_ignores_the_discriminator() {
        let registry = ResourceRegistry::r5();
        let typo = json!({ "resourceType": "Bundl", "type": "collection" });
        assert!(matches!(registry.parse(&typo), Err(Error::UnknownResourceType(_))));

        let parsed = registry.parse_as("Bundle", &typo).unwrap();
        let err = parsed.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid resourceType: expected 'Bundle', got 'Bundl'");
    }

    #[test]
    fn test_unknown_top_level_type_is_an_error() {
        let outcome = validate_default(json!({ "resourceType": "Patient" }));
        assert!(outcome.has_errors());
        assert_eq!(outcome.issues[0].code, IssueCode::NotSupported);
        assert_eq!(outcome.resource_type.as_deref(), Some("Patient"));
    }

    #[test]
    fn test_missing_resource_type_is_structural() {
        let outcome = validate_default(json!({ "status": "active" }));
        assert!(outcome.has_errors());
        assert_eq!(outcome.issues[0].code, IssueCode::Structure);
        assert_eq!(outcome.resource_type, None);
    }

    #[test]
    fn test_typed_issues_are_rooted_at_the_resource_type() {
        let outcome = validate_default(json!({ "resourceType": "Account" }));
        assert_eq!(outcome.issues[0].location.as_deref(), Some("Account.status"));
        assert_eq!(outcome.issues[0].code, IssueCode::Required);
    }

    #[test]
    fn test_badly_typed_choice_is_structural() {
        let outcome = validate_default(json!({
            "resourceType": "Invoice",
            "status": "issued",
            "lineItem": [{ "chargeItemReference": 42 }]
        }));
        assert!(outcome.has_errors());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].code, IssueCode::Structure);
        assert_eq!(outcome.issues[0].location.as_deref(), Some("Invoice"));
    }

    #[test]
    fn test_validate_as_resolves_embedded_payloads() {
        let mut typo = bundle_with(json!({ "resourceType": "Account" }));
        typo["resourceType"] = json!("Bundl");

        let registry = ResourceRegistry::r5();
        let validator = Validator::new(
            ValidatorConfig::builder()
                .mode(ValidationMode::Collect)
                .resolve_embedded(true)
                .build(),
        );
        let outcome = registry.validate_as("Bundle", &typo, &validator);

        let locations: Vec<_> = outcome
            .issues
            .iter()
            .filter_map(|i| i.location.as_deref())
            .collect();
        assert_eq!(
            locations,
            vec!["Bundle.resourceType", "Bundle.entry[0].resource.status"]
        );
    }

    #[test]
    fn test_validate_as_locates_parse_failures() {
        let registry = ResourceRegistry::r5();

        let outcome = registry.validate_as("Account", &json!([1, 2]), &Validator::default());
        assert_eq!(outcome.issues[0].code, IssueCode::Structure);
        assert_eq!(outcome.issues[0].location.as_deref(), Some("Account"));

        let outcome = registry.validate_as(
            "Account",
            &json!({ "resourceType": "Account", "status": 5 }),
            &Validator::default(),
        );
        assert_eq!(outcome.issues[0].code, IssueCode::Structure);
        assert_eq!(outcome.issues[0].location.as_deref(), Some("Account"));

        let outcome = registry.validate_as("Patient", &json!({}), &Validator::default());
        assert_eq!(outcome.issues[0].code, IssueCode::NotSupported);
    }

    #[test]
    fn test_embedded_resources_are_opaque_by_default() {
        let bundle = bundle_with(json!({ "resourceType": "Account" }));
        let outcome = ResourceRegistry::r5().validate(&bundle, &Validator::default());
        assert!(outcome.valid);
    }

    #[test]
    fn test_embedded_resources_resolved_when_configured() {
        let bundle = bundle_with(json!({ "resourceType": "Account" }));
        let outcome = ResourceRegistry::r5().validate(&bundle, &resolving());
        assert!(outcome.has_errors());
        assert_eq!(outcome.resource_type.as_deref(), Some("Bundle"));
        assert_eq!(
            outcome.issues[0].location.as_deref(),
            Some("Bundle.entry[0].resource.status")
        );
    }

    #[test]
    fn test_unknown_embedded_type_is_a_warning() {
        let bundle = bundle_with(json!({ "resourceType": "Patient", "id": "example" }));
        let outcome = ResourceRegistry::r5().validate(&bundle, &resolving());
        assert!(outcome.valid);
        assert_eq!(outcome.issues[0].severity, IssueSeverity::Warning);
        assert_eq!(
            outcome.issues[0].location.as_deref(),
            Some("Bundle.entry[0].resource")
        );
    }

    #[test]
    fn test_contained_resources_nest() {
        let account = json!({
            "resourceType": "Account",
            "status": "active",
            "contained": [
                { "resourceType": "Account", "status": "active" },
                {
                    "resourceType": "Account",
                    "status": "active",
                    "contained": [{ "resourceType": "ResearchSubject", "status": "active" }]
                }
            ]
        });

        let outcome = ResourceRegistry::r5().validate(&account, &resolving());
        assert_eq!(
            outcome.issues[0].location.as_deref(),
            Some("Account.contained[1].contained[0].study")
        );
    }

    #[test]
    fn test_collect_mode_gathers_issues_across_payloads() {
        let validator = Validator::new(
            ValidatorConfig::builder()
                .mode(ValidationMode::Collect)
                .resolve_embedded(true)
                .build(),
        );
        let bundle = json!({
            "resourceType": "Bundle",
            "type": "transaction-response",
            "entry": [
                { "resource": { "resourceType": "Account" } },
                {
                    "response": {
                        "status": "201 Created",
                        "outcome": { "resourceType": "OperationOutcome" }
                    }
                }
            ]
        });

        let outcome = ResourceRegistry::r5().validate(&bundle, &validator);
        let locations: Vec<_> = outcome
            .issues
            .iter()
            .filter_map(|i| i.location.as_deref())
            .collect();
        assert_eq!(
            locations,
            vec![
                "Bundle.entry[0].resource.status",
                "Bundle.entry[1].response.outcome"
            ]
        );
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(outcome.warning_count(), 1);
    }

    #[test]
    fn test_fail_fast_stops_before_embedded_when_parent_fails() {
        let bundle = json!({
            "resourceType": "Bundle",
            "entry": [{ "resource": { "resourceType": "Account" } }]
        });
        let outcome = ResourceRegistry::r5().validate(&bundle, &resolving());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].location.as_deref(), Some("Bundle.type"));
    }
}
