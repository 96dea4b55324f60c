use crate::{
    ConfigError, Validate, ValidationContext, ValidationError, ValidatorConfig, ViolationKind,
};
use serde_json::Value;

/// Reusable validator - owns the configuration
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self::new(config.clone()))
    }

    /// Validates a typed document, locating issues under its type name.
    pub fn validate<T: Validate + ?Sized>(&self, document: &T) -> ValidationOutcome {
        self.validate_at(document, document.type_name())
    }

    /// Validates a typed document, locating issues under `root`
    /// (e.g. `Bundle.entry[0].resource` for an embedded resource).
    pub fn validate_at<T: Validate + ?Sized>(
        &self,
        document: &T,
        root: &str,
    ) -> ValidationOutcome {
        let resource_type = document.type_name();
        tracing::debug!(resource_type, root, mode = ?self.config.mode, "validating document");

        let mut ctx = ValidationContext::from_config(&self.config);
        // Violations are read back from the context; Err only means the walk stopped early.
        let _ = document.validate_with(&mut ctx);
        let errors = ctx.into_errors();

        tracing::debug!(resource_type, issues = errors.len(), "validation finished");

        ValidationOutcome::from_errors(Some(resource_type.to_string()), root, &errors)
    }

    pub fn validate_batch<T: Validate>(&self, documents: &[T]) -> Vec<ValidationOutcome> {
        documents.iter().map(|d| self.validate(d)).collect()
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Validation result for a single resource
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub resource_type: Option<String>,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    pub fn success(resource_type: Option<String>) -> Self {
        Self {
            resource_type,
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Outcome with a single issue that prevented typed validation.
    pub fn rejected(resource_type: Option<String>, issue: ValidationIssue) -> Self {
        let mut outcome = Self::success(resource_type);
        outcome.push(issue);
        outcome
    }

    pub fn from_errors(
        resource_type: Option<String>,
        root: &str,
        errors: &[ValidationError],
    ) -> Self {
        let issues: Vec<ValidationIssue> = errors
            .iter()
            .map(|e| ValidationIssue::from_violation(root, e))
            .collect();

        Self {
            resource_type,
            valid: issues.is_empty(),
            issues,
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        if issue.is_error() {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Folds the outcome of an embedded resource into this one.
    pub fn merge(&mut self, other: ValidationOutcome) {
        for issue in other.issues {
            self.push(issue);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.valid
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn to_operation_outcome(&self) -> Value {
        serde_json::json!({
            "resourceType": "OperationOutcome",
            "issue": self.issues.iter().map(|i| i.to_json()).collect::<Vec<_>>()
        })
    }
}

/// Individual validation issue
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub diagnostics: String,
    pub location: Option<String>,
    pub expression: Option<Vec<String>>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code,
            diagnostics,
            location: None,
            expression: None,
        }
    }

    pub fn warning(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            diagnostics,
            location: None,
            expression: None,
        }
    }

    /// Converts a violation into an issue located at `root.<path>`.
    pub fn from_violation(root: &str, error: &ValidationError) -> Self {
        let code = match error.kind() {
            ViolationKind::RequiredField | ViolationKind::MinCardinality => IssueCode::Required,
            ViolationKind::InvalidResourceType => IssueCode::Invalid,
            ViolationKind::ChoiceConflict => IssueCode::Structure,
        };
        let location = format!("{}.{}", root, error.location());

        Self::error(code, error.leaf().to_string())
            .with_location(location.clone())
            .with_expression(vec![location])
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_expression(mut self, expression: Vec<String>) -> Self {
        self.expression = Some(expression);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    fn to_json(&self) -> Value {
        let mut issue = serde_json::json!({
            "severity": self.severity.to_string().to_lowercase(),
            "code": self.code.to_string(),
            "diagnostics": self.diagnostics,
        });

        if let Some(ref loc) = self.location {
            issue["location"] = serde_json::json!([loc]);
        }

        if let Some(ref expr) = self.expression {
            issue["expression"] = serde_json::json!(expr);
        }

        issue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// Subset of the FHIR `issue-type` value set reported by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    Invalid,
    Structure,
    Required,
    NotSupported,
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Structure => "structure",
            Self::Required => "required",
            Self::NotSupported => "not-supported",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathSegment, ValidationMode};

    struct Incomplete;

    impl Validate for Incomplete {
        fn validate_with(&self, ctx: &mut ValidationContext) -> Result<(), ValidationError> {
            ctx.required("status", &String::new())?;
            ctx.min_len("format", 0, 1)?;
            Ok(())
        }

        fn type_name(&self) -> &'static str {
            "CapabilityStatement"
        }
    }

    #[test]
    fn test_validation_outcome_operations() {
        let outcome = ValidationOutcome {
            resource_type: Some("Account".to_string()),
            valid: false,
            issues: vec![
                ValidationIssue::error(IssueCode::Required, "Missing required field".to_string()),
                ValidationIssue::warning(IssueCode::NotSupported, "Unknown type".to_string()),
            ],
        };

        assert!(!outcome.valid);
        assert!(outcome.has_errors());
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(outcome.warning_count(), 1);
    }

    #[test]
    fn test_operation_outcome_conversion() {
        let outcome = ValidationOutcome {
            resource_type: Some("Account".to_string()),
            valid: false,
            issues: vec![ValidationIssue::error(
                IssueCode::Required,
                "field 'status' is required".to_string(),
            )
            .with_location("Account.status".to_string())
            .with_expression(vec!["Account.status".to_string()])],
        };

        let op_outcome = outcome.to_operation_outcome();
        assert_eq!(op_outcome["resourceType"], "OperationOutcome");
        assert_eq!(op_outcome["issue"][0]["severity"], "error");
        assert_eq!(op_outcome["issue"][0]["code"], "required");
        assert_eq!(op_outcome["issue"][0]["location"][0], "Account.status");
    }

    #[test]
    fn test_fail_fast_reports_one_issue() {
        let outcome = Validator::default().validate(&Incomplete);
        assert!(outcome.has_errors());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(
            outcome.issues[0].location.as_deref(),
            Some("CapabilityStatement.status")
        );
    }

    #[test]
    fn test_collect_reports_every_issue() {
        let config = ValidatorConfig::builder().mode(ValidationMode::Collect).build();
        let outcome = Validator::new(config).validate(&Incomplete);
        assert_eq!(outcome.error_count(), 2);
        assert_eq!(
            outcome.issues[1].diagnostics,
            "field 'format' requires at least 1 element(s), found 0"
        );
    }

    #[test]
    fn test_nested_issue_location_uses_root() {
        let err = ValidationError::RequiredField { field: "method" }
            .nested(PathSegment::field("request"))
            .nested(PathSegment::indexed("entry", 2));
        let issue = ValidationIssue::from_violation("Bundle", &err);
        assert_eq!(issue.location.as_deref(), Some("Bundle.entry[2].request.method"));
        assert_eq!(issue.diagnostics, "field 'method' is required");
        assert_eq!(issue.code, IssueCode::Required);
    }

    #[test]
    fn test_merge_keeps_validity_of_warnings() {
        let mut outcome = ValidationOutcome::success(Some("Bundle".to_string()));
        let mut embedded = ValidationOutcome::success(None);
        embedded.push(ValidationIssue::warning(
            IssueCode::NotSupported,
            "no model registered for resourceType 'Patient'".to_string(),
        ));
        outcome.merge(embedded);
        assert!(outcome.valid);
        assert_eq!(outcome.warning_count(), 1);
    }

    #[test]
    fn test_issue_codes_follow_fhir_issue_type() {
        let rendered: Vec<String> = [
            IssueCode::Invalid,
            IssueCode::Structure,
            IssueCode::Required,
            IssueCode::NotSupported,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(rendered, ["invalid", "structure", "required", "not-supported"]);

        let warning = ValidationIssue::warning(IssueCode::NotSupported, String::new());
        assert!(!warning.is_error());
        assert!(ValidationIssue::error(IssueCode::Invalid, String::new()).is_error());
    }

    #[test]
    fn test_from_config_rejects_zero_cap() {
        let config = ValidatorConfig::builder().max_issues(0).build();
        assert!(Validator::from_config(&config).is_err());
    }
}
