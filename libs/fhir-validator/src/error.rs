use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_issues must be at least 1")]
    ZeroMaxIssues,

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One step in the path from the validated root to a failing node.
///
/// Rendered as `name` or `name[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: &'static str,
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn field(name: &'static str) -> Self {
        Self { name, index: None }
    }

    pub fn indexed(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index: Some(index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => f.write_str(self.name),
        }
    }
}

/// Structural constraint violation found while walking a document.
///
/// Leaf variants describe the rule that failed on a single node. Violations
/// below the root are wrapped in [`ValidationError::Nested`] once per path
/// segment, so the leaf keeps its kind while the chain records where it
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    RequiredField { field: &'static str },

    #[error("invalid resourceType: expected '{expected}', got '{actual}'")]
    InvalidResourceType {
        expected: &'static str,
        actual: String,
    },

    #[error("field '{field}' requires at least {min} element(s), found {found}")]
    MinCardinality {
        field: &'static str,
        min: usize,
        found: usize,
    },

    #[error("field '{field}' has more than one value: {}", .variants.join(", "))]
    ChoiceConflict {
        field: &'static str,
        variants: Vec<&'static str>,
    },

    #[error("{segment}: {source}")]
    Nested {
        segment: PathSegment,
        #[source]
        source: Box<ValidationError>,
    },
}

/// The rule a [`ValidationError`] reports, independent of where it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    RequiredField,
    InvalidResourceType,
    MinCardinality,
    ChoiceConflict,
}

impl ValidationError {
    /// Wraps this error with one more path segment.
    pub fn nested(self, segment: PathSegment) -> Self {
        Self::Nested {
            segment,
            source: Box::new(self),
        }
    }

    /// The innermost error of a nested chain.
    pub fn leaf(&self) -> &ValidationError {
        let mut current = self;
        while let Self::Nested { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn kind(&self) -> ViolationKind {
        match self.leaf() {
            Self::RequiredField { .. } => ViolationKind::RequiredField,
            Self::InvalidResourceType { .. } => ViolationKind::InvalidResourceType,
            Self::MinCardinality { .. } => ViolationKind::MinCardinality,
            Self::ChoiceConflict { .. } => ViolationKind::ChoiceConflict,
            Self::Nested { .. } => unreachable!("leaf() never returns a nested error"),
        }
    }

    /// Name of the element the leaf rule applies to.
    pub fn field(&self) -> &'static str {
        match self.leaf() {
            Self::RequiredField { field }
            | Self::MinCardinality { field, .. }
            | Self::ChoiceConflict { field, .. } => field,
            Self::InvalidResourceType { .. } => "resourceType",
            Self::Nested { .. } => unreachable!("leaf() never returns a nested error"),
        }
    }

    /// Path segments from the root down to the failing node.
    pub fn path(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut current = self;
        while let Self::Nested { segment, source } = current {
            segments.push(*segment);
            current = source;
        }
        segments
    }

    /// Dotted location of the failing element, e.g. `entry[2].request.method`.
    pub fn location(&self) -> String {
        let mut location = String::new();
        for segment in self.path() {
            location.push_str(&segment.to_string());
            location.push('.');
        }
        location.push_str(self.field());
        location
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_missing() -> ValidationError {
        ValidationError::RequiredField { field: "method" }
            .nested(PathSegment::field("request"))
            .nested(PathSegment::indexed("entry", 2))
    }

    #[test]
    fn test_nested_display_is_a_chain() {
        assert_eq!(
            method_missing().to_string(),
            "entry[2]: request: field 'method' is required"
        );
    }

    #[test]
    fn test_location_joins_segments_and_field() {
        let err = method_missing();
        assert_eq!(err.location(), "entry[2].request.method");
        assert_eq!(
            err.path(),
            vec![PathSegment::indexed("entry", 2), PathSegment::field("request")]
        );
    }

    #[test]
    fn test_kind_survives_nesting() {
        let err = method_missing();
        assert!(err.is_nested());
        assert_eq!(err.kind(), ViolationKind::RequiredField);
        assert_eq!(err.leaf(), &ValidationError::RequiredField { field: "method" });
    }

    #[test]
    fn test_resource_type_location() {
        let err = ValidationError::InvalidResourceType {
            expected: "Bundle",
            actual: "Bundl".to_string(),
        };
        assert_eq!(err.location(), "resourceType");
        assert_eq!(
            err.to_string(),
            "invalid resourceType: expected 'Bundle', got 'Bundl'"
        );
    }

    #[test]
    fn test_choice_conflict_message() {
        let err = ValidationError::ChoiceConflict {
            field: "onset[x]",
            variants: vec!["onsetAge", "onsetString"],
        };
        assert_eq!(
            err.to_string(),
            "field 'onset[x]' has more than one value: onsetAge, onsetString"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = method_missing();
        let source = err.source().expect("nested error has a source");
        assert_eq!(source.to_string(), "request: field 'method' is required");
    }
}
