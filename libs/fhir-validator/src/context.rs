//! Per-call validation state
//!
//! A [`ValidationContext`] carries the current path and the violations found
//! so far. Generated `Validate` impls call its check methods in declaration
//! order and propagate `Err` with `?`, which is how fail-fast stops the walk.

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    Choice, PathSegment, Presence, Validate, ValidationError, ValidationMode, ValidatorConfig,
};

pub struct ValidationContext {
    mode: ValidationMode,
    max_issues: usize,
    path: Vec<PathSegment>,
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    pub fn new(mode: ValidationMode, max_issues: usize) -> Self {
        Self {
            mode,
            max_issues: max_issues.max(1),
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn fail_fast() -> Self {
        Self::new(ValidationMode::FailFast, 1)
    }

    pub fn collecting() -> Self {
        Self::new(ValidationMode::Collect, usize::MAX)
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.mode, config.max_issues)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Records a violation at the current path.
    ///
    /// Returns `Err` when the walk must stop: always in fail-fast mode, and in
    /// collect mode once `max_issues` violations are recorded.
    pub fn report(&mut self, violation: ValidationError) -> Result<(), ValidationError> {
        let error = self
            .path
            .iter()
            .rev()
            .fold(violation, |inner, segment| inner.nested(*segment));

        tracing::trace!(location = %error.location(), error = %error.leaf(), "constraint violated");
        self.errors.push(error.clone());

        match self.mode {
            ValidationMode::FailFast => Err(error),
            ValidationMode::Collect if self.errors.len() >= self.max_issues => Err(error),
            ValidationMode::Collect => Ok(()),
        }
    }

    /// Checks the `resourceType` discriminator.
    pub fn resource_type(
        &mut self,
        expected: &'static str,
        actual: &str,
    ) -> Result<(), ValidationError> {
        if actual == expected {
            return Ok(());
        }
        self.report(ValidationError::InvalidResourceType {
            expected,
            actual: actual.to_string(),
        })
    }

    pub fn required<T: Presence + ?Sized>(
        &mut self,
        field: &'static str,
        value: &T,
    ) -> Result<(), ValidationError> {
        if value.is_present() {
            return Ok(());
        }
        self.report(ValidationError::RequiredField { field })
    }

    /// Required check for a non-optional child, based on [`Validate::has_value`].
    pub fn required_value<T: Validate + ?Sized>(
        &mut self,
        field: &'static str,
        value: &T,
    ) -> Result<(), ValidationError> {
        if value.has_value() {
            return Ok(());
        }
        self.report(ValidationError::RequiredField { field })
    }

    pub fn min_len(
        &mut self,
        field: &'static str,
        found: usize,
        min: usize,
    ) -> Result<(), ValidationError> {
        if found >= min {
            return Ok(());
        }
        self.report(ValidationError::MinCardinality { field, min, found })
    }

    /// Validates a single child under `name`.
    pub fn field<T: Validate + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), ValidationError> {
        self.path.push(PathSegment::field(name));
        let result = value.validate_with(self);
        self.path.pop();
        result
    }

    /// Validates list elements in order under `name[index]`.
    pub fn each<T: Validate>(
        &mut self,
        name: &'static str,
        items: &[T],
    ) -> Result<(), ValidationError> {
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::indexed(name, index));
            let result = item.validate_with(self);
            self.path.pop();
            result?;
        }
        Ok(())
    }

    /// Checks a choice group: exclusivity, then presence, then the payload.
    ///
    /// `extra` is the node's catch-all map; a group key found there means the
    /// input carried more than one variant.
    pub fn choice<C: Choice>(
        &mut self,
        field: &'static str,
        value: Option<&C>,
        extra: &HashMap<String, Value>,
        required: bool,
    ) -> Result<(), ValidationError> {
        let mut variants: Vec<&'static str> = value.map(Choice::key).into_iter().collect();
        variants.extend(
            C::KEYS
                .iter()
                .copied()
                .filter(|key| extra.contains_key(*key)),
        );

        if variants.len() > 1 {
            self.report(ValidationError::ChoiceConflict { field, variants })?;
        }

        match value {
            Some(value) => self.field(value.key(), value),
            None if required => self.report(ValidationError::RequiredField { field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViolationKind;

    #[test]
    fn test_fail_fast_stops_on_first_violation() {
        let mut ctx = ValidationContext::fail_fast();
        let err = ctx
            .required("status", &String::new())
            .expect_err("empty status must be reported");
        assert_eq!(err, ValidationError::RequiredField { field: "status" });
        assert_eq!(ctx.errors().len(), 1);
    }

    #[test]
    fn test_collect_mode_keeps_going() {
        let mut ctx = ValidationContext::collecting();
        assert!(ctx.required("status", &String::new()).is_ok());
        assert!(ctx.min_len("format", 0, 1).is_ok());
        let errors = ctx.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].kind(), ViolationKind::MinCardinality);
    }

    #[test]
    fn test_collect_mode_stops_at_cap() {
        let mut ctx = ValidationContext::new(ValidationMode::Collect, 2);
        assert!(ctx.required("a", &String::new()).is_ok());
        assert!(ctx.required("b", &String::new()).is_err());
        assert_eq!(ctx.errors().len(), 2);
    }

    #[test]
    fn test_each_annotates_index() {
        struct Child;

        impl Validate for Child {
            fn validate_with(&self, ctx: &mut ValidationContext) -> Result<(), ValidationError> {
                ctx.required("method", &String::new())
            }

            fn type_name(&self) -> &'static str {
                "Child"
            }
        }

        let mut ctx = ValidationContext::fail_fast();
        let err = ctx
            .each("entry", &[Child, Child])
            .expect_err("child violation propagates");
        assert_eq!(err.location(), "entry[0].method");
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_resource_type_check() {
        let mut ctx = ValidationContext::fail_fast();
        assert!(ctx.resource_type("Bundle", "Bundle").is_ok());
        let err = ctx.resource_type("Bundle", "Bundl").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidResourceType {
                expected: "Bundle",
                actual: "Bundl".to_string()
            }
        );
    }
}
