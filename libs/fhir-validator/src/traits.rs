//! Traits implemented by every validatable node
//!
//! Model types get these through `#[derive(Validate)]`; primitives and opaque
//! JSON payloads are leaves with nothing to check.

use crate::{ValidationContext, ValidationError};
use serde_json::Value;

/// A node of a FHIR document that can check its own structural constraints.
pub trait Validate {
    /// Walks this node and its children, reporting violations to `ctx`.
    ///
    /// Returns `Err` when `ctx` decides the walk must stop (first violation in
    /// fail-fast mode, issue cap reached in collect mode).
    fn validate_with(&self, ctx: &mut ValidationContext) -> Result<(), ValidationError>;

    /// FHIR name of this node's type, used as the root of issue locations.
    fn type_name(&self) -> &'static str;

    /// Whether the value counts as populated when the field is required.
    fn has_value(&self) -> bool {
        true
    }

    /// Fail-fast validation: the first violation in declaration order.
    fn validate(&self) -> Result<(), ValidationError> {
        let mut ctx = ValidationContext::fail_fast();
        self.validate_with(&mut ctx)
    }

    /// Every violation in declaration order.
    fn violations(&self) -> Vec<ValidationError> {
        let mut ctx = ValidationContext::collecting();
        // Collected errors are kept in the context; the result only signals a stop.
        let _ = self.validate_with(&mut ctx);
        ctx.into_errors()
    }
}

/// A top-level resource with a fixed `resourceType` discriminator.
pub trait Resource: Validate + Default {
    const RESOURCE_TYPE: &'static str;

    fn resource_type(&self) -> &str;

    /// A resource with only its discriminator set.
    fn empty() -> Self;
}

/// A FHIR `[x]` element modelled as an enum with one variant per type.
pub trait Choice: Validate {
    /// Every JSON key the group can appear under, e.g. `onsetDateTime`.
    const KEYS: &'static [&'static str];

    /// JSON key of the populated variant.
    fn key(&self) -> &'static str;
}

/// Presence test used for required fields.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Validate> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Validate::has_value)
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate_with(&self, ctx: &mut ValidationContext) -> Result<(), ValidationError> {
        (**self).validate_with(ctx)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn has_value(&self) -> bool {
        (**self).has_value()
    }
}

impl Validate for String {
    fn validate_with(&self, _ctx: &mut ValidationContext) -> Result<(), ValidationError> {
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn has_value(&self) -> bool {
        !self.is_empty()
    }
}

impl Validate for Value {
    fn validate_with(&self, _ctx: &mut ValidationContext) -> Result<(), ValidationError> {
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "Resource"
    }

    fn has_value(&self) -> bool {
        !self.is_null()
    }
}

macro_rules! leaf_validate {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate_with(&self, _ctx: &mut ValidationContext) -> Result<(), ValidationError> {
                    Ok(())
                }

                fn type_name(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

leaf_validate! {
    bool => "boolean",
    i32 => "integer",
    i64 => "integer64",
    u32 => "unsignedInt",
    u64 => "unsignedInt",
    f64 => "decimal",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_presence() {
        assert!(!String::new().is_present());
        assert!("active".to_string().is_present());
        assert!(!Some(String::new()).is_present());
        assert!(Some("x".to_string()).is_present());
        assert!(!None::<String>.is_present());
    }

    #[test]
    fn test_numbers_and_booleans_are_present_when_set() {
        assert!(Some(0u32).is_present());
        assert!(Some(false).is_present());
        assert!(!None::<bool>.is_present());
    }

    #[test]
    fn test_value_presence() {
        assert!(!Some(Value::Null).is_present());
        assert!(Some(serde_json::json!({})).is_present());
    }

    #[test]
    fn test_vec_presence() {
        assert!(!Vec::<String>::new().is_present());
        assert!(vec!["json".to_string()].is_present());
    }
}
