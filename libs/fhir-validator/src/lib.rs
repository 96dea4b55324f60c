//! Structural validation for FHIR documents
//!
//! This crate checks the constraints a FHIR resource carries independently
//! of any profile: required elements, minimum cardinalities, the
//! `resourceType` discriminator and mutually exclusive `[x]` choices.
//!
//! # Design
//!
//! - **Derived**: model types get a [`Validate`] impl from `#[derive(Validate)]`
//!   and `#[fhir(...)]` field attributes
//! - **Ordered**: checks run in field declaration order, so the first
//!   reported violation is deterministic
//! - **Located**: errors nested below the root carry their path, e.g.
//!   `entry[2].request.method`
//! - **Configurable**: fail-fast or collect mode via [`ValidatorConfig`]
//!
//! # Example
//!
//! ```rust
//! use ferrum_validator::{Validate, ValidationError};
//!
//! #[derive(Default, Validate)]
//! struct Coding {
//!     #[fhir(required)]
//!     code: String,
//! }
//!
//! let err = Coding::default().validate().unwrap_err();
//! assert_eq!(err, ValidationError::RequiredField { field: "code" });
//! ```

// Lets derive output name `::ferrum_validator` from inside this crate's tests.
extern crate self as ferrum_validator;

pub mod choice;
mod config;
mod context;
mod error;
mod traits;
mod validator;

pub use config::{Preset, ValidationMode, ValidatorConfig, ValidatorConfigBuilder};
pub use context::ValidationContext;
pub use error::{ConfigError, PathSegment, ValidationError, ViolationKind};
pub use traits::{Choice, Presence, Resource, Validate};
pub use validator::{IssueCode, IssueSeverity, ValidationIssue, ValidationOutcome, Validator};

pub use ferrum_validator_derive::Validate;
