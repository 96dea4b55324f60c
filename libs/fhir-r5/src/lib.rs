//! FHIR R5 data models
//!
//! Strongly-typed structures for FHIR R5 resources and datatypes, each with a
//! derived [`Validate`] implementation that enforces the structural rules of
//! the R5 definitions: required elements, minimum cardinalities, the
//! `resourceType` discriminator and `[x]` choice exclusivity.
//!
//! # Module Organization
//!
//! - `datatypes`: reusable value objects (Coding, Reference, Quantity, ...)
//! - `resources`: one module per resource
//! - `operations`: operation parameter markers
//! - `registry`: `resourceType` to concrete type resolution for untyped payloads
//!
//! # Design Philosophy
//!
//! - **Extensible**: an `extensions` catch-all keeps unmodelled JSON members
//! - **Choice groups as enums**: an `[x]` element holds at most one variant
//! - **Opaque embedding**: `contained` and bundle entries stay `serde_json::Value`
//!   until a [`ResourceRegistry`] resolves them
//!
//! # Example
//!
//! ```rust
//! use ferrum_r5::Account;
//! use ferrum_validator::{Validate, ValidationError};
//! use serde_json::json;
//!
//! let account: Account = serde_json::from_value(json!({
//!     "resourceType": "Account",
//!     "name": "Patient billing"
//! }))
//! .unwrap();
//!
//! assert_eq!(
//!     account.validate(),
//!     Err(ValidationError::RequiredField { field: "status" })
//! );
//! ```

pub mod datatypes;
pub mod error;
pub mod operations;
pub mod registry;
pub mod resources;

// Re-export commonly used types
pub use datatypes::*;
pub use error::{Error, Result};
pub use registry::{DynResource, ResourceRegistry};
pub use resources::*;

pub use ferrum_validator::{Resource, Validate};
