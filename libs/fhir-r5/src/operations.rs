//! Operation parameter markers
//!
//! Placeholders for the parameter sets of FHIR operations (`$expand`,
//! `$lookup`, ...). They hold no members, so validation always succeeds.
//! They serialize as an empty JSON object.

use ferrum_validator::Validate;
use serde::{Deserialize, Serialize};

/// `$collect-data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CollectData {}

/// `$evaluate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Evaluate {}

/// `$expand`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Expand {}

/// `$graphql`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Graphql {}

/// `$lookup`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Lookup {}

/// `$subsumes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Subsumes {}

/// `$translate-id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TranslateId {}

/// `$preferred-id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PreferredId {}

/// `$current-canonical`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CurrentCanonical {}

/// `$everything`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Everything {}
