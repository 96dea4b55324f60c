//! Error types for FHIR R5 models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing resourceType")]
    MissingResourceType,

    #[error("Unknown resourceType: {0}")]
    UnknownResourceType(String),

    #[error("Invalid FHIR resource: {0}")]
    InvalidResource(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
