//! Error types for schema translation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Variant names and their serialized `snake_case` strings are part of the
/// public API and must not change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The JSON Schema input is not valid JSON.
    SchemaParseError,
    /// The OpenAPI template input is not valid JSON.
    TemplateParseError,
    /// A required object (`definitions`, `components.schemas`) is absent or not an object.
    MissingPath,
    /// Two discriminator branches share a case value and duplicates are rejected.
    DuplicateDiscriminatorCase,
    /// The merged document could not be encoded.
    SerializeError,
}

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Document {
    Schema,
    Template,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Schema => write!(f, "JSON schema"),
            Document::Template => write!(f, "OpenAPI template"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Not able to parse JSON schema: {0}")]
    SchemaParse(#[source] serde_json::Error),

    #[error("Not able to parse OpenAPI template: {0}")]
    TemplateParse(#[source] serde_json::Error),

    #[error("Bad {document}: no `{path}` object")]
    MissingPath { document: Document, path: String },

    #[error("Duplicate discriminator case at {path}: `{property}` = {value:?} appears in more than one branch")]
    DuplicateDiscriminatorCase {
        path: String,
        property: String,
        value: String,
    },

    #[error("Not able to serialize OpenAPI document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ConvertError {
    /// Returns the stable error code for this error variant.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ConvertError::SchemaParse(_) => ErrorCode::SchemaParseError,
            ConvertError::TemplateParse(_) => ErrorCode::TemplateParseError,
            ConvertError::MissingPath { .. } => ErrorCode::MissingPath,
            ConvertError::DuplicateDiscriminatorCase { .. } => {
                ErrorCode::DuplicateDiscriminatorCase
            }
            ConvertError::Serialize(_) => ErrorCode::SerializeError,
        }
    }

    /// Returns the document path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConvertError::MissingPath { path, .. } => Some(path),
            ConvertError::DuplicateDiscriminatorCase { path, .. } => Some(path),
            ConvertError::SchemaParse(_)
            | ConvertError::TemplateParse(_)
            | ConvertError::Serialize(_) => None,
        }
    }

    /// Produces a structured JSON error.
    ///
    /// Format: `{"code": "...", "message": "...", "path": "..." | null}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
            "path": self.path(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
