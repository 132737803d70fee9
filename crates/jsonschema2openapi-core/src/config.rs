//! Configuration for schema translation.

use serde::{Deserialize, Serialize};

/// How deep the material-implication pass rewrites conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionalDepth {
    /// Rewrite the outermost conditional on each path and stop there.
    /// Conditionals nested inside its branches or siblings are left as-is.
    Shallow,
    /// Rewrite every conditional in the tree, innermost first.
    Full,
}

/// What to do when two discriminator branches share a case value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateCasePolicy {
    /// The later branch's `$ref` wins in the mapping.
    LastWins,
    /// Fail the translation with `ConvertError::DuplicateDiscriminatorCase`.
    Reject,
}

/// Options for schema translation.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `ref-from`, `duplicate-cases`).
/// This naming convention is part of the public API contract for config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// `$ref` prefix to replace. Default: `#/definitions/`.
    pub ref_from: String,
    /// Replacement `$ref` prefix. Default: `#/components/schemas/`.
    pub ref_to: String,
    /// Conditional expansion depth. Default: shallow.
    pub conditionals: ConditionalDepth,
    /// Duplicate discriminator case handling. Default: last wins.
    pub duplicate_cases: DuplicateCasePolicy,
    /// Spaces per indentation level in the serialized document. Default: 1.
    pub indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            ref_from: "#/definitions/".to_string(),
            ref_to: "#/components/schemas/".to_string(),
            conditionals: ConditionalDepth::Shallow,
            duplicate_cases: DuplicateCasePolicy::LastWins,
            indent: 1,
        }
    }
}
