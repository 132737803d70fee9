//! Translate JSON Schema `definitions` into OpenAPI 3.0 component schemas.
//!
//! JSON Schema expresses tagged unions with `if`/`then`/`else`; OpenAPI 3.0
//! has no conditionals but supports `oneOf` + `discriminator`. The
//! translation runs four passes over the definitions:
//!
//! 0. `$ref` rewriting (`#/definitions/` → `#/components/schemas/`)
//! 1. nullable unions → `type` + `nullable: true`
//! 2. tag-guarded conditional `oneOf` → `oneOf` + `discriminator`
//! 3. any remaining conditional → `anyOf`/`allOf`/`not`
//!
//! [`put_schema_into_openapi`] merges the result into an OpenAPI template.
//!
//! ```
//! use jsonschema2openapi_core::{put_schema_into_openapi, ConvertOptions};
//!
//! let schema = r#"{ "definitions": { "Name": { "type": "string" } } }"#;
//! let template = r#"{ "openapi": "3.0.0", "components": { "schemas": {} } }"#;
//! let merged = put_schema_into_openapi(schema, template, &ConvertOptions::default()).unwrap();
//! assert!(merged.contains("\"Name\""));
//! ```

pub mod config;
pub mod error;
pub mod openapi;
pub mod passes;
pub mod report;
pub mod schema_utils;
pub mod shapes;

use serde_json::Value;

pub use config::{ConditionalDepth, ConvertOptions, DuplicateCasePolicy};
pub use error::{ConvertError, Document, ErrorCode};
pub use openapi::{
    merge_into_template, put_schema_into_openapi, take_definitions, to_sorted_json, Merged,
};
pub use report::{Report, Rewrite};
pub use schema_utils::build_path;

use passes::{
    p0_refs::rewrite_refs, p1_nullable::normalize_nullable,
    p2_discriminator::extract_discriminators, p3_implication::expand_conditionals,
};

/// JSON Pointer of the `definitions` object in a schema document; the root
/// of every path in a [`Report`].
pub const DEFINITIONS_PATH: &str = "#/definitions";

/// Result of translating a `definitions` object.
#[derive(Debug)]
pub struct Translation {
    /// Translated definitions, keyed by definition name.
    pub definitions: Value,
    /// Rewrites performed, in pass order.
    pub report: Report,
}

/// Run the four translation passes over a `definitions` object.
///
/// `definitions` is normally an object mapping definition names to schema
/// nodes, but any value is accepted. Shapes that match no pass pass through
/// unchanged.
pub fn translate_definitions(
    definitions: Value,
    options: &ConvertOptions,
) -> Result<Translation, ConvertError> {
    let mut report = Report::new();
    let path = DEFINITIONS_PATH;

    let schema = rewrite_refs(definitions, path, options)?.merge_into_report(&mut report);
    let schema = normalize_nullable(schema, path, options)?.merge_into_report(&mut report);
    let schema = extract_discriminators(schema, path, options)?.merge_into_report(&mut report);
    let schema = expand_conditionals(schema, path, options)?.merge_into_report(&mut report);

    tracing::debug!(
        rewrites = report.rewrites.len(),
        discriminators = report.discriminators(),
        conditionals = report.expanded_conditionals(),
        "translated definitions"
    );

    Ok(Translation {
        definitions: schema,
        report,
    })
}
