//! Merging translated definitions into an OpenAPI template.
//!
//! The template is any JSON object with an object at `components.schemas`.
//! Translated definitions are inserted there, replacing same-named entries;
//! everything else in the template is left as it was.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::{ConvertError, Document};
use crate::report::Report;
use crate::translate_definitions;

/// A template with translated definitions merged in.
#[derive(Debug)]
pub struct Merged {
    pub document: Value,
    pub report: Report,
}

/// Parse a JSON Schema and an OpenAPI template, translate the schema's
/// `definitions` into the template's `components.schemas`, and serialize the
/// merged template.
///
/// Output keys are sorted at every level and indented by
/// `options.indent` spaces, so identical inputs give byte-identical output.
///
/// # Errors
///
/// - [`ConvertError::SchemaParse`] / [`ConvertError::TemplateParse`] if
///   either input is not valid JSON;
/// - [`ConvertError::MissingPath`] if the template has no object at
///   `components.schemas` or the schema has no object at `definitions`;
/// - [`ConvertError::DuplicateDiscriminatorCase`] under
///   [`DuplicateCasePolicy::Reject`](crate::DuplicateCasePolicy::Reject).
pub fn put_schema_into_openapi(
    schema_json: &str,
    template_json: &str,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let schema: Value = serde_json::from_str(schema_json).map_err(ConvertError::SchemaParse)?;
    let template: Value =
        serde_json::from_str(template_json).map_err(ConvertError::TemplateParse)?;

    let merged = merge_into_template(schema, template, options)?;
    to_sorted_json(merged.document, options.indent)
}

/// Value-level counterpart of [`put_schema_into_openapi`] for callers that
/// already hold parsed documents.
pub fn merge_into_template(
    schema: Value,
    mut template: Value,
    options: &ConvertOptions,
) -> Result<Merged, ConvertError> {
    let schemas = schema_container(&mut template).ok_or_else(|| ConvertError::MissingPath {
        document: Document::Template,
        path: "components.schemas".to_string(),
    })?;
    let definitions = take_definitions(schema)?;

    let translation = translate_definitions(definitions, options)?;

    // An object root stays an object through every pass.
    if let Value::Object(translated) = translation.definitions {
        for (name, definition) in translated {
            if schemas.insert(name.clone(), definition).is_some() {
                tracing::debug!(name = %name, "replaced template schema");
            }
        }
    }

    Ok(Merged {
        document: template,
        report: translation.report,
    })
}

fn schema_container(template: &mut Value) -> Option<&mut Map<String, Value>> {
    template
        .get_mut("components")?
        .get_mut("schemas")?
        .as_object_mut()
}

/// Take the `definitions` object out of a parsed schema document.
pub fn take_definitions(schema: Value) -> Result<Value, ConvertError> {
    let missing = || ConvertError::MissingPath {
        document: Document::Schema,
        path: "definitions".to_string(),
    };
    let Value::Object(mut root) = schema else {
        return Err(missing());
    };
    root.remove("definitions")
        .filter(Value::is_object)
        .ok_or_else(missing)
}

/// Serialize a value with keys sorted at every level and `indent` spaces
/// per nesting level.
pub fn to_sorted_json(value: Value, indent: usize) -> Result<String, ConvertError> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        sort_keys(value)
            .serialize(&mut ser)
            .map_err(ConvertError::Serialize)?;
    }
    String::from_utf8(buf).map_err(|e| ConvertError::Serialize(serde_json::Error::custom(e)))
}

/// Rebuild objects in key order, so output is sorted whatever map backing
/// `serde_json` was compiled with.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, val)| (key, sort_keys(val)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
