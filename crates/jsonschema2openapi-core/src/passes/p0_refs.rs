//! Pass 0: Reference Rewriting
//!
//! Moves every `$ref` from the JSON Schema `definitions` namespace into the
//! OpenAPI `components/schemas` namespace. An object holding a `$ref` is
//! replaced by a bare `{ "$ref": ... }` — OpenAPI 3.0 ignores siblings of
//! `$ref`, so they are dropped here rather than silently ignored later.
//!
//! The replacement targets the first occurrence of the configured prefix
//! anywhere in the reference string, so refs that do not contain it pass
//! through untouched.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::report::Rewrite;
use crate::schema_utils::map_children;

use super::pass_result::PassResult;

/// Rewrite `$ref` prefixes throughout the tree.
pub fn rewrite_refs(
    schema: Value,
    path: &str,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut rewrites = Vec::new();
    let result = walk(schema, path, config, &mut rewrites)?;
    tracing::debug!(count = rewrites.len(), "pass 0: rewrote refs");
    Ok(PassResult::with_rewrites(result, rewrites))
}

fn walk(
    node: Value,
    path: &str,
    config: &ConvertOptions,
    rewrites: &mut Vec<Rewrite>,
) -> Result<Value, ConvertError> {
    match node {
        Value::Object(mut obj) => match obj.remove("$ref") {
            Some(reference) => Ok(collapse_ref(reference, obj, path, config, rewrites)),
            None => map_children(Value::Object(obj), path, &mut |child, child_path| {
                walk(child, child_path, config, rewrites)
            }),
        },
        other => map_children(other, path, &mut |child, child_path| {
            walk(child, child_path, config, rewrites)
        }),
    }
}

/// Build the bare `{ "$ref": ... }` replacement for a ref-bearing object.
///
/// `siblings` is the object minus its `$ref` key; it is discarded. A
/// non-string `$ref` is kept verbatim.
fn collapse_ref(
    reference: Value,
    siblings: Map<String, Value>,
    path: &str,
    config: &ConvertOptions,
    rewrites: &mut Vec<Rewrite>,
) -> Value {
    let rewritten = match reference {
        Value::String(from) => {
            let to = from.replacen(&config.ref_from, &config.ref_to, 1);
            tracing::debug!(path, from = %from, to = %to, "rewrote $ref");
            rewrites.push(Rewrite::RefRewritten {
                path: path.to_string(),
                from,
                to: to.clone(),
                dropped: siblings.keys().cloned().collect(),
            });
            Value::String(to)
        }
        other => other,
    };

    let mut bare = Map::new();
    bare.insert("$ref".to_string(), rewritten);
    Value::Object(bare)
}

// ===========================================================================
// Tests
// ===========================================================================
