//! Pass 1: Nullable Normalization
//!
//! OpenAPI 3.0 has no `null` type. A two-branch union of a type and `null`
//! is collapsed into the 3.0 spelling:
//!
//! ```json
//! { "oneOf": [ { "type": "string" }, { "type": "null" } ] }
//! ```
//! becomes
//! ```json
//! { "type": "string", "nullable": true }
//! ```
//!
//! Runs before discriminator extraction so a nullable union is never
//! mistaken for a (degenerate) tagged union.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::report::Rewrite;
use crate::schema_utils::{build_path, map_children};
use crate::shapes::nullable_union;

use super::pass_result::PassResult;

/// Collapse nullable `oneOf` unions throughout the tree.
pub fn normalize_nullable(
    schema: Value,
    path: &str,
    _config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut rewrites = Vec::new();
    let result = walk(schema, path, &mut rewrites)?;
    tracing::debug!(count = rewrites.len(), "pass 1: collapsed nullable unions");
    Ok(PassResult::with_rewrites(result, rewrites))
}

fn walk(node: Value, path: &str, rewrites: &mut Vec<Rewrite>) -> Result<Value, ConvertError> {
    match node {
        Value::Object(obj) => Ok(Value::Object(walk_object(obj, path, rewrites)?)),
        other => map_children(other, path, &mut |child, child_path| {
            walk(child, child_path, rewrites)
        }),
    }
}

fn walk_object(
    obj: Map<String, Value>,
    path: &str,
    rewrites: &mut Vec<Rewrite>,
) -> Result<Map<String, Value>, ConvertError> {
    let mut new_obj = Map::new();
    let mut collapsed = None;

    for (key, val) in obj {
        if key == "oneOf" {
            if let Some(nullable_type) = nullable_union(&val) {
                collapsed = Some(nullable_type.to_string());
                continue;
            }
        }
        let child_path = build_path(path, &[&key]);
        new_obj.insert(key, walk(val, &child_path, rewrites)?);
    }

    // The collapsed type replaces any `type` already on the node.
    if let Some(nullable_type) = collapsed {
        tracing::debug!(path, nullable_type = %nullable_type, "collapsed nullable union");
        new_obj.insert("type".to_string(), Value::String(nullable_type.clone()));
        new_obj.insert("nullable".to_string(), Value::Bool(true));
        rewrites.push(Rewrite::NullableCollapsed {
            path: path.to_string(),
            nullable_type,
        });
    }

    Ok(new_obj)
}

// ===========================================================================
// Tests
// ===========================================================================
