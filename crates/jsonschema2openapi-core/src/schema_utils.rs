//! Shared schema utilities for consistent traversal and path construction.
//!
//! Provides two concerns used across all translation passes:
//! 1. **JSON Pointer escaping** (RFC 6901) for keys with `/` or `~`
//! 2. **Shared traversal** that rebuilds every child of a value
//!
//! Unlike a validator, the passes here do not restrict themselves to
//! schema-bearing keywords: a definition name, a property name or an
//! `example` payload are all visited, so a pattern is found wherever it
//! appears in the tree.

use std::borrow::Cow;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// JSON Pointer escaping (RFC 6901)
// ---------------------------------------------------------------------------

/// Escape a single path segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a JSON Pointer path by appending segments to a parent path.
///
/// Each segment is escaped per RFC 6901 before joining.
///
/// # Example
/// ```
/// use jsonschema2openapi_core::build_path;
/// assert_eq!(build_path("#/definitions", &["a/b", "oneOf"]), "#/definitions/a~1b/oneOf");
/// ```
pub fn build_path(parent: &str, segments: &[&str]) -> String {
    let mut path = parent.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&escape_pointer_segment(segment));
    }
    path
}

// ---------------------------------------------------------------------------
// Shared traversal
// ---------------------------------------------------------------------------

/// Rebuild a value by applying `walk_fn` to each of its direct children.
///
/// Objects are rebuilt key-wise and arrays element-wise; scalars are
/// returned unchanged. `walk_fn` receives the child and its JSON Pointer.
/// The value itself is not passed to `walk_fn`, so a pass decides at each
/// node whether to rewrite it or descend.
pub fn map_children<F, E>(value: Value, path: &str, walk_fn: &mut F) -> Result<Value, E>
where
    F: FnMut(Value, &str) -> Result<Value, E>,
{
    match value {
        Value::Object(obj) => Ok(Value::Object(map_entries(obj, path, walk_fn)?)),
        Value::Array(items) => {
            let mut walked = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let child_path = build_path(path, &[&i.to_string()]);
                walked.push(walk_fn(item, &child_path)?);
            }
            Ok(Value::Array(walked))
        }
        other => Ok(other),
    }
}

/// Object half of [`map_children`], for passes that already hold the map.
pub fn map_entries<F, E>(
    obj: Map<String, Value>,
    path: &str,
    walk_fn: &mut F,
) -> Result<Map<String, Value>, E>
where
    F: FnMut(Value, &str) -> Result<Value, E>,
{
    let mut new_obj = Map::new();
    for (key, val) in obj {
        let child_path = build_path(path, &[&key]);
        let walked = walk_fn(val, &child_path)?;
        new_obj.insert(key, walked);
    }
    Ok(new_obj)
}

// ===========================================================================
// Tests
// ===========================================================================
