//! Pass 2: Discriminator Extraction
//!
//! Recognizes a `oneOf` whose every branch is a tag-guarded conditional
//!
//! ```json
//! "oneOf": [
//!   {
//!     "if":   { "properties": { "version": { "enum": ["v1"] } } },
//!     "then": { "$ref": "#/components/schemas/v1events.Event" },
//!     "else": { "properties": { "version": { "enum": ["v1"] } } }
//!   },
//!   ...
//! ]
//! ```
//!
//! and rewrites it as an OpenAPI discriminated union:
//!
//! ```json
//! "oneOf": [ { "$ref": "#/components/schemas/v1events.Event" }, ... ],
//! "discriminator": {
//!   "propertyName": "version",
//!   "mapping": { "v1": "#/components/schemas/v1events.Event", ... }
//! }
//! ```
//!
//! All branches must match and share one property name; otherwise the node
//! is left alone and its children are searched instead. A rewritten node is
//! not descended into. Must run before pass 3, which would otherwise expand
//! each branch as a generic conditional.

use serde_json::{json, Map, Value};

use crate::config::{ConvertOptions, DuplicateCasePolicy};
use crate::error::ConvertError;
use crate::report::Rewrite;
use crate::schema_utils::map_children;
use crate::shapes::discriminator_case;

use super::pass_result::PassResult;

/// A `oneOf` that matched the tagged-conditional pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorCandidate {
    pub property_name: String,
    /// `(case value, $ref)` pairs in branch order.
    pub cases: Vec<(String, String)>,
}

/// Match every branch of a `oneOf` array against the tagged-conditional
/// pattern. Returns `None` for non-arrays, empty arrays, any non-matching
/// branch, or branches that disagree on the property name.
pub fn discriminator_candidate(one_of: &Value) -> Option<DiscriminatorCandidate> {
    let branches = one_of.as_array()?;
    let (first, rest) = branches.split_first()?;

    let head = discriminator_case(first)?;
    let mut cases = vec![(head.value.to_string(), head.reference.to_string())];
    for branch in rest {
        let case = discriminator_case(branch)?;
        if case.property != head.property {
            return None;
        }
        cases.push((case.value.to_string(), case.reference.to_string()));
    }

    Some(DiscriminatorCandidate {
        property_name: head.property.to_string(),
        cases,
    })
}

/// Replace tagged-conditional `oneOf` arrays with OpenAPI discriminators.
pub fn extract_discriminators(
    schema: Value,
    path: &str,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut rewrites = Vec::new();
    let result = walk(schema, path, config, &mut rewrites)?;
    tracing::debug!(count = rewrites.len(), "pass 2: extracted discriminators");
    Ok(PassResult::with_rewrites(result, rewrites))
}

fn walk(
    node: Value,
    path: &str,
    config: &ConvertOptions,
    rewrites: &mut Vec<Rewrite>,
) -> Result<Value, ConvertError> {
    if let Value::Object(mut obj) = node {
        if let Some(candidate) = obj.get("oneOf").and_then(discriminator_candidate) {
            apply(&mut obj, candidate, path, config, rewrites)?;
            return Ok(Value::Object(obj));
        }
        return map_children(Value::Object(obj), path, &mut |child, child_path| {
            walk(child, child_path, config, rewrites)
        });
    }
    map_children(node, path, &mut |child, child_path| {
        walk(child, child_path, config, rewrites)
    })
}

fn apply(
    obj: &mut Map<String, Value>,
    candidate: DiscriminatorCandidate,
    path: &str,
    config: &ConvertOptions,
    rewrites: &mut Vec<Rewrite>,
) -> Result<(), ConvertError> {
    let DiscriminatorCandidate {
        property_name,
        cases,
    } = candidate;

    let mut refs = Vec::with_capacity(cases.len());
    let mut mapping = Map::new();
    for (value, reference) in &cases {
        refs.push(json!({ "$ref": reference }));
        let previous = mapping.insert(value.clone(), Value::String(reference.clone()));
        if previous.is_some() {
            match config.duplicate_cases {
                DuplicateCasePolicy::LastWins => tracing::warn!(
                    path,
                    property = %property_name,
                    case = %value,
                    "duplicate discriminator case, later branch wins"
                ),
                DuplicateCasePolicy::Reject => {
                    return Err(ConvertError::DuplicateDiscriminatorCase {
                        path: path.to_string(),
                        property: property_name,
                        value: value.clone(),
                    })
                }
            }
        }
    }

    tracing::debug!(path, property = %property_name, cases = cases.len(), "extracted discriminator");

    obj.insert("oneOf".to_string(), Value::Array(refs));
    obj.insert(
        "discriminator".to_string(),
        json!({
            "propertyName": &property_name,
            "mapping": mapping,
        }),
    );
    rewrites.push(Rewrite::DiscriminatorExtracted {
        path: path.to_string(),
        property_name,
        cases: cases.into_iter().map(|(value, _)| value).collect(),
    });
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
