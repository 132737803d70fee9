//! Pass 3: Conditional Expansion (material implication)
//!
//! OpenAPI 3.0 has no `if`/`then`/`else`. Any conditional left after pass 2
//! is rewritten with the equivalence
//! `(IF → THEN) ∧ (¬IF → ELSE)  ≡  (IF ∧ THEN) ∨ (¬IF ∧ ELSE)`:
//!
//! ```json
//! {
//!   "anyOf": [
//!     { "allOf": [ IF, THEN ] },
//!     { "allOf": [ { "not": IF }, ELSE ] }
//!   ]
//! }
//! ```
//!
//! Siblings of the conditional are kept; an existing `anyOf` is replaced.
//!
//! With [`ConditionalDepth::Shallow`] a rewritten node is not descended
//! into, so conditionals nested in its branches or siblings survive. With
//! [`ConditionalDepth::Full`] the node's children are expanded first.

use serde_json::{json, Map, Value};

use crate::config::{ConditionalDepth, ConvertOptions};
use crate::error::ConvertError;
use crate::report::Rewrite;
use crate::schema_utils::{map_children, map_entries};
use crate::shapes::{as_conditional, take_conditional};

use super::pass_result::PassResult;

/// Expand remaining `if`/`then`/`else` nodes into `anyOf`/`allOf`/`not`.
pub fn expand_conditionals(
    schema: Value,
    path: &str,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut rewrites = Vec::new();
    let result = walk(schema, path, config, &mut rewrites)?;
    tracing::debug!(count = rewrites.len(), "pass 3: expanded conditionals");
    Ok(PassResult::with_rewrites(result, rewrites))
}

fn walk(
    node: Value,
    path: &str,
    config: &ConvertOptions,
    rewrites: &mut Vec<Rewrite>,
) -> Result<Value, ConvertError> {
    let obj = match node {
        Value::Object(obj) if as_conditional(&obj).is_some() => obj,
        other => {
            return map_children(other, path, &mut |child, child_path| {
                walk(child, child_path, config, rewrites)
            })
        }
    };

    let obj = match config.conditionals {
        ConditionalDepth::Shallow => obj,
        ConditionalDepth::Full => map_entries(obj, path, &mut |child, child_path| {
            walk(child, child_path, config, rewrites)
        })?,
    };

    Ok(Value::Object(expand(obj, path, rewrites)))
}

fn expand(mut obj: Map<String, Value>, path: &str, rewrites: &mut Vec<Rewrite>) -> Map<String, Value> {
    let Some((if_schema, then_schema, else_schema)) = take_conditional(&mut obj) else {
        return obj;
    };

    tracing::debug!(path, "expanded conditional");
    obj.insert(
        "anyOf".to_string(),
        json!([
            { "allOf": [if_schema.clone(), then_schema] },
            { "allOf": [{ "not": if_schema }, else_schema] }
        ]),
    );
    rewrites.push(Rewrite::ConditionalExpanded {
        path: path.to_string(),
    });
    obj
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(schema: Value) -> Value {
        expand_conditionals(schema, "#", &ConvertOptions::default())
            .unwrap()
            .schema
    }

    fn run_full(schema: Value) -> Value {
        let config = ConvertOptions {
            conditionals: ConditionalDepth::Full,
            ..ConvertOptions::default()
        };
        expand_conditionals(schema, "#", &config).unwrap().schema
    }

    #[test]
    fn test_simple_expansion() {
        let input = json!({
            "if": { "properties": { "kind": { "const": "a" } } },
            "then": { "required": ["a"] },
            "else": { "required": ["b"] }
        });
        let expected = json!({
            "anyOf": [
                {
                    "allOf": [
                        { "properties": { "kind": { "const": "a" } } },
                        { "required": ["a"] }
                    ]
                },
                {
                    "allOf": [
                        { "not": { "properties": { "kind": { "const": "a" } } } },
                        { "required": ["b"] }
                    ]
                }
            ]
        });
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_siblings_preserved_and_anyof_overwritten() {
        let input = json!({
            "type": "object",
            "description": "conditional",
            "anyOf": [{ "type": "string" }],
            "if": { "a": 1 },
            "then": { "b": 2 },
            "else": { "c": 3 }
        });
        let expected = json!({
            "type": "object",
            "description": "conditional",
            "anyOf": [
                { "allOf": [{ "a": 1 }, { "b": 2 }] },
                { "allOf": [{ "not": { "a": 1 } }, { "c": 3 }] }
            ]
        });
        assert_eq!(run(input), expected);
    }

    #[test]
    fn test_partial_conditional_untouched() {
        let input = json!({ "if": { "a": 1 }, "then": { "b": 2 } });
        assert_eq!(run(input.clone()), input);
    }

    #[test]
    fn test_boolean_branch_untouched() {
        let input = json!({ "if": { "a": 1 }, "then": { "b": 2 }, "else": false });
        assert_eq!(run(input.clone()), input);
    }

    #[test]
    fn test_conditionals_found_in_arrays() {
        let input = json!({
            "oneOf": [
                { "if": { "a": 1 }, "then": { "b": 2 }, "else": { "c": 3 } },
                { "type": "string" }
            ]
        });
        let result = run(input);
        assert!(result["oneOf"][0].get("if").is_none());
        assert_eq!(result["oneOf"][0]["anyOf"].as_array().unwrap().len(), 2);
        assert_eq!(result["oneOf"][1], json!({ "type": "string" }));
    }

    #[test]
    fn test_shallow_leaves_nested_conditionals() {
        let inner = json!({ "if": { "x": 1 }, "then": { "y": 2 }, "else": { "z": 3 } });
        let input = json!({
            "if": { "a": 1 },
            "then": inner.clone(),
            "else": { "c": 3 },
            "properties": { "p": inner.clone() }
        });
        let result = run(input);
        assert_eq!(result["anyOf"][0]["allOf"][1], inner);
        assert_eq!(result["properties"]["p"], inner);
    }

    #[test]
    fn test_full_expands_nested_conditionals() {
        let inner = json!({ "if": { "x": 1 }, "then": { "y": 2 }, "else": { "z": 3 } });
        let inner_expanded = json!({
            "anyOf": [
                { "allOf": [{ "x": 1 }, { "y": 2 }] },
                { "allOf": [{ "not": { "x": 1 } }, { "z": 3 }] }
            ]
        });
        let input = json!({
            "if": inner.clone(),
            "then": inner.clone(),
            "else": { "c": 3 },
            "properties": { "p": inner.clone() }
        });
        let result = run_full(input);
        assert_eq!(result["anyOf"][0]["allOf"][0], inner_expanded);
        assert_eq!(result["anyOf"][0]["allOf"][1], inner_expanded);
        assert_eq!(result["anyOf"][1]["allOf"][0]["not"], inner_expanded);
        assert_eq!(result["properties"]["p"], inner_expanded);
    }

    #[test]
    fn test_full_matches_shallow_without_nesting() {
        let input = json!({
            "Data": { "if": { "a": 1 }, "then": { "b": 2 }, "else": { "c": 3 } }
        });
        assert_eq!(run(input.clone()), run_full(input));
    }

    #[test]
    fn test_rewrites_recorded_innermost_first_in_full_mode() {
        let config = ConvertOptions {
            conditionals: ConditionalDepth::Full,
            ..ConvertOptions::default()
        };
        let input = json!({
            "if": { "a": 1 },
            "then": { "if": { "x": 1 }, "then": { "y": 2 }, "else": { "z": 3 } },
            "else": { "c": 3 }
        });
        let result = expand_conditionals(input, "#", &config).unwrap();
        let paths: Vec<&str> = result.rewrites.iter().map(Rewrite::path).collect();
        assert_eq!(paths, vec!["#/then", "#"]);
    }
}
