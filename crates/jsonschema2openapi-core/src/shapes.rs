//! Shape matchers for the keyword patterns the passes rewrite.
//!
//! Each matcher is a pure predicate+extractor: it borrows a node and returns
//! `Some(..)` with the pieces a pass needs, or `None` when the node does not
//! have the shape. A mismatch is never an error.

use serde_json::{Map, Value};

/// Borrowed `if`/`then`/`else` subschemas of a conditional node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditional<'a> {
    pub if_schema: &'a Map<String, Value>,
    pub then_schema: &'a Map<String, Value>,
    pub else_schema: &'a Map<String, Value>,
}

/// Match an object carrying object-valued `if`, `then` and `else` keys.
///
/// Sibling keys are allowed. Boolean branches (`"then": true`) do not match.
pub fn as_conditional(obj: &Map<String, Value>) -> Option<Conditional<'_>> {
    Some(Conditional {
        if_schema: obj.get("if")?.as_object()?,
        then_schema: obj.get("then")?.as_object()?,
        else_schema: obj.get("else")?.as_object()?,
    })
}

/// Remove and return the `if`, `then` and `else` subschemas of a
/// conditional node, leaving its siblings in place.
///
/// Returns `None` (and leaves `obj` untouched) if `obj` is not conditional.
pub fn take_conditional(obj: &mut Map<String, Value>) -> Option<(Value, Value, Value)> {
    as_conditional(obj)?;
    Some((obj.remove("if")?, obj.remove("then")?, obj.remove("else")?))
}

/// A `{properties: {P: {enum: [V]}}}` tag test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCase<'a> {
    pub property: &'a str,
    pub value: &'a str,
}

/// Match `{ "properties": { "P": { "enum": [ "V" ] } } }`.
///
/// `properties` must hold exactly one key and the enum exactly one string.
/// Keys next to `properties` (or next to `enum`) are ignored.
pub fn singleton_enum_case(schema: &Map<String, Value>) -> Option<TagCase<'_>> {
    let properties = schema.get("properties")?.as_object()?;
    if properties.len() != 1 {
        return None;
    }
    let (property, constraint) = properties.iter().next()?;
    match constraint.as_object()?.get("enum")?.as_array()?.as_slice() {
        [Value::String(value)] => Some(TagCase { property, value }),
        _ => None,
    }
}

/// Match an object whose only key is a string `$ref`; returns the target.
pub fn bare_ref(schema: &Map<String, Value>) -> Option<&str> {
    if schema.len() != 1 {
        return None;
    }
    schema.get("$ref")?.as_str()
}

/// Match `[{"type": T}, {"type": "null"}]` in either order.
///
/// Each branch must carry nothing but a string `type`, and exactly one of
/// the two must be `"null"`. Returns the non-null type.
pub fn nullable_union(one_of: &Value) -> Option<&str> {
    let [first, second] = one_of.as_array()?.as_slice() else {
        return None;
    };
    match (sole_type(first)?, sole_type(second)?) {
        ("null", "null") => None,
        ("null", other) | (other, "null") => Some(other),
        _ => None,
    }
}

fn sole_type(branch: &Value) -> Option<&str> {
    let obj = branch.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    obj.get("type")?.as_str()
}

/// One branch of a discriminated `oneOf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscriminatorCase<'a> {
    pub property: &'a str,
    pub value: &'a str,
    pub reference: &'a str,
}

/// Match a `oneOf` branch of the form
///
/// ```json
/// {
///   "if":   { "properties": { "P": { "enum": ["V"] } } },
///   "then": { "$ref": "R" },
///   "else": { "properties": { "P": { "enum": ["V"] } } }
/// }
/// ```
///
/// `else` must be structurally equal to `if`, so the branch always fails
/// unless the tag matches.
pub fn discriminator_case(branch: &Value) -> Option<DiscriminatorCase<'_>> {
    let cond = as_conditional(branch.as_object()?)?;
    let tag = singleton_enum_case(cond.if_schema)?;
    if cond.if_schema != cond.else_schema {
        return None;
    }
    Some(DiscriminatorCase {
        property: tag.property,
        value: tag.value,
        reference: bare_ref(cond.then_schema)?,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
