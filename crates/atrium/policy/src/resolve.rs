//! Two-root path resolution
//!
//! Assertion properties and values may address the `context` or `entity`
//! object graphs with paths of the form `root:a.b.c`. Resolution is a plain
//! whitelisted walk: only those two roots exist, lookups never reflect
//! into engine internals, and a missing intermediate yields `None` rather
//! than an error. Strings without a recognized root prefix, and non-string
//! values, are literals and pass through unchanged.

use serde_json::Value;

/// Resolve an operand: paths are walked, everything else is a literal.
pub fn resolve(raw: &Value, context: &Value, entity: &Value) -> Option<Value> {
    match raw {
        Value::String(path) => resolve_path(path, context, entity),
        literal => Some(literal.clone()),
    }
}

/// Resolve a string operand against the two roots.
///
/// Returns `None` when a recognized root path misses; unrecognized strings
/// (including permission-style ids like `portal:admin:deleteGroups`) are
/// returned unchanged as literals.
pub fn resolve_path(path: &str, context: &Value, entity: &Value) -> Option<Value> {
    let (root, rest) = match path.split_once(':') {
        Some(("context", rest)) => (context, rest),
        Some(("entity", rest)) => (entity, rest),
        _ => return Some(Value::String(path.to_string())),
    };

    let mut current = root;
    for segment in rest.split('.') {
        match current {
            Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current.clone())
}
