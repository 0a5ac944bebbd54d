//! Guarded assertion evaluation
//!
//! An assertion's `conditions` list is a guard, not part of the check: if
//! any condition fails, the assertion is vacuously satisfied. Only when
//! every condition passes does the main property/operator/value check run.
//!
//! A policy's assertion list is the logical AND of every guarded entry.
//! Rule tables pair complementary guards to express "A OR B" as
//! "(not A implies B) AND (not B implies A)"; the guard semantics here are
//! what makes that encoding work.

use crate::operators;
use crate::resolve::{resolve, resolve_path};
use atrium_types::{Assertion, Condition, Operator};
use serde_json::Value;

/// Evaluate one guarded assertion against the two roots.
pub fn evaluate_assertion(assertion: &Assertion, context: &Value, entity: &Value) -> bool {
    for condition in &assertion.conditions {
        if !evaluate_condition(condition, context, entity) {
            // Guard failed: the assertion does not apply to this actor.
            return true;
        }
    }
    check(
        &assertion.property,
        assertion.operator,
        &assertion.value,
        context,
        entity,
    )
}

/// Evaluate one guard condition (same shape, no nested guards).
pub fn evaluate_condition(condition: &Condition, context: &Value, entity: &Value) -> bool {
    check(
        &condition.property,
        condition.operator,
        &condition.value,
        context,
        entity,
    )
}

/// Resolve both operands and apply the operator.
///
/// An operand that fails to resolve makes the check `false`. Partially
/// hydrated data degrades to denial, never to an error.
fn check(property: &str, operator: Operator, value: &Value, context: &Value, entity: &Value) -> bool {
    let subject = resolve_path(property, context, entity);
    let comparison = resolve(value, context, entity);
    match (subject, comparison) {
        (Some(subject), Some(comparison)) => operators::apply(operator, &subject, &comparison),
        _ => false,
    }
}
