//! Operator catalog
//!
//! One pure predicate per [`Operator`] variant, applied to an already
//! resolved `(subject, comparison)` pair. The match is exhaustive, so
//! adding an operator without implementing it fails to compile. Operands
//! that do not fit an operator's shape (e.g. a scalar where an array is
//! required) fail the check rather than erroring.
//!
//! The group-relationship family consults only membership data already
//! hydrated onto the subject user object; nothing here performs I/O.

use atrium_types::Operator;
use serde_json::Value;

/// Apply one operator to a resolved subject/comparison pair.
pub fn apply(operator: Operator, subject: &Value, comparison: &Value) -> bool {
    match operator {
        Operator::Eq => subject == comparison,
        Operator::Contains => contains(subject, comparison),
        Operator::ContainsSome => contains_some(subject, comparison),
        Operator::IncludedIn => included_in(subject, comparison),
        Operator::Without => without(subject, comparison),
        Operator::LengthLt => length_lt(subject, comparison),
        Operator::IsGroupAdmin => group_role(subject, comparison).is_some_and(is_admin_role),
        Operator::IsNotGroupAdmin => !group_role(subject, comparison).is_some_and(is_admin_role),
        Operator::IsGroupMember => group_role(subject, comparison).is_some_and(is_member_role),
        Operator::IsNotGroupMember => !group_role(subject, comparison).is_some_and(is_member_role),
    }
}

/// Array subject: contains every element of the comparison (comparison
/// treated as a set; a scalar comparison is a one-element set).
/// Scalar subject: is a member of the comparison array.
fn contains(subject: &Value, comparison: &Value) -> bool {
    match (subject.as_array(), comparison.as_array()) {
        (Some(haystack), Some(needles)) => needles.iter().all(|n| haystack.contains(n)),
        (Some(haystack), None) => haystack.contains(comparison),
        (None, Some(set)) => set.contains(subject),
        (None, None) => false,
    }
}

fn contains_some(subject: &Value, comparison: &Value) -> bool {
    match (subject.as_array(), comparison.as_array()) {
        (Some(a), Some(b)) => a.iter().any(|v| b.contains(v)),
        _ => false,
    }
}

fn included_in(subject: &Value, comparison: &Value) -> bool {
    comparison
        .as_array()
        .is_some_and(|set| set.contains(subject))
}

fn without(subject: &Value, comparison: &Value) -> bool {
    match (subject.as_array(), comparison.as_array()) {
        (Some(a), Some(b)) => !a.iter().any(|v| b.contains(v)),
        _ => false,
    }
}

fn length_lt(subject: &Value, comparison: &Value) -> bool {
    let length = match subject {
        Value::Array(items) => items.len(),
        Value::String(s) => s.len(),
        _ => return false,
    };
    comparison
        .as_f64()
        .is_some_and(|limit| (length as f64) < limit)
}

/// Membership tier of the subject user in the comparison group, if any.
///
/// The subject is a user object with a hydrated `groups` list; the
/// comparison must resolve to a group id string. An absent membership
/// record means the user is simply not in the group, so the negated
/// operators hold for them.
fn group_role<'a>(subject: &'a Value, comparison: &Value) -> Option<&'a str> {
    let group_id = comparison.as_str()?;
    let groups = subject.get("groups")?.as_array()?;
    groups
        .iter()
        .find(|g| g.get("id").and_then(Value::as_str) == Some(group_id))
        .and_then(|g| g.get("memberType").and_then(Value::as_str))
}

fn is_admin_role(role: &str) -> bool {
    matches!(role, "owner" | "admin")
}

fn is_member_role(role: &str) -> bool {
    matches!(role, "owner" | "admin" | "member")
}
