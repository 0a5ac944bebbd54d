//! Declarative permission policies
//!
//! A [`PermissionPolicy`] is the static rule defining how one permission is
//! computed: prerequisite permissions, eligibility gates, and guarded
//! assertions over the context and entity object graphs. Policies are plain
//! immutable data, loaded once at startup and never mutated, so the rule
//! tables can be unit-tested independently of the evaluation logic.

use crate::Permission;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Static rule defining how a permission is computed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionPolicy {
    /// Permission this policy governs; unique key into the registry
    pub permission: Permission,

    /// Permissions that must themselves be granted (AND)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Permission>,

    /// Whether the actor must be signed in
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub authenticated: bool,

    /// Privileges the actor must hold, all of them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub privileges: Vec<String>,

    /// License tiers under which the permission is available
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<String>,

    /// Deployment environments in which the permission is available
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,

    /// Release-availability channels in which the permission is available
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<String>,

    /// Services that must all be enabled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    /// Whether owning the target entity grants the permission outright
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub entity_owner: bool,

    /// Guarded assertions; the list is the logical AND of every entry
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
}

impl PermissionPolicy {
    pub fn new(permission: impl Into<Permission>) -> Self {
        Self {
            permission: permission.into(),
            ..Self::default()
        }
    }
}

/// A property/operator/value check, optionally guarded by conditions.
///
/// When `conditions` is non-empty it acts as a guard: if any condition
/// fails, the assertion is vacuously satisfied. Two complementary guarded
/// assertions jointly encode an OR of implications: "(not A implies B)
/// AND (not B implies A)" is "A OR B". The policy shape has no OR primitive; rule
/// tables rely on this pairing and it must not be collapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    /// Path to the subject under test (`context:...` or `entity:...`)
    pub property: String,

    /// Operator applied to `(property, value)`
    #[serde(rename = "type")]
    pub operator: Operator,

    /// Comparison operand: a path, or any literal
    pub value: Value,

    /// Guard conditions; empty means the assertion always applies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// A guard on an assertion, same shape minus nesting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub property: String,

    #[serde(rename = "type")]
    pub operator: Operator,

    pub value: Value,
}

/// Closed catalog of comparison/relationship predicates.
///
/// Every assertion names one of these; an exhaustive match in the engine
/// guarantees each operator is implemented and makes typos compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    /// Strict equality of subject and comparison
    Eq,
    /// Array subject contains every comparison element; scalar subject is a
    /// member of the comparison array
    Contains,
    /// Subject and comparison arrays share at least one element
    ContainsSome,
    /// Scalar subject is a member of the comparison array
    IncludedIn,
    /// Subject and comparison arrays share no elements
    Without,
    /// Subject length is strictly below the comparison number
    LengthLt,
    /// Subject user is an owner-or-admin member of the comparison group
    IsGroupAdmin,
    IsNotGroupAdmin,
    /// Subject user is a member (any tier) of the comparison group
    IsGroupMember,
    IsNotGroupMember,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Eq => "eq",
            Operator::Contains => "contains",
            Operator::ContainsSome => "contains-some",
            Operator::IncludedIn => "included-in",
            Operator::Without => "without",
            Operator::LengthLt => "length-lt",
            Operator::IsGroupAdmin => "is-group-admin",
            Operator::IsNotGroupAdmin => "is-not-group-admin",
            Operator::IsGroupMember => "is-group-member",
            Operator::IsNotGroupMember => "is-not-group-member",
        };
        write!(f, "{name}")
    }
}
