//! Per-entity collaboration grants
//!
//! A [`CollaborationGrant`] is runtime, mutable data persisted with the
//! entity: it grants one permission to the members of a specific group or
//! organization, overriding the static policy outcome for that entity.
//! The `(permission, collaborationId)` pair is unique within an entity's
//! grant list.

use crate::Permission;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Runtime permission override scoped to one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationGrant {
    /// Stable id of this grant, used for removal
    pub id: String,

    /// Permission being granted
    pub permission: Permission,

    /// Whether `collaboration_id` names a group or an organization
    pub collaboration_type: CollaborationType,

    /// Group or organization whose members receive the permission
    pub collaboration_id: String,
}

impl CollaborationGrant {
    pub fn new(
        permission: impl Into<Permission>,
        collaboration_type: CollaborationType,
        collaboration_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            permission: permission.into(),
            collaboration_type,
            collaboration_id: collaboration_id.into(),
        }
    }
}

/// Kind of collaboration a grant targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationType {
    Group,
    Org,
}

impl fmt::Display for CollaborationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaborationType::Group => write!(f, "group"),
            CollaborationType::Org => write!(f, "org"),
        }
    }
}
