//! Evaluation outcomes
//!
//! Every check produces a [`Decision`] with a stable reason code naming the
//! gate, dependency, or assertion that settled it. Codes are intended for
//! UI messaging and debugging; the `message` adds human-readable detail.

use atrium_types::Permission;
use serde::{Deserialize, Serialize};

/// Stable reason codes carried by a [`Decision`]
pub mod codes {
    use atrium_types::Permission;

    pub const GRANTED: &str = "granted";
    pub const ENTITY_OWNER: &str = "entity-owner";
    pub const COLLABORATION: &str = "collaboration";
    pub const ENVIRONMENT: &str = "environment";
    pub const AVAILABILITY: &str = "availability";
    pub const SERVICE: &str = "service";
    pub const LICENSE: &str = "license";
    pub const PRIVILEGE: &str = "privilege";
    pub const AUTHENTICATION: &str = "authentication";
    pub const ASSERTION: &str = "assertion";

    /// Code for a failed prerequisite permission
    pub fn dependency(permission: &Permission) -> String {
        format!("dependency:{permission}")
    }
}

/// Outcome of one permission check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub granted: bool,

    /// Which gate/dependency/assertion settled the outcome
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Decision {
    pub fn granted() -> Self {
        Self::granted_as(codes::GRANTED)
    }

    /// Grant with a specific reason code (owner shortcut, grant override)
    pub fn granted_as(code: impl Into<String>) -> Self {
        Self {
            granted: true,
            code: code.into(),
            message: None,
        }
    }

    pub fn denied(code: impl Into<String>) -> Self {
        Self {
            granted: false,
            code: code.into(),
            message: None,
        }
    }

    pub fn denied_with(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            granted: false,
            code: code.into(),
            message: Some(message.into()),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Whether this decision denied on the named dependency
    pub fn denied_dependency(&self, permission: &Permission) -> bool {
        !self.granted && self.code == codes::dependency(permission)
    }
}
