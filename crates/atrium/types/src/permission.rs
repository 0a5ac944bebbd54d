//! Permission identifiers
//!
//! Permissions are opaque hierarchical string ids scoped by platform and
//! entity domain, e.g. `atrium:group:delete`. They are the unique key into
//! the policy registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named capability being checked against a target entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission(String);

impl Permission {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Permission {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Permission {
    fn from(id: String) -> Self {
        Self(id)
    }
}
