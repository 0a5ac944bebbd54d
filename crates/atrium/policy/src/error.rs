//! Error types for policy evaluation
//!
//! Only malformed registries raise errors. A denied permission is not an
//! error; it is a normal [`Decision`](crate::Decision) with a reason code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Defects in the static policy tables.
///
/// These indicate a bug in configuration and are never expected in a
/// correctly configured deployment.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigurationError {
    /// No policy is registered for the requested permission
    #[error("unknown permission: {permission}")]
    UnknownPermission { permission: String },

    /// The dependency graph loops back through this permission
    #[error("cyclic permission dependency through: {permission}")]
    CyclicDependency { permission: String },

    /// Two policies claim the same permission id
    #[error("duplicate permission id: {permission}")]
    DuplicatePermission { permission: String },

    /// A policy table failed to parse
    #[error("invalid policy table: {reason}")]
    InvalidTable { reason: String },
}

/// Result type for registry and evaluation operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
