//! Atrium Types - Permission model shared across the platform
//!
//! Data shapes for the permission system: permission ids, declarative
//! policies with guarded assertions, actor/session context, and per-entity
//! collaboration grants. Evaluation lives in `atrium-policy`; these types
//! carry no behavior beyond construction helpers and wire serialization.
#![deny(unsafe_code)]

pub mod context;
pub mod grant;
pub mod permission;
pub mod policy;

pub use context::{GroupMembership, MemberType, PermissionContext, User};
pub use grant::{CollaborationGrant, CollaborationType};
pub use permission::Permission;
pub use policy::{Assertion, Condition, Operator, PermissionPolicy};
