//! Atrium Policy - Permission policy evaluation engine
//!
//! Decides whether an actor holds a named permission on a target entity.
//! The decision combines, in order: prerequisite permissions (AND),
//! eligibility gates (environment, release channel, services, license,
//! privileges, authentication), the entity-owner shortcut, guarded
//! assertions over the `context`/`entity` object graphs, and per-entity
//! collaboration grants that can override a denial.
//!
//! ```text
//! PermissionEvaluator::check(permission, context, entity)
//!     ├─ PolicyRegistry          static rule tables, loaded at startup
//!     ├─ dependency walk         recursive check(), cycle-safe, per-call memo
//!     ├─ gates                   typed checks against PermissionContext
//!     ├─ assertions              resolve paths → operator catalog
//!     └─ grant override          entity's collaboration grants
//! ```
//!
//! The engine is a pure, synchronous decision function: no I/O, no shared
//! mutable state, nothing cached across calls. Callers hydrate `context`
//! and `entity` up front and act on the returned [`Decision`] themselves;
//! this crate decides, it does not enforce.
#![deny(unsafe_code)]

pub mod assertion;
pub mod decision;
pub mod error;
pub mod evaluator;
pub mod grants;
pub mod operators;
pub mod policies;
pub mod registry;
pub mod resolve;

pub use decision::{codes, Decision};
pub use error::{ConfigurationError, Result};
pub use evaluator::PermissionEvaluator;
pub use grants::{add_policy, get_policies, remove_policy};
pub use registry::PolicyRegistry;

// The data model is re-exported so most callers need only this crate.
pub use atrium_types::{
    Assertion, CollaborationGrant, CollaborationType, Condition, GroupMembership, MemberType,
    Operator, Permission, PermissionContext, PermissionPolicy, User,
};
