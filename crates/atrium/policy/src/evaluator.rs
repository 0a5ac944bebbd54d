//! Permission evaluator
//!
//! [`PermissionEvaluator::check`] runs the ordered, fail-fast pipeline for
//! one permission: registry lookup, prerequisite permissions, eligibility
//! gates, the entity-owner shortcut, guarded assertions, and finally the
//! per-entity collaboration-grant override. Only configuration defects
//! (unknown permission, cyclic dependency) are errors; every other outcome
//! is a normal [`Decision`].
//!
//! Evaluation is pure and synchronous. Dependency results are memoized per
//! top-level `check` call only; different calls may carry different
//! context/entity data, so nothing is cached across them.

use crate::assertion::evaluate_assertion;
use crate::decision::{codes, Decision};
use crate::error::{ConfigurationError, Result};
use crate::grants;
use crate::registry::PolicyRegistry;
use atrium_types::{CollaborationType, Permission, PermissionContext, PermissionPolicy};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Evaluates permissions against a loaded [`PolicyRegistry`]
#[derive(Debug, Clone, Default)]
pub struct PermissionEvaluator {
    registry: PolicyRegistry,
}

/// Per-call evaluation state: the active recursion path for cycle
/// detection, and the memo of already-settled permissions.
#[derive(Default)]
struct EvalState {
    path: Vec<Permission>,
    settled: HashMap<Permission, Decision>,
}

impl PermissionEvaluator {
    pub fn new(registry: PolicyRegistry) -> Self {
        Self { registry }
    }

    /// Evaluator over the platform's default rule tables
    pub fn with_defaults() -> Self {
        Self::new(PolicyRegistry::with_defaults())
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Decide whether the actor in `context` holds `permission` on `entity`.
    ///
    /// `context` and `entity` must be fully hydrated; the engine performs
    /// no I/O and mutates neither.
    pub fn check(
        &self,
        permission: &Permission,
        context: &PermissionContext,
        entity: &Value,
    ) -> Result<Decision> {
        let actor = context
            .current_user
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("anonymous");
        debug!(%permission, actor, "evaluating permission");

        let context_value = context.to_value();
        let mut state = EvalState::default();
        let decision = self.check_inner(permission, context, &context_value, entity, &mut state)?;

        if !decision.is_granted() {
            debug!(%permission, actor, code = %decision.code, "permission denied");
        }
        Ok(decision)
    }

    fn check_inner(
        &self,
        permission: &Permission,
        context: &PermissionContext,
        context_value: &Value,
        entity: &Value,
        state: &mut EvalState,
    ) -> Result<Decision> {
        if let Some(settled) = state.settled.get(permission) {
            return Ok(settled.clone());
        }
        if state.path.contains(permission) {
            return Err(ConfigurationError::CyclicDependency {
                permission: permission.to_string(),
            });
        }
        let policy = self.registry.get(permission).ok_or_else(|| {
            ConfigurationError::UnknownPermission {
                permission: permission.to_string(),
            }
        })?;

        state.path.push(permission.clone());
        let result = self.evaluate_policy(policy, context, context_value, entity, state);
        state.path.pop();

        let decision = result?;
        state.settled.insert(permission.clone(), decision.clone());
        Ok(decision)
    }

    fn evaluate_policy(
        &self,
        policy: &PermissionPolicy,
        context: &PermissionContext,
        context_value: &Value,
        entity: &Value,
        state: &mut EvalState,
    ) -> Result<Decision> {
        // Prerequisites, AND-combined, first failure wins. A failed
        // prerequisite is final: the grant override below cannot rescue it.
        for dependency in &policy.dependencies {
            let upstream = self.check_inner(dependency, context, context_value, entity, state)?;
            if !upstream.is_granted() {
                return Ok(Decision::denied_with(
                    codes::dependency(dependency),
                    format!("prerequisite {dependency} denied ({})", upstream.code),
                ));
            }
        }

        let direct = self.direct_outcome(policy, context, context_value, entity);
        if direct.is_granted() {
            return Ok(direct);
        }

        // A collaboration grant on the entity ORs with the direct outcome.
        // Gates are not re-evaluated on this path.
        if self.has_matching_grant(&policy.permission, context, entity) {
            return Ok(Decision::granted_as(codes::COLLABORATION));
        }
        Ok(direct)
    }

    /// Gates, ownership shortcut, then assertions.
    fn direct_outcome(
        &self,
        policy: &PermissionPolicy,
        context: &PermissionContext,
        context_value: &Value,
        entity: &Value,
    ) -> Decision {
        if let Some(denied) = self.check_gates(policy, context) {
            return denied;
        }

        if policy.entity_owner && is_owner(context, entity) {
            return Decision::granted_as(codes::ENTITY_OWNER);
        }

        for assertion in &policy.assertions {
            if !evaluate_assertion(assertion, context_value, entity) {
                return Decision::denied_with(
                    codes::ASSERTION,
                    format!(
                        "assertion failed: {} {} {}",
                        assertion.property, assertion.operator, assertion.value
                    ),
                );
            }
        }

        Decision::granted()
    }

    /// Eligibility gates, each all-or-nothing, first failure wins.
    fn check_gates(
        &self,
        policy: &PermissionPolicy,
        context: &PermissionContext,
    ) -> Option<Decision> {
        if !policy.environments.is_empty() && !policy.environments.contains(&context.environment) {
            return Some(Decision::denied_with(
                codes::ENVIRONMENT,
                format!(
                    "environment {} is not one of {:?}",
                    context.environment, policy.environments
                ),
            ));
        }

        if !policy.availability.is_empty() && !policy.availability.contains(&context.availability) {
            return Some(Decision::denied_with(
                codes::AVAILABILITY,
                format!(
                    "release channel {} is not one of {:?}",
                    context.availability, policy.availability
                ),
            ));
        }

        for service in &policy.services {
            if !context.services.contains(service) {
                return Some(Decision::denied_with(
                    codes::SERVICE,
                    format!("service {service} is not enabled"),
                ));
            }
        }

        if !policy.licenses.is_empty() && !policy.licenses.contains(&context.license) {
            return Some(Decision::denied_with(
                codes::LICENSE,
                format!(
                    "license {} is not one of {:?}",
                    context.license, policy.licenses
                ),
            ));
        }

        if !policy.privileges.is_empty() {
            let held = context
                .current_user
                .as_ref()
                .map(|user| user.privileges.as_slice())
                .unwrap_or(&[]);
            if let Some(missing) = policy.privileges.iter().find(|p| !held.contains(*p)) {
                return Some(Decision::denied_with(
                    codes::PRIVILEGE,
                    format!("privilege {missing} is not held"),
                ));
            }
        }

        if policy.authenticated && !context.authenticated() {
            return Some(Decision::denied_with(
                codes::AUTHENTICATION,
                "sign-in required",
            ));
        }

        None
    }

    /// Whether the entity carries a grant for this permission naming a
    /// group or organization the actor belongs to.
    fn has_matching_grant(
        &self,
        permission: &Permission,
        context: &PermissionContext,
        entity: &Value,
    ) -> bool {
        let Some(user) = &context.current_user else {
            return false;
        };

        grants::get_policies(entity, permission)
            .iter()
            .any(|grant| match grant.collaboration_type {
                CollaborationType::Group => user
                    .groups
                    .iter()
                    .any(|g| g.id == grant.collaboration_id && g.member_type.is_member()),
                CollaborationType::Org => {
                    user.org_id.as_deref() == Some(grant.collaboration_id.as_str())
                }
            })
    }
}

fn is_owner(context: &PermissionContext, entity: &Value) -> bool {
    let Some(user) = &context.current_user else {
        return false;
    };
    entity.get("owner").and_then(Value::as_str) == Some(user.username.as_str())
}
