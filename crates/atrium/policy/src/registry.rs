//! Policy registry
//!
//! The registry holds one immutable [`PermissionPolicy`] per permission id,
//! loaded once at process start, from the compiled-in tables via
//! [`PolicyRegistry::with_defaults`], or from JSON configuration via
//! [`PolicyRegistry::from_json`]. No runtime mutation API is exposed beyond
//! initial registration.
//!
//! [`PolicyRegistry::validate`] checks the registry invariants up front
//! (every dependency resolves, no dependency cycles) so a misconfigured
//! deployment fails at startup instead of on first evaluation.

use crate::error::{ConfigurationError, Result};
use crate::policies;
use atrium_types::{Permission, PermissionPolicy};
use std::collections::{HashMap, HashSet};

/// Immutable lookup from permission id to its policy
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<Permission, PermissionPolicy>,
}

impl PolicyRegistry {
    /// Empty registry, for callers supplying their own tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry loaded with the platform's default rule tables
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for policy in policies::default_policies() {
            // the compiled-in tables are unique by construction; a test
            // guards this via validate()
            registry.policies.insert(policy.permission.clone(), policy);
        }
        registry
    }

    /// Registry parsed from a JSON array of policies
    pub fn from_json(tables: &str) -> Result<Self> {
        let policies: Vec<PermissionPolicy> =
            serde_json::from_str(tables).map_err(|err| ConfigurationError::InvalidTable {
                reason: err.to_string(),
            })?;

        let mut registry = Self::new();
        for policy in policies {
            registry.register(policy)?;
        }
        Ok(registry)
    }

    /// Register one policy; permission ids must be unique.
    pub fn register(&mut self, policy: PermissionPolicy) -> Result<()> {
        if self.policies.contains_key(&policy.permission) {
            return Err(ConfigurationError::DuplicatePermission {
                permission: policy.permission.to_string(),
            });
        }
        self.policies.insert(policy.permission.clone(), policy);
        Ok(())
    }

    pub fn get(&self, permission: &Permission) -> Option<&PermissionPolicy> {
        self.policies.get(permission)
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.policies.keys()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Check registry invariants: every dependency id resolves to a
    /// registered policy, and the dependency graph is acyclic.
    pub fn validate(&self) -> Result<()> {
        let mut settled = HashSet::new();
        for permission in self.policies.keys() {
            let mut path = Vec::new();
            self.walk(permission, &mut path, &mut settled)?;
        }
        Ok(())
    }

    fn walk<'a>(
        &'a self,
        permission: &'a Permission,
        path: &mut Vec<&'a Permission>,
        settled: &mut HashSet<&'a Permission>,
    ) -> Result<()> {
        if settled.contains(permission) {
            return Ok(());
        }
        if path.contains(&permission) {
            return Err(ConfigurationError::CyclicDependency {
                permission: permission.to_string(),
            });
        }
        let Some(policy) = self.policies.get(permission) else {
            return Err(ConfigurationError::UnknownPermission {
                permission: permission.to_string(),
            });
        };

        path.push(permission);
        for dependency in &policy.dependencies {
            self.walk(dependency, path, settled)?;
        }
        path.pop();
        settled.insert(permission);
        Ok(())
    }
}
