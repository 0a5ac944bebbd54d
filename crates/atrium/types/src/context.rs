//! Actor and session state for permission checks
//!
//! A [`PermissionContext`] captures everything the evaluation engine may
//! consult about the caller: the signed-in user (if any) with their
//! privileges and group memberships, the organization/portal configuration,
//! the enabled services, the license tier, the deployment environment, and
//! the release-availability channel.
//!
//! The context must be fully hydrated before evaluation. The engine never
//! fetches anything; a context missing data simply fails the checks that
//! need it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actor/session state consulted during permission evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionContext {
    /// Signed-in user, `None` for anonymous sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<User>,

    /// Deployment environment tag (e.g. `devext`, `qaext`, `production`)
    pub environment: String,

    /// Release-availability channel (e.g. `alpha`, `beta`, `general`)
    pub availability: String,

    /// License tier of the organization (e.g. `basic`, `premium`, `enterprise`)
    pub license: String,

    /// Services currently enabled for the organization
    pub services: Vec<String>,

    /// Organization/portal configuration, open-shaped wire data
    #[serde(skip_serializing_if = "Value::is_null")]
    pub portal: Value,
}

impl PermissionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the actor is signed in
    pub fn authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = availability.into();
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    pub fn with_portal(mut self, portal: Value) -> Self {
        self.portal = portal;
        self
    }

    /// Serialized view of the context for path resolution.
    ///
    /// Serialization of this struct cannot fail in practice; if it ever did,
    /// the null root makes every path miss and the check degrades to denial.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Signed-in user with hydrated memberships
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,

    /// Platform privileges held by the user (e.g. `portal:admin:deleteGroups`)
    pub privileges: Vec<String>,

    /// Group memberships, hydrated by the caller
    pub groups: Vec<GroupMembership>,

    /// Organization the user belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.push(privilege.into());
        self
    }

    pub fn with_group(mut self, id: impl Into<String>, member_type: MemberType) -> Self {
        self.groups.push(GroupMembership {
            id: id.into(),
            member_type,
        });
        self
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }
}

/// A user's membership in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembership {
    pub id: String,
    pub member_type: MemberType,
}

/// Membership tier within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Owner,
    Admin,
    Member,
    None,
}

impl MemberType {
    /// Owners and admins can administer the group
    pub fn is_admin(&self) -> bool {
        matches!(self, MemberType::Owner | MemberType::Admin)
    }

    /// Any tier except `none` counts as membership
    pub fn is_member(&self) -> bool {
        !matches!(self, MemberType::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn anonymous_context_is_not_authenticated() {
        let context = PermissionContext::new().with_environment("production");
        assert!(!context.authenticated());
        assert!(context
            .with_user(User::new("casey"))
            .authenticated());
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let context = PermissionContext::new()
            .with_user(
                User::new("casey")
                    .with_privilege("portal:admin:deleteGroups")
                    .with_group("grp-1", MemberType::Admin)
                    .with_org("org-9"),
            )
            .with_license("premium");

        let value = context.to_value();
        assert_eq!(value["currentUser"]["username"], json!("casey"));
        assert_eq!(value["currentUser"]["orgId"], json!("org-9"));
        assert_eq!(
            value["currentUser"]["groups"][0]["memberType"],
            json!("admin")
        );
        assert_eq!(value["license"], json!("premium"));
    }

    #[test]
    fn member_type_tiers() {
        assert!(MemberType::Owner.is_admin());
        assert!(MemberType::Admin.is_admin());
        assert!(!MemberType::Member.is_admin());
        assert!(MemberType::Member.is_member());
        assert!(!MemberType::None.is_member());
    }
}
