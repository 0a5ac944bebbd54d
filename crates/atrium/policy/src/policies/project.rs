//! Project domain rules
//!
//! Projects are org-licensed content backed by a collaboration group; the
//! whole domain sits behind the `projects` service.

use atrium_types::{Assertion, Operator, Permission, PermissionPolicy};
use serde_json::json;

pub fn policies() -> Vec<PermissionPolicy> {
    vec![
        PermissionPolicy {
            services: vec!["projects".into()],
            ..PermissionPolicy::new("atrium:project:view")
        },
        PermissionPolicy {
            authenticated: true,
            services: vec!["projects".into()],
            licenses: vec!["premium".into(), "enterprise".into()],
            privileges: vec!["portal:user:createItem".into()],
            ..PermissionPolicy::new("atrium:project:create")
        },
        // Owners edit outright; everyone else must be on the project's
        // collaboration group.
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:project:view")],
            authenticated: true,
            entity_owner: true,
            assertions: vec![Assertion {
                property: "context:currentUser".into(),
                operator: Operator::IsGroupMember,
                value: json!("entity:collaborationGroupId"),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:project:edit")
        },
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:project:view")],
            authenticated: true,
            entity_owner: true,
            assertions: vec![Assertion {
                property: "context:currentUser.privileges".into(),
                operator: Operator::Contains,
                value: json!(["portal:admin:deleteItems"]),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:project:delete")
        },
    ]
}
