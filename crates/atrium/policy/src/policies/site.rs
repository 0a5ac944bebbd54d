//! Site domain rules
//!
//! Site creation is limited to full-fidelity deployment environments, and
//! publishing is still behind the early-access release channels.

use atrium_types::{Assertion, Operator, Permission, PermissionPolicy};
use serde_json::json;

pub fn policies() -> Vec<PermissionPolicy> {
    vec![
        PermissionPolicy::new("atrium:site:view"),
        PermissionPolicy {
            authenticated: true,
            environments: vec!["qaext".into(), "production".into()],
            services: vec!["sites".into()],
            licenses: vec!["premium".into(), "enterprise".into()],
            privileges: vec!["portal:user:createItem".into()],
            ..PermissionPolicy::new("atrium:site:create")
        },
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:site:view")],
            authenticated: true,
            entity_owner: true,
            assertions: vec![Assertion {
                property: "context:currentUser".into(),
                operator: Operator::IsGroupMember,
                value: json!("entity:contentGroupId"),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:site:edit")
        },
        // Deleting is editing plus an unprotected entity.
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:site:edit")],
            authenticated: true,
            assertions: vec![Assertion {
                property: "entity:protected".into(),
                operator: Operator::Eq,
                value: json!(false),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:site:delete")
        },
        PermissionPolicy {
            authenticated: true,
            availability: vec!["alpha".into(), "beta".into()],
            services: vec!["sites".into()],
            entity_owner: true,
            assertions: vec![Assertion {
                property: "context:currentUser".into(),
                operator: Operator::IsGroupAdmin,
                value: json!("entity:contentGroupId"),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:site:publish")
        },
    ]
}
