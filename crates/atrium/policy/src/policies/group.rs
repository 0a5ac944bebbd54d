//! Group domain rules

use atrium_types::{Assertion, Condition, Operator, Permission, PermissionPolicy};
use serde_json::json;

/// Maximum groups a single user may create
const GROUP_QUOTA: u64 = 512;

pub fn policies() -> Vec<PermissionPolicy> {
    vec![
        PermissionPolicy::new("atrium:group:view"),
        PermissionPolicy {
            authenticated: true,
            privileges: vec!["portal:user:createGroup".into()],
            assertions: vec![Assertion {
                property: "context:currentUser.groups".into(),
                operator: Operator::LengthLt,
                value: json!(GROUP_QUOTA),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:group:create")
        },
        PermissionPolicy {
            authenticated: true,
            assertions: vec![
                Assertion {
                    property: "entity:membershipAccess".into(),
                    operator: Operator::IncludedIn,
                    value: json!(["anyone", "org"]),
                    conditions: vec![],
                },
                Assertion {
                    property: "context:currentUser".into(),
                    operator: Operator::IsNotGroupMember,
                    value: json!("entity:id"),
                    conditions: vec![],
                },
            ],
            ..PermissionPolicy::new("atrium:group:join")
        },
        PermissionPolicy {
            authenticated: true,
            assertions: vec![Assertion {
                property: "context:currentUser.privileges".into(),
                operator: Operator::ContainsSome,
                value: json!(["portal:admin:assignToGroups", "portal:user:inviteToGroup"]),
                conditions: vec![],
            }],
            ..PermissionPolicy::new("atrium:group:invite")
        },
        // Paired guards: plain members need the update privilege, and
        // actors without the privilege must administer the group.
        // Net effect: "group admin OR update privilege".
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:group:view")],
            authenticated: true,
            assertions: vec![
                Assertion {
                    property: "context:currentUser.privileges".into(),
                    operator: Operator::Contains,
                    value: json!(["portal:admin:updateGroups"]),
                    conditions: vec![Condition {
                        property: "entity:userMembership.memberType".into(),
                        operator: Operator::IncludedIn,
                        value: json!(["member", "none"]),
                    }],
                },
                Assertion {
                    property: "context:currentUser".into(),
                    operator: Operator::IsGroupAdmin,
                    value: json!("entity:id"),
                    conditions: vec![Condition {
                        property: "context:currentUser.privileges".into(),
                        operator: Operator::Without,
                        value: json!(["portal:admin:updateGroups"]),
                    }],
                },
            ],
            ..PermissionPolicy::new("atrium:group:edit")
        },
        // Same pairing with the delete privilege.
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:group:view")],
            authenticated: true,
            assertions: vec![
                Assertion {
                    property: "context:currentUser.privileges".into(),
                    operator: Operator::Contains,
                    value: json!(["portal:admin:deleteGroups"]),
                    conditions: vec![Condition {
                        property: "entity:userMembership.memberType".into(),
                        operator: Operator::IncludedIn,
                        value: json!(["member", "none"]),
                    }],
                },
                Assertion {
                    property: "context:currentUser".into(),
                    operator: Operator::IsGroupAdmin,
                    value: json!("entity:id"),
                    conditions: vec![Condition {
                        property: "context:currentUser.privileges".into(),
                        operator: Operator::Without,
                        value: json!(["portal:admin:deleteGroups"]),
                    }],
                },
            ],
            ..PermissionPolicy::new("atrium:group:delete")
        },
    ]
}
