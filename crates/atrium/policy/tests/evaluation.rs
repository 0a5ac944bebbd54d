//! End-to-end evaluation scenarios against hand-built registries and the
//! shipped tables, plus property tests for the grant-list operations.

use atrium_policy::{
    add_policy, codes, remove_policy, Assertion, CollaborationGrant, CollaborationType, Condition,
    ConfigurationError, MemberType, Operator, Permission, PermissionContext, PermissionEvaluator,
    PermissionPolicy, PolicyRegistry, User,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn register_all(policies: Vec<PermissionPolicy>) -> PermissionEvaluator {
    let mut registry = PolicyRegistry::new();
    for policy in policies {
        registry.register(policy).unwrap();
    }
    registry.validate().unwrap();
    PermissionEvaluator::new(registry)
}

/// The canonical owner-or-privileged pairing: actors in the `member`/`none`
/// tiers need the delete privilege, and actors without the privilege must
/// administer the group.
fn owner_or_privileged_policy(permission: &str) -> PermissionPolicy {
    PermissionPolicy {
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
        ..PermissionPolicy::new(permission)
    }
}

fn group_entity(member_type: &str) -> Value {
    json!({
        "id": "grp-1",
        "owner": "pat",
        "userMembership": { "memberType": member_type },
    })
}

#[test]
fn identical_inputs_yield_identical_decisions() {
    let evaluator = PermissionEvaluator::with_defaults();
    let context = PermissionContext::new()
        .with_user(User::new("pat").with_group("grp-1", MemberType::Owner));
    let entity = group_entity("owner");
    let permission = Permission::new("atrium:group:delete");

    let first = evaluator.check(&permission, &context, &entity).unwrap();
    let second = evaluator.check(&permission, &context, &entity).unwrap();
    assert_eq!(first, second);
    assert!(first.is_granted());
}

#[test]
fn dependencies_combine_as_and() {
    let evaluator = register_all(vec![
        PermissionPolicy {
            privileges: vec!["priv:a".into()],
            ..PermissionPolicy::new("atrium:dep:a")
        },
        PermissionPolicy {
            privileges: vec!["priv:b".into()],
            ..PermissionPolicy::new("atrium:dep:b")
        },
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:dep:a"), Permission::new("atrium:dep:b")],
            ..PermissionPolicy::new("atrium:dep:top")
        },
    ]);
    let top = Permission::new("atrium:dep:top");
    let entity = json!({});

    let only_a = PermissionContext::new().with_user(User::new("casey").with_privilege("priv:a"));
    let decision = evaluator.check(&top, &only_a, &entity).unwrap();
    assert!(!decision.is_granted());
    assert_eq!(decision.code, "dependency:atrium:dep:b");

    let only_b = PermissionContext::new().with_user(User::new("casey").with_privilege("priv:b"));
    let decision = evaluator.check(&top, &only_b, &entity).unwrap();
    assert!(!decision.is_granted());
    assert_eq!(decision.code, "dependency:atrium:dep:a");

    let both = PermissionContext::new().with_user(
        User::new("casey")
            .with_privilege("priv:a")
            .with_privilege("priv:b"),
    );
    assert!(evaluator.check(&top, &both, &entity).unwrap().is_granted());
}

#[test]
fn failed_guard_contributes_no_denial() {
    // The lone assertion only applies to group admins; a plain member
    // passes vacuously and the permission is granted.
    let evaluator = register_all(vec![PermissionPolicy {
        assertions: vec![Assertion {
            property: "context:currentUser.privileges".into(),
            operator: Operator::Contains,
            value: json!(["portal:admin:unobtainable"]),
            conditions: vec![Condition {
                property: "entity:userMembership.memberType".into(),
                operator: Operator::IncludedIn,
                value: json!(["owner", "admin"]),
            }],
        }],
        ..PermissionPolicy::new("atrium:guarded:op")
    }]);

    let member = PermissionContext::new().with_user(User::new("casey"));
    let decision = evaluator
        .check(&Permission::new("atrium:guarded:op"), &member, &group_entity("member"))
        .unwrap();
    assert!(decision.is_granted());
}

#[test]
fn owner_or_privileged_pairing_grants_either_branch() {
    let evaluator = register_all(vec![owner_or_privileged_policy("atrium:group:remove")]);
    let permission = Permission::new("atrium:group:remove");

    // group admin, no special privilege
    let admin = PermissionContext::new()
        .with_user(User::new("pat").with_group("grp-1", MemberType::Owner));
    assert!(evaluator
        .check(&permission, &admin, &group_entity("owner"))
        .unwrap()
        .is_granted());

    // plain member holding the privilege
    let privileged = PermissionContext::new().with_user(
        User::new("sam")
            .with_privilege("portal:admin:deleteGroups")
            .with_group("grp-1", MemberType::Member),
    );
    assert!(evaluator
        .check(&permission, &privileged, &group_entity("member"))
        .unwrap()
        .is_granted());

    // neither branch
    let neither = PermissionContext::new()
        .with_user(User::new("riley").with_group("grp-1", MemberType::Member));
    let decision = evaluator
        .check(&permission, &neither, &group_entity("member"))
        .unwrap();
    assert!(!decision.is_granted());
    assert_eq!(decision.code, codes::ASSERTION);
}

#[test]
fn group_grant_overrides_an_assertion_denial() {
    let evaluator = register_all(vec![owner_or_privileged_policy("atrium:group:remove")]);
    let permission = Permission::new("atrium:group:remove");

    let outsider = PermissionContext::new()
        .with_user(User::new("riley").with_group("grp-collab", MemberType::Member));
    let mut entity = group_entity("none");
    entity["permissions"] = json!([{
        "id": "g-1",
        "permission": "atrium:group:remove",
        "collaborationType": "group",
        "collaborationId": "grp-collab",
    }]);

    let decision = evaluator.check(&permission, &outsider, &entity).unwrap();
    assert!(decision.is_granted());
    assert_eq!(decision.code, codes::COLLABORATION);

    // the same actor without the grant is denied
    let decision = evaluator
        .check(&permission, &outsider, &group_entity("none"))
        .unwrap();
    assert!(!decision.is_granted());
}

#[test]
fn org_grant_reaches_every_org_member() {
    let evaluator = register_all(vec![owner_or_privileged_policy("atrium:group:remove")]);

    let org_member = PermissionContext::new().with_user(User::new("riley").with_org("org-9"));
    let mut entity = group_entity("none");
    entity["permissions"] = json!([{
        "id": "g-1",
        "permission": "atrium:group:remove",
        "collaborationType": "org",
        "collaborationId": "org-9",
    }]);

    let decision = evaluator
        .check(&Permission::new("atrium:group:remove"), &org_member, &entity)
        .unwrap();
    assert!(decision.is_granted());
    assert_eq!(decision.code, codes::COLLABORATION);

    let other_org = PermissionContext::new().with_user(User::new("riley").with_org("org-2"));
    assert!(!evaluator
        .check(&Permission::new("atrium:group:remove"), &other_org, &entity)
        .unwrap()
        .is_granted());
}

#[test]
fn grants_never_rescue_a_failed_dependency() {
    let evaluator = register_all(vec![
        PermissionPolicy {
            privileges: vec!["portal:user:viewItems".into()],
            ..PermissionPolicy::new("atrium:base:view")
        },
        PermissionPolicy {
            dependencies: vec![Permission::new("atrium:base:view")],
            ..PermissionPolicy::new("atrium:base:edit")
        },
    ]);

    // the org grant matches this actor, but the dependency's privilege
    // gate denies first and the grant cannot repair that
    let org_member = PermissionContext::new().with_user(User::new("riley").with_org("org-9"));
    let entity = json!({
        "id": "item-1",
        "permissions": [{
            "id": "g-1",
            "permission": "atrium:base:edit",
            "collaborationType": "org",
            "collaborationId": "org-9",
        }],
    });

    let decision = evaluator
        .check(&Permission::new("atrium:base:edit"), &org_member, &entity)
        .unwrap();
    assert!(!decision.is_granted());
    assert_eq!(decision.code, "dependency:atrium:base:view");
}

#[test]
fn unknown_permission_never_returns_a_decision() {
    let evaluator = PermissionEvaluator::with_defaults();
    let err = evaluator
        .check(
            &Permission::new("no:such:permission"),
            &PermissionContext::new(),
            &json!({}),
        )
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownPermission { .. }));
}

proptest! {
    #[test]
    fn add_policy_never_duplicates_pairs(ops in prop::collection::vec((0usize..4, 0usize..4), 0..32)) {
        let mut grants: Vec<CollaborationGrant> = Vec::new();
        for (p, c) in ops {
            let grant = CollaborationGrant::new(
                format!("atrium:perm:{p}"),
                CollaborationType::Group,
                format!("grp-{c}"),
            );
            grants = add_policy(&grants, grant);
        }

        let mut pairs: Vec<(String, String)> = grants
            .iter()
            .map(|g| (g.permission.to_string(), g.collaboration_id.clone()))
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        prop_assert_eq!(pairs.len(), before);
    }

    #[test]
    fn remove_policy_of_an_absent_pair_is_identity(n in 0usize..8) {
        let grants: Vec<CollaborationGrant> = (0..n)
            .map(|i| {
                CollaborationGrant::new(
                    format!("atrium:perm:{i}"),
                    CollaborationType::Group,
                    format!("grp-{i}"),
                )
            })
            .collect();

        let removed = remove_policy(&grants, &Permission::new("atrium:perm:absent"), "no-such-id");
        prop_assert_eq!(removed, grants);
    }
}
