//! Entity grant-list operations
//!
//! Collaboration grants live inside the entity's persisted state under
//! `permissions`. All operations here are copy-on-write: they return a new
//! list and never mutate their input, so callers can hold references to a
//! prior grant list while composing updates. Persisting the returned list
//! is the storage layer's concern.

use atrium_types::{CollaborationGrant, Permission};
use serde_json::Value;

/// Key of the entity field holding the serialized grant list
pub const PERMISSIONS_FIELD: &str = "permissions";

/// Grants on `entity` targeting `permission`.
///
/// Malformed entries in the persisted list are skipped rather than failing
/// the lookup; the entity is wire data from an external store.
pub fn get_policies(entity: &Value, permission: &Permission) -> Vec<CollaborationGrant> {
    let Some(entries) = entity.get(PERMISSIONS_FIELD).and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<CollaborationGrant>(entry.clone()).ok())
        .filter(|grant| &grant.permission == permission)
        .collect()
}

/// Append `grant` unless a grant with the same `(permission,
/// collaborationId)` pair already exists. Idempotent.
pub fn add_policy(
    policies: &[CollaborationGrant],
    grant: CollaborationGrant,
) -> Vec<CollaborationGrant> {
    let duplicate = policies.iter().any(|existing| {
        existing.permission == grant.permission
            && existing.collaboration_id == grant.collaboration_id
    });

    let mut next = policies.to_vec();
    if !duplicate {
        next.push(grant);
    }
    next
}

/// Remove entries matching both `permission` and `id`. A miss returns a
/// content-equal copy.
pub fn remove_policy(
    policies: &[CollaborationGrant],
    permission: &Permission,
    id: &str,
) -> Vec<CollaborationGrant> {
    policies
        .iter()
        .filter(|grant| !(&grant.permission == permission && grant.id == id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_types::CollaborationType;
    use serde_json::json;

    fn grant(id: &str, permission: &str, collaboration_id: &str) -> CollaborationGrant {
        CollaborationGrant {
            id: id.into(),
            permission: Permission::new(permission),
            collaboration_type: CollaborationType::Group,
            collaboration_id: collaboration_id.into(),
        }
    }

    #[test]
    fn get_policies_filters_by_permission() {
        let entity = json!({
            "id": "grp-1",
            "permissions": [
                { "id": "g-1", "permission": "atrium:group:edit",
                  "collaborationType": "group", "collaborationId": "grp-core" },
                { "id": "g-2", "permission": "atrium:group:delete",
                  "collaborationType": "org", "collaborationId": "org-9" },
                "not-a-grant",
            ],
        });

        let grants = get_policies(&entity, &Permission::new("atrium:group:edit"));
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].id, "g-1");
        assert_eq!(grants[0].collaboration_id, "grp-core");
    }

    #[test]
    fn get_policies_on_entities_without_grants_is_empty() {
        let entity = json!({ "id": "grp-1" });
        assert!(get_policies(&entity, &Permission::new("atrium:group:edit")).is_empty());
    }

    #[test]
    fn add_policy_is_idempotent_on_the_pair() {
        let initial = vec![grant("g-1", "atrium:group:edit", "grp-core")];

        let added = add_policy(&initial, grant("g-2", "atrium:group:edit", "grp-core"));
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, "g-1");

        // same permission, different collaboration: a new entry
        let added = add_policy(&initial, grant("g-3", "atrium:group:edit", "grp-other"));
        assert_eq!(added.len(), 2);
    }

    #[test]
    fn add_policy_never_mutates_its_input() {
        let initial = vec![grant("g-1", "atrium:group:edit", "grp-core")];
        let _ = add_policy(&initial, grant("g-2", "atrium:site:edit", "grp-core"));
        assert_eq!(initial.len(), 1);
    }

    #[test]
    fn remove_policy_matches_both_fields() {
        let initial = vec![
            grant("g-1", "atrium:group:edit", "grp-core"),
            grant("g-2", "atrium:group:delete", "grp-core"),
        ];

        let removed = remove_policy(&initial, &Permission::new("atrium:group:edit"), "g-1");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "g-2");

        // right id, wrong permission: no-op
        let unchanged = remove_policy(&initial, &Permission::new("atrium:site:edit"), "g-1");
        assert_eq!(unchanged, initial);
    }

    #[test]
    fn remove_policy_miss_is_content_equal() {
        let initial = vec![grant("g-1", "atrium:group:edit", "grp-core")];
        let unchanged = remove_policy(&initial, &Permission::new("atrium:group:edit"), "g-404");
        assert_eq!(unchanged, initial);
    }
}
