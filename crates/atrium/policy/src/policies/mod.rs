//! Default permission rule tables
//!
//! One table per entity domain, kept strictly apart from the evaluation
//! logic: these modules are plain data and can be unit-tested on their
//! own. The registry loads all of them via
//! [`PolicyRegistry::with_defaults`](crate::PolicyRegistry::with_defaults).
//!
//! Several tables encode "A or B" as a pair of guarded assertions:
//! "(not A implies B) and (not B implies A)". The assertion shape has no
//! OR primitive, and the pairing must stay as two entries: collapsing it
//! into one check changes which actors pass when the guards overlap.

pub mod group;
pub mod project;
pub mod site;

use atrium_types::PermissionPolicy;

/// Every policy the platform ships with
pub fn default_policies() -> Vec<PermissionPolicy> {
    let mut policies = group::policies();
    policies.extend(project::policies());
    policies.extend(site::policies());
    policies
}
