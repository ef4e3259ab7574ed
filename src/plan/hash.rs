//! Plan hashing for change detection.
//!
//! This module provides deterministic hashing of plan structures to detect
//! edits between saves and to assert that no-op reconciliation really
//! leaves a plan untouched.

use sha2::{Digest, Sha256};

use super::types::{Plan, Resource};

/// Hasher for computing plan fingerprints.
#[derive(Debug, Default)]
pub struct PlanHasher;

impl PlanHasher {
    /// Creates a new plan hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a fingerprint of the entire plan.
    ///
    /// This hash changes when any field of the plan changes, including
    /// detail entries and the deployment order.
    #[must_use]
    pub fn hash_plan(&self, plan: &Plan) -> String {
        let mut hasher = Sha256::new();

        // Metadata
        hasher.update(plan.project_name.as_bytes());
        hasher.update(plan.environment.as_str().as_bytes());
        hasher.update(plan.estimated_minutes.to_be_bytes());
        hasher.update(plan.resource_count.to_be_bytes());
        if let Some(date) = plan.deployment_date {
            hasher.update(date.to_string().as_bytes());
        }
        hasher.update(plan.manager.as_bytes());

        // Each resource, in declaration order
        for resource in &plan.resources {
            hasher.update(self.hash_resource(resource).as_bytes());
        }

        // Deployment order
        for entry in &plan.deployment_order {
            hasher.update(entry.id().to_be_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a hash for a single resource.
    #[must_use]
    pub fn hash_resource(&self, resource: &Resource) -> String {
        let mut hasher = Sha256::new();

        hasher.update(resource.id.to_be_bytes());
        hasher.update(resource.name.as_bytes());
        hasher.update(resource.kind.as_str().as_bytes());

        if let Some(details) = &resource.details {
            hasher.update([1u8]);
            for var in &details.env {
                hasher.update(var.key.as_bytes());
                hasher.update(var.value.as_bytes());
            }
            for script in &details.sql {
                hasher.update(script.query.as_bytes());
                hasher.update(script.description.as_bytes());
            }
            hasher.update(details.rollback.point.as_bytes());
            hasher.update(details.rollback.procedure.as_bytes());
        } else {
            hasher.update([0u8]);
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }

    /// Compares two hashes to determine if they are equal.
    #[must_use]
    pub fn hashes_match(hash1: &str, hash2: &str) -> bool {
        hash1 == hash2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::details::{DetailEditor, RollbackField};
    use crate::plan::provisioner::ResourceProvisioner;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.project_name = String::from("checkout");
        plan.resource_count = 2;
        ResourceProvisioner::new().reconcile(&mut plan);
        plan
    }

    #[test]
    fn test_plan_hash_deterministic() {
        let hasher = PlanHasher::new();
        let plan = sample_plan();

        assert_eq!(hasher.hash_plan(&plan), hasher.hash_plan(&plan));
    }

    #[test]
    fn test_hash_changes_on_edit() {
        let hasher = PlanHasher::new();
        let mut plan = sample_plan();
        let before = hasher.hash_plan(&plan);

        ResourceProvisioner::new().rename(&mut plan, 1, "gateway").unwrap();
        assert_ne!(before, hasher.hash_plan(&plan));
    }

    #[test]
    fn test_hash_covers_details() {
        let hasher = PlanHasher::new();
        let editor = DetailEditor::new();
        let mut plan = sample_plan();
        editor.ensure_details(&mut plan);
        let before = hasher.hash_plan(&plan);

        editor
            .set_rollback(&mut plan, 1, RollbackField::Point, "v1.2")
            .unwrap();
        assert_ne!(before, hasher.hash_plan(&plan));
    }

    #[test]
    fn test_short_hash() {
        let hasher = PlanHasher::new();
        let short = hasher.short_hash("abcdef1234567890abcdef1234567890");

        assert_eq!(short, "abcdef12");
        assert_eq!(short.len(), 8);
    }

    #[test]
    fn test_hashes_match() {
        assert!(PlanHasher::hashes_match("abc123", "abc123"));
        assert!(!PlanHasher::hashes_match("abc123", "abc124"));
    }
}
