//! Plan document encoding and decoding.
//!
//! The serialization gateway between the in-memory plan and the portable
//! JSON document. Import is tolerant of the legacy authoring tool's output
//! (string-typed numbers, empty-string dates, snapshot order entries) and
//! reports any structural failure instead of panicking.

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::plan::Plan;

/// Encoder/decoder for portable plan documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanCodec;

impl PlanCodec {
    /// Creates a new codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Serializes a plan into pretty-printed JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the plan cannot be encoded.
    pub fn export(&self, plan: &Plan) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(plan)
            .map_err(|e| StoreError::serialization(format!("Failed to encode plan: {e}")))?;
        bytes.push(b'\n');
        debug!("Exported plan document ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Parses a plan from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error when the bytes are not valid JSON or
    /// do not have the shape of a plan document.
    pub fn import(&self, bytes: &[u8]) -> Result<Plan> {
        let plan: Plan = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::malformed(format!("Failed to parse plan: {e}")))?;
        debug!("Imported plan document for project {:?}", plan.project_name);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanwrightError;
    use crate::plan::{
        DetailEditor, EnvVar, Environment, OrderingSynchronizer, ResourceKind,
        ResourceProvisioner, RollbackField, SqlScript,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn authored_plan() -> Plan {
        let provisioner = ResourceProvisioner::new();
        let ordering = OrderingSynchronizer::new();
        let editor = DetailEditor::new();

        let mut plan = Plan::new();
        plan.project_name = String::from("checkout");
        plan.environment = Environment::Production;
        plan.estimated_minutes = 45;
        plan.deployment_date = NaiveDate::from_ymd_opt(2026, 9, 1);
        plan.manager = String::from("J. Doe");
        plan.resource_count = 2;

        provisioner.reconcile(&mut plan);
        provisioner.rename(&mut plan, 1, "orders db").unwrap();
        provisioner.retype(&mut plan, 1, ResourceKind::Db).unwrap();
        ordering.reconcile(&mut plan);
        ordering.reorder(&mut plan, 0, 1).unwrap();
        editor.ensure_details(&mut plan);
        editor
            .add_env_var(&mut plan, 1, EnvVar::new("DB_HOST", "10.0.0.1"))
            .unwrap();
        editor
            .add_sql_script(&mut plan, 2, SqlScript::new("SELECT 1", "smoke"))
            .unwrap();
        editor
            .set_rollback(&mut plan, 2, RollbackField::Point, "v1.2")
            .unwrap();
        plan
    }

    #[test]
    fn test_round_trip_preserves_plan() {
        let codec = PlanCodec::new();
        let plan = authored_plan();

        let bytes = codec.export(&plan).unwrap();
        let back = codec.import(&bytes).unwrap();

        assert_eq!(back, plan);
    }

    #[test]
    fn test_export_uses_document_field_names() {
        let codec = PlanCodec::new();
        let bytes = codec.export(&authored_plan()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let object = value.as_object().unwrap();
        for key in [
            "projectName",
            "environment",
            "estimatedTime",
            "serverCount",
            "deploymentDate",
            "manager",
            "servers",
            "deploymentOrder",
        ] {
            assert!(object.contains_key(key), "missing key: {key}");
        }
        assert_eq!(object["environment"], json!("production"));
        assert_eq!(object["deploymentOrder"], json!([2, 1]));
        assert_eq!(object["servers"][0]["type"], json!("db"));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let codec = PlanCodec::new();
        assert!(codec.import(b"{not json").is_err());
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        let codec = PlanCodec::new();
        let result = codec.import(br#"{"projectName": 3}"#);
        assert!(matches!(
            result,
            Err(PlanwrightError::Store(StoreError::MalformedInput { .. }))
        ));
    }

    #[test]
    fn test_import_requires_project_name() {
        let codec = PlanCodec::new();
        let document = json!({
            "environment": "dev",
            "estimatedTime": 30,
            "serverCount": 3
        });
        assert!(codec.import(document.to_string().as_bytes()).is_err());
    }

    #[test]
    fn test_import_tolerates_unknown_fields() {
        let codec = PlanCodec::new();
        let document = json!({
            "projectName": "legacy",
            "environment": "staging",
            "estimatedTime": 30,
            "serverCount": 1,
            "deploymentDate": "2026-03-15",
            "manager": "ops",
            "servers": [{ "id": 1, "name": "app", "type": "api", "icon": "cloud" }],
            "deploymentOrder": [1],
            "currentStep": 5
        });

        let plan = codec.import(document.to_string().as_bytes()).unwrap();
        assert_eq!(plan.project_name, "legacy");
        assert_eq!(plan.resources[0].name, "app");
        assert_eq!(plan.deployment_order.len(), 1);
    }

    #[test]
    fn test_import_accepts_legacy_order_snapshots() {
        let codec = PlanCodec::new();
        let document = json!({
            "projectName": "legacy",
            "environment": "dev",
            "estimatedTime": "30",
            "serverCount": "2",
            "deploymentDate": "",
            "manager": "",
            "servers": [
                { "id": 1, "name": "Resource 1", "type": "api" },
                { "id": 2, "name": "Resource 2", "type": "db" }
            ],
            "deploymentOrder": [
                { "id": 2, "name": "stale name", "type": "db" },
                1
            ]
        });

        let plan = codec.import(document.to_string().as_bytes()).unwrap();
        let order: Vec<u32> = plan.deployment_order.iter().map(|r| r.id()).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_import_defaults_missing_collections() {
        let codec = PlanCodec::new();
        let document = json!({
            "projectName": "bare",
            "environment": "dev",
            "estimatedTime": 30,
            "serverCount": 3
        });

        let plan = codec.import(document.to_string().as_bytes()).unwrap();
        assert!(plan.resources.is_empty());
        assert!(plan.deployment_order.is_empty());
        assert!(plan.manager.is_empty());
        assert!(plan.deployment_date.is_none());
    }
}
