//! Editing session over a single deployment plan.
//!
//! [`PlanSession`] owns a plan and the components that keep it consistent.
//! It is the entry point the CLI drives: metadata setters, the
//! synchronization steps of the authoring flow, per-resource edits,
//! validation, rendering, and portable import/export.

use chrono::NaiveDate;

use crate::error::{PlanwrightError, Result};
use crate::plan::{
    DetailEditor, EnvField, EnvVar, Environment, OrderingSynchronizer, Plan, PlanHasher,
    PlanValidator, RESOURCE_COUNT_MAX, RESOURCE_COUNT_MIN, ResourceKind, ResourceProvisioner,
    RollbackField, SqlField, SqlScript, ValidationResult,
};
use crate::render::{DocumentRenderer, DocumentTree};
use crate::store::PlanCodec;

/// An editing session over one deployment plan.
#[derive(Debug, Default)]
pub struct PlanSession {
    plan: Plan,
    provisioner: ResourceProvisioner,
    ordering: OrderingSynchronizer,
    editor: DetailEditor,
    renderer: DocumentRenderer,
    codec: PlanCodec,
    validator: PlanValidator,
    hasher: PlanHasher,
}

impl PlanSession {
    /// Creates a session over a fresh default plan.
    #[must_use]
    pub fn new() -> Self {
        Self::from_plan(Plan::new())
    }

    /// Creates a session over an existing plan.
    #[must_use]
    pub fn from_plan(plan: Plan) -> Self {
        Self {
            plan,
            provisioner: ResourceProvisioner::new(),
            ordering: OrderingSynchronizer::new(),
            editor: DetailEditor::new(),
            renderer: DocumentRenderer::new(),
            codec: PlanCodec::new(),
            validator: PlanValidator::new(),
            hasher: PlanHasher::new(),
        }
    }

    /// Returns the current plan.
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Consumes the session and returns the plan.
    #[must_use]
    pub fn into_plan(self) -> Plan {
        self.plan
    }

    /// Sets the project name.
    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.plan.project_name = name.into();
    }

    /// Sets the target environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.plan.environment = environment;
    }

    /// Sets the estimated deployment duration in minutes.
    pub fn set_estimated_minutes(&mut self, minutes: u32) {
        self.plan.estimated_minutes = minutes;
    }

    /// Sets or clears the scheduled deployment date.
    pub fn set_deployment_date(&mut self, date: Option<NaiveDate>) {
        self.plan.deployment_date = date;
    }

    /// Sets the deployment manager.
    pub fn set_manager(&mut self, manager: impl Into<String>) {
        self.plan.manager = manager.into();
    }

    /// Sets the declared resource count.
    ///
    /// The count only declares how many resources the plan should have; the
    /// resource list itself is rebuilt by the next [`Self::sync_resources`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the count is outside the allowed
    /// range; the plan is unchanged in that case.
    pub fn set_resource_count(&mut self, count: u32) -> Result<()> {
        if count < RESOURCE_COUNT_MIN || count > RESOURCE_COUNT_MAX {
            return Err(PlanwrightError::validation(
                format!("Resource count must be between {RESOURCE_COUNT_MIN} and {RESOURCE_COUNT_MAX}"),
                "serverCount",
            ));
        }
        self.plan.resource_count = count;
        Ok(())
    }

    /// Repairs the resource list against the declared count.
    ///
    /// Returns true when the list was rebuilt.
    pub fn sync_resources(&mut self) -> bool {
        self.provisioner.reconcile(&mut self.plan)
    }

    /// Repairs the deployment order against the current resources.
    ///
    /// Returns true when the order was reset.
    pub fn sync_order(&mut self) -> bool {
        self.ordering.reconcile(&mut self.plan)
    }

    /// Attaches empty detail scaffolds to resources that have none.
    ///
    /// Returns the number of resources that received a scaffold.
    pub fn ensure_details(&mut self) -> usize {
        self.editor.ensure_details(&mut self.plan)
    }

    /// Renames the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if no resource with that id exists.
    pub fn rename_resource(&mut self, id: u32, name: impl Into<String>) -> Result<()> {
        self.provisioner.rename(&mut self.plan, id, name)
    }

    /// Changes the type of the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if no resource with that id exists.
    pub fn retype_resource(&mut self, id: u32, kind: ResourceKind) -> Result<()> {
        self.provisioner.retype(&mut self.plan, id, kind)
    }

    /// Moves the deployment-order entry at `from` to position `to`.
    ///
    /// # Errors
    ///
    /// Returns an error when either position is past the end of the order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.ordering.reorder(&mut self.plan, from, to)
    }

    /// Appends an environment variable to the resource's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn add_env_var(&mut self, id: u32, var: EnvVar) -> Result<()> {
        self.editor.add_env_var(&mut self.plan, id, var)
    }

    /// Removes the environment variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn remove_env_var(&mut self, id: u32, index: usize) -> Result<()> {
        self.editor.remove_env_var(&mut self.plan, id, index)
    }

    /// Overwrites one field of the environment variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn set_env_var(
        &mut self,
        id: u32,
        index: usize,
        field: EnvField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.editor.set_env_var(&mut self.plan, id, index, field, value)
    }

    /// Appends a SQL script to the resource's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn add_sql_script(&mut self, id: u32, script: SqlScript) -> Result<()> {
        self.editor.add_sql_script(&mut self.plan, id, script)
    }

    /// Removes the SQL script at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn remove_sql_script(&mut self, id: u32, index: usize) -> Result<()> {
        self.editor.remove_sql_script(&mut self.plan, id, index)
    }

    /// Overwrites one field of the SQL script at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn set_sql_script(
        &mut self,
        id: u32,
        index: usize,
        field: SqlField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.editor.set_sql_script(&mut self.plan, id, index, field, value)
    }

    /// Overwrites one field of the resource's rollback plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn set_rollback(
        &mut self,
        id: u32,
        field: RollbackField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.editor.set_rollback(&mut self.plan, id, field, value)
    }

    /// Collects every validation finding without failing.
    #[must_use]
    pub fn check(&self) -> ValidationResult {
        self.validator.check(&self.plan)
    }

    /// Validates the plan for submission.
    ///
    /// # Errors
    ///
    /// Returns a validation error carrying the first failing field.
    pub fn validate(&self) -> Result<ValidationResult> {
        self.validator.validate(&self.plan)
    }

    /// Projects the plan into a renderable document tree.
    #[must_use]
    pub fn render(&self) -> DocumentTree {
        self.renderer.render(&self.plan)
    }

    /// Serializes the plan into a portable JSON document.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the plan cannot be encoded.
    pub fn export(&self) -> Result<Vec<u8>> {
        self.codec.export(&self.plan)
    }

    /// Replaces the plan with one parsed from a portable JSON document.
    ///
    /// The document is parsed first; when parsing fails the current plan is
    /// kept as it was.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error when the bytes are not a valid plan
    /// document.
    pub fn import(&mut self, bytes: &[u8]) -> Result<()> {
        let plan = self.codec.import(bytes)?;
        self.plan = plan;
        Ok(())
    }

    /// Computes a fingerprint of the current plan.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.hasher.hash_plan(&self.plan)
    }
}
