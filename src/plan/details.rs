//! Detail initialization and editing.
//!
//! Details are attached lazily: a resource reaches the detail-editing step
//! with no details and gets an empty scaffold attached exactly once.
//! Every edit targets one resource by id and, for list entries, one
//! position by index.

use tracing::debug;

use crate::error::{EditError, Result};

use super::types::{EnvVar, Plan, ResourceDetails, SqlScript};

/// Field selector for environment variable edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvField {
    /// The variable name.
    Key,
    /// The variable value.
    Value,
}

/// Field selector for SQL script edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlField {
    /// The SQL text.
    Query,
    /// What the script is for.
    Description,
}

/// Field selector for rollback edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackField {
    /// Version or snapshot to roll back to.
    Point,
    /// Steps to execute when rolling back.
    Procedure,
}

/// Attaches and edits per-resource deployment details.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailEditor;

impl DetailEditor {
    /// Creates a new editor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Attaches an empty details scaffold to every resource that has none.
    ///
    /// Resources that already carry details are left untouched, so calling
    /// this any number of times is equivalent to calling it once.
    ///
    /// Returns the number of resources that received a scaffold.
    pub fn ensure_details(&self, plan: &mut Plan) -> usize {
        let mut attached = 0;
        for resource in &mut plan.resources {
            if resource.details.is_none() {
                resource.details = Some(ResourceDetails::default());
                attached += 1;
            }
        }
        if attached > 0 {
            debug!("Attached detail scaffolds to {} resources", attached);
        }
        attached
    }

    /// Appends an environment variable to the resource's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn add_env_var(&self, plan: &mut Plan, id: u32, var: EnvVar) -> Result<()> {
        let details = details_mut(plan, id)?;
        details.env.push(var);
        Ok(())
    }

    /// Removes the environment variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range; the entries are unchanged on error.
    pub fn remove_env_var(&self, plan: &mut Plan, id: u32, index: usize) -> Result<()> {
        let details = details_mut(plan, id)?;
        if index >= details.env.len() {
            return Err(EditError::out_of_range("env entries", index, details.env.len()).into());
        }
        details.env.remove(index);
        Ok(())
    }

    /// Overwrites one field of the environment variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn set_env_var(
        &self,
        plan: &mut Plan,
        id: u32,
        index: usize,
        field: EnvField,
        value: impl Into<String>,
    ) -> Result<()> {
        let details = details_mut(plan, id)?;
        let len = details.env.len();
        let entry = details
            .env
            .get_mut(index)
            .ok_or(EditError::out_of_range("env entries", index, len))?;
        match field {
            EnvField::Key => entry.key = value.into(),
            EnvField::Value => entry.value = value.into(),
        }
        Ok(())
    }

    /// Appends a SQL script to the resource's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn add_sql_script(&self, plan: &mut Plan, id: u32, script: SqlScript) -> Result<()> {
        let details = details_mut(plan, id)?;
        details.sql.push(script);
        Ok(())
    }

    /// Removes the SQL script at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range; the entries are unchanged on error.
    pub fn remove_sql_script(&self, plan: &mut Plan, id: u32, index: usize) -> Result<()> {
        let details = details_mut(plan, id)?;
        if index >= details.sql.len() {
            return Err(EditError::out_of_range("sql scripts", index, details.sql.len()).into());
        }
        details.sql.remove(index);
        Ok(())
    }

    /// Overwrites one field of the SQL script at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist, has no details, or
    /// the index is out of range.
    pub fn set_sql_script(
        &self,
        plan: &mut Plan,
        id: u32,
        index: usize,
        field: SqlField,
        value: impl Into<String>,
    ) -> Result<()> {
        let details = details_mut(plan, id)?;
        let len = details.sql.len();
        let entry = details
            .sql
            .get_mut(index)
            .ok_or(EditError::out_of_range("sql scripts", index, len))?;
        match field {
            SqlField::Query => entry.query = value.into(),
            SqlField::Description => entry.description = value.into(),
        }
        Ok(())
    }

    /// Overwrites one field of the resource's rollback plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or has no details.
    pub fn set_rollback(
        &self,
        plan: &mut Plan,
        id: u32,
        field: RollbackField,
        value: impl Into<String>,
    ) -> Result<()> {
        let details = details_mut(plan, id)?;
        match field {
            RollbackField::Point => details.rollback.point = value.into(),
            RollbackField::Procedure => details.rollback.procedure = value.into(),
        }
        Ok(())
    }
}

fn details_mut(plan: &mut Plan, id: u32) -> Result<&mut ResourceDetails> {
    let resource = plan.resource_mut(id).ok_or(EditError::UnknownResource { id })?;
    let details = resource.details.as_mut().ok_or(EditError::DetailsMissing { id })?;
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanwrightError;
    use crate::plan::types::Resource;

    fn detailed_plan(count: u32) -> Plan {
        let mut plan = Plan::new();
        plan.resource_count = count;
        plan.resources = (1..=count).map(Resource::provisioned).collect();
        DetailEditor::new().ensure_details(&mut plan);
        plan
    }

    #[test]
    fn test_ensure_details_attaches_scaffold() {
        let mut plan = Plan::new();
        plan.resources = vec![Resource::provisioned(1), Resource::provisioned(2)];

        let attached = DetailEditor::new().ensure_details(&mut plan);
        assert_eq!(attached, 2);
        for resource in &plan.resources {
            let details = resource.details.as_ref().unwrap();
            assert!(details.env.is_empty());
            assert!(details.sql.is_empty());
            assert!(details.rollback.is_empty());
        }
    }

    #[test]
    fn test_ensure_details_is_idempotent() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(2);
        editor
            .add_env_var(&mut plan, 1, EnvVar::new("DB_HOST", "10.0.0.1"))
            .unwrap();

        let once = plan.clone();
        assert_eq!(editor.ensure_details(&mut plan), 0);
        assert_eq!(plan, once);
    }

    #[test]
    fn test_ensure_details_preserves_existing() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(2);
        editor
            .add_env_var(&mut plan, 1, EnvVar::new("REGION", "eu-west"))
            .unwrap();
        plan.resources[1].details = None;

        assert_eq!(editor.ensure_details(&mut plan), 1);
        let kept = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert_eq!(kept.env.len(), 1);
        assert_eq!(kept.env[0].key, "REGION");
    }

    #[test]
    fn test_add_and_set_env_var() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(1);

        editor
            .add_env_var(&mut plan, 1, EnvVar::new("DB_HOST", "localhost"))
            .unwrap();
        editor
            .set_env_var(&mut plan, 1, 0, EnvField::Value, "10.0.0.1")
            .unwrap();

        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert_eq!(details.env[0].key, "DB_HOST");
        assert_eq!(details.env[0].value, "10.0.0.1");
    }

    #[test]
    fn test_remove_env_var_keeps_neighbors() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(1);
        for key in ["A", "B", "C"] {
            editor.add_env_var(&mut plan, 1, EnvVar::new(key, "1")).unwrap();
        }

        editor.remove_env_var(&mut plan, 1, 1).unwrap();

        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        let keys: Vec<&str> = details.env.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "C"]);
    }

    #[test]
    fn test_env_index_out_of_range() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(1);
        editor.add_env_var(&mut plan, 1, EnvVar::default()).unwrap();

        assert!(editor.remove_env_var(&mut plan, 1, 1).is_err());
        assert!(editor.set_env_var(&mut plan, 1, 1, EnvField::Key, "X").is_err());
        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert_eq!(details.env.len(), 1);
    }

    #[test]
    fn test_sql_script_edits() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(1);

        editor
            .add_sql_script(&mut plan, 1, SqlScript::new("SELECT 1", "smoke check"))
            .unwrap();
        editor
            .set_sql_script(&mut plan, 1, 0, SqlField::Description, "connectivity check")
            .unwrap();

        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert_eq!(details.sql[0].query, "SELECT 1");
        assert_eq!(details.sql[0].description, "connectivity check");

        editor.remove_sql_script(&mut plan, 1, 0).unwrap();
        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert!(details.sql.is_empty());
    }

    #[test]
    fn test_set_rollback_fields() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(1);

        editor
            .set_rollback(&mut plan, 1, RollbackField::Point, "v1.2")
            .unwrap();
        editor
            .set_rollback(&mut plan, 1, RollbackField::Procedure, "redeploy previous image")
            .unwrap();

        let details = plan.resource(1).unwrap().details.as_ref().unwrap();
        assert_eq!(details.rollback.point, "v1.2");
        assert_eq!(details.rollback.procedure, "redeploy previous image");
    }

    #[test]
    fn test_edits_touch_only_the_target() {
        let editor = DetailEditor::new();
        let mut plan = detailed_plan(3);
        let sibling_before = plan.resource(2).cloned();

        editor
            .add_env_var(&mut plan, 1, EnvVar::new("PORT", "8080"))
            .unwrap();
        editor
            .set_rollback(&mut plan, 3, RollbackField::Point, "v2.0")
            .unwrap();

        assert_eq!(plan.resource(2).cloned(), sibling_before);
    }

    #[test]
    fn test_unknown_resource() {
        let mut plan = detailed_plan(1);
        let result = DetailEditor::new().add_env_var(&mut plan, 9, EnvVar::default());
        assert!(matches!(
            result,
            Err(PlanwrightError::Edit(EditError::UnknownResource { id: 9 }))
        ));
    }

    #[test]
    fn test_details_missing() {
        let editor = DetailEditor::new();
        let mut plan = Plan::new();
        plan.resources = vec![Resource::provisioned(1)];

        let result = editor.set_rollback(&mut plan, 1, RollbackField::Point, "v1");
        assert!(matches!(
            result,
            Err(PlanwrightError::Edit(EditError::DetailsMissing { id: 1 }))
        ));
    }
}
