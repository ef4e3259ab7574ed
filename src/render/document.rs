//! Rendered document types.
//!
//! A [`DocumentTree`] is the pure projection of a plan: the metadata block
//! followed by one block per deployment-order entry. It carries no layout
//! concerns, serializes to JSON for downstream rendering backends, and has
//! a plain-text `Display` form.

use chrono::NaiveDate;
use serde::Serialize;

use crate::plan::{EnvVar, Environment, ResourceKind, RollbackPlan, SqlScript};

/// A fully resolved, renderable deployment document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentTree {
    /// Document title.
    pub title: String,
    /// Plan metadata block.
    pub metadata: MetadataBlock,
    /// One block per deployment-order entry, in order.
    pub resources: Vec<ResourceBlock>,
}

/// The metadata block at the top of the document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Project name.
    pub project_name: String,
    /// Target environment.
    pub environment: Environment,
    /// Estimated deployment duration in minutes.
    pub estimated_minutes: u32,
    /// Declared number of resources.
    pub resource_count: u32,
    /// Scheduled deployment date.
    pub deployment_date: Option<NaiveDate>,
    /// Person responsible for the deployment.
    pub manager: String,
}

/// One resource block in deployment order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceBlock {
    /// 1-based position in the deployment order.
    pub position: usize,
    /// Id of the resolved resource.
    pub id: u32,
    /// Current name of the resource.
    pub name: String,
    /// Current type of the resource.
    pub kind: ResourceKind,
    /// Detail sections present on this resource.
    pub sections: Vec<ResourceSection>,
}

/// A detail section of a resource block.
///
/// Only sections with content appear in a block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSection {
    /// Environment variables to configure.
    EnvVars(Vec<EnvVar>),
    /// SQL scripts to run.
    SqlScripts(Vec<SqlScript>),
    /// Rollback point and procedure.
    Rollback(RollbackPlan),
}

impl DocumentTree {
    /// Returns the number of rendered resource blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.resources.len()
    }
}

impl std::fmt::Display for DocumentTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f)?;
        write!(f, "{}", self.metadata)?;

        if !self.resources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Deployment order")?;
            writeln!(f, "----------------")?;
            for block in &self.resources {
                writeln!(f)?;
                write!(f, "{block}")?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for MetadataBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Project:        {}", self.project_name)?;
        writeln!(f, "Environment:    {}", self.environment.label())?;
        writeln!(f, "Estimated time: {} minutes", self.estimated_minutes)?;
        writeln!(f, "Resources:      {}", self.resource_count)?;
        match self.deployment_date {
            Some(date) => writeln!(f, "Date:           {date}")?,
            None => writeln!(f, "Date:           (not set)")?,
        }
        if self.manager.is_empty() {
            writeln!(f, "Manager:        (not set)")
        } else {
            writeln!(f, "Manager:        {}", self.manager)
        }
    }
}

impl std::fmt::Display for ResourceBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}. {} ({})", self.position, self.name, self.kind.label())?;
        for section in &self.sections {
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ResourceSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVars(vars) => {
                writeln!(f, "   Environment variables:")?;
                for var in vars {
                    writeln!(f, "     - {} = {}", var.key, var.value)?;
                }
            }
            Self::SqlScripts(scripts) => {
                writeln!(f, "   SQL scripts:")?;
                for script in scripts {
                    if script.description.is_empty() {
                        writeln!(f, "     - (no description)")?;
                    } else {
                        writeln!(f, "     - {}", script.description)?;
                    }
                    for line in script.query.lines() {
                        writeln!(f, "       {line}")?;
                    }
                }
            }
            Self::Rollback(rollback) => {
                writeln!(f, "   Rollback:")?;
                if !rollback.point.is_empty() {
                    writeln!(f, "     Point: {}", rollback.point)?;
                }
                if !rollback.procedure.is_empty() {
                    writeln!(f, "     Procedure:")?;
                    for line in rollback.procedure.lines() {
                        writeln!(f, "       {line}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
