//! Plan-to-document projection.
//!
//! Rendering is a pure read. It never mutates the plan and never fails:
//! every deployment-order entry is resolved against the current resource
//! list by id, so renames and detail edits made after ordering are always
//! reflected in the output, and entries that no longer resolve are skipped.

use tracing::warn;

use crate::plan::{Plan, Resource};

use super::document::{DocumentTree, MetadataBlock, ResourceBlock, ResourceSection};

/// Projects plans into renderable document trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the document tree for the given plan.
    ///
    /// Blocks appear in deployment order and are numbered by position.
    /// A resource contributes only the detail sections it has filled in.
    #[must_use]
    pub fn render(&self, plan: &Plan) -> DocumentTree {
        let title = if plan.project_name.trim().is_empty() {
            String::from("Deployment Plan")
        } else {
            format!("Deployment Plan: {}", plan.project_name)
        };

        let metadata = MetadataBlock {
            project_name: plan.project_name.clone(),
            environment: plan.environment,
            estimated_minutes: plan.estimated_minutes,
            resource_count: plan.resource_count,
            deployment_date: plan.deployment_date,
            manager: plan.manager.clone(),
        };

        let mut resources = Vec::with_capacity(plan.deployment_order.len());
        for entry in &plan.deployment_order {
            let Some(resource) = plan.resource(entry.id()) else {
                warn!("Deployment order references unknown resource {}, skipping", entry.id());
                continue;
            };

            resources.push(ResourceBlock {
                position: resources.len() + 1,
                id: resource.id,
                name: resource.name.clone(),
                kind: resource.kind,
                sections: Self::sections_for(resource),
            });
        }

        DocumentTree { title, metadata, resources }
    }

    fn sections_for(resource: &Resource) -> Vec<ResourceSection> {
        let Some(details) = &resource.details else {
            return Vec::new();
        };

        let mut sections = Vec::new();
        if !details.env.is_empty() {
            sections.push(ResourceSection::EnvVars(details.env.clone()));
        }
        if !details.sql.is_empty() {
            sections.push(ResourceSection::SqlScripts(details.sql.clone()));
        }
        if !details.rollback.is_empty() {
            sections.push(ResourceSection::Rollback(details.rollback.clone()));
        }
        sections
    }
}
