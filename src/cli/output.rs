//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::plan::{Plan, PlanHasher, Resource, ValidationResult};
use crate::render::DocumentTree;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the whole plan for display.
    #[must_use]
    pub fn format_plan(&self, plan: &Plan) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(plan).unwrap_or_default(),
            OutputFormat::Text => Self::format_plan_text(plan),
        }
    }

    /// Formats a plan as text.
    fn format_plan_text(plan: &Plan) -> String {
        let mut output = String::new();

        let name = if plan.project_name.is_empty() {
            "(unnamed)"
        } else {
            plan.project_name.as_str()
        };
        let _ = write!(output, "\n\u{1f4cb} Plan: {name} [{}]\n\n", plan.environment);

        let _ = writeln!(output, "   Estimated time: {} minutes", plan.estimated_minutes);
        match plan.deployment_date {
            Some(date) => {
                let _ = writeln!(output, "   Date:           {date}");
            }
            None => {
                let _ = writeln!(output, "   Date:           (not set)");
            }
        }
        let manager = if plan.manager.is_empty() { "(not set)" } else { plan.manager.as_str() };
        let _ = writeln!(output, "   Manager:        {manager}");
        let _ = writeln!(
            output,
            "   Resources:      {} provisioned, {} declared",
            plan.resources.len(),
            plan.resource_count
        );
        let hasher = PlanHasher::new();
        let _ = writeln!(
            output,
            "   Fingerprint:    {}",
            hasher.short_hash(&hasher.hash_plan(plan))
        );

        if !plan.resources.is_empty() {
            output.push('\n');
            output.push_str(&Self::resource_table(plan));
            output.push('\n');
        }

        if !plan.deployment_order.is_empty() {
            let _ = write!(output, "\nOrder: {}\n", Self::order_line(plan));
        }

        output
    }

    /// Formats the resource list for display.
    #[must_use]
    pub fn format_resources(&self, plan: &Plan) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&plan.resources).unwrap_or_default()
            }
            OutputFormat::Text => {
                if plan.resources.is_empty() {
                    return String::from("No resources provisioned.\n");
                }
                let mut output = Self::resource_table(plan);
                output.push('\n');
                output
            }
        }
    }

    /// Formats the deployment order for display.
    #[must_use]
    pub fn format_order(&self, plan: &Plan) -> String {
        match self.format {
            OutputFormat::Json => {
                let ids: Vec<u32> = plan.deployment_order.iter().map(|r| r.id()).collect();
                serde_json::to_string_pretty(&ids).unwrap_or_default()
            }
            OutputFormat::Text => {
                if plan.deployment_order.is_empty() {
                    return String::from("Deployment order is empty.\n");
                }

                let mut output = String::from("Deployment order:\n");
                for (index, entry) in plan.deployment_order.iter().enumerate() {
                    let line = plan.resource(entry.id()).map_or_else(
                        || format!("unknown resource {entry}"),
                        |r| format!("{} ({})", r.name, r.kind),
                    );
                    let _ = writeln!(output, "  [{index}] {line}");
                }
                output
            }
        }
    }

    /// Formats validation findings for display.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ValidationJson::from(result)).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();

                if result.is_valid() {
                    let _ = writeln!(output, "{} Plan is valid.", "\u{2713}".green());
                } else {
                    let _ = writeln!(
                        output,
                        "{} Plan has {} error(s):",
                        "\u{2717}".red(),
                        result.errors.len()
                    );
                    for error in &result.errors {
                        let _ = writeln!(output, "   - {error}");
                    }
                }

                if show_warnings && !result.warnings.is_empty() {
                    let _ = writeln!(output, "\n{} Warnings:", "\u{26a0}".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }

                output
            }
        }
    }

    /// Formats a rendered document for display.
    #[must_use]
    pub fn format_document(&self, tree: &DocumentTree) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(tree).unwrap_or_default(),
            OutputFormat::Text => tree.to_string(),
        }
    }

    /// Builds the resource table.
    fn resource_table(plan: &Plan) -> String {
        let rows: Vec<ResourceRow> = plan
            .resources
            .iter()
            .map(|r| ResourceRow {
                id: r.id,
                name: r.name.clone(),
                kind: r.kind.to_string(),
                details: Self::details_summary(r),
            })
            .collect();

        Table::new(rows).to_string()
    }

    /// Summarizes the details attached to a resource.
    fn details_summary(resource: &Resource) -> String {
        let Some(details) = &resource.details else {
            return String::from("-");
        };

        let mut parts = Vec::new();
        if !details.env.is_empty() {
            parts.push(format!("{} env", details.env.len()));
        }
        if !details.sql.is_empty() {
            parts.push(format!("{} sql", details.sql.len()));
        }
        if !details.rollback.is_empty() {
            parts.push(String::from("rollback"));
        }

        if parts.is_empty() {
            String::from("empty")
        } else {
            parts.join(", ")
        }
    }

    /// Builds the one-line deployment order summary.
    fn order_line(plan: &Plan) -> String {
        plan.deployment_order
            .iter()
            .map(|entry| {
                plan.resource(entry.id())
                    .map_or_else(|| format!("#{entry}"), |r| r.name.clone())
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ValidationJson {
    valid: bool,
    errors: Vec<ValidationErrorJson>,
    warnings: Vec<String>,
}

#[derive(serde::Serialize)]
struct ValidationErrorJson {
    field: String,
    message: String,
}

impl From<&ValidationResult> for ValidationJson {
    fn from(result: &ValidationResult) -> Self {
        Self {
            valid: result.is_valid(),
            errors: result
                .errors
                .iter()
                .map(|e| ValidationErrorJson {
                    field: e.field.clone(),
                    message: e.message.clone(),
                })
                .collect(),
            warnings: result.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{
        DetailEditor, EnvVar, OrderingSynchronizer, PlanValidator, ResourceProvisioner,
    };

    fn staged_plan() -> Plan {
        let mut plan = Plan::new();
        plan.project_name = String::from("checkout");
        plan.resource_count = 2;
        ResourceProvisioner::new().reconcile(&mut plan);
        OrderingSynchronizer::new().reconcile(&mut plan);
        DetailEditor::new().ensure_details(&mut plan);
        plan
    }

    #[test]
    fn test_plan_text_shows_metadata_and_order() {
        let plan = staged_plan();
        let output = OutputFormatter::new(OutputFormat::Text).format_plan(&plan);

        assert!(output.contains("Plan: checkout [dev]"));
        assert!(output.contains("2 provisioned, 2 declared"));
        assert!(output.contains("Fingerprint:    "));
        assert!(output.contains("Order: Resource 1 -> Resource 2"));
    }

    #[test]
    fn test_plan_json_is_the_document() {
        let plan = staged_plan();
        let output = OutputFormatter::new(OutputFormat::Json).format_plan(&plan);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["projectName"], "checkout");
        assert_eq!(value["serverCount"], 2);
    }

    #[test]
    fn test_resource_table_summarizes_details() {
        let mut plan = staged_plan();
        DetailEditor::new()
            .add_env_var(&mut plan, 1, EnvVar::new("DB_HOST", "10.0.0.1"))
            .unwrap();

        let output = OutputFormatter::new(OutputFormat::Text).format_resources(&plan);

        assert!(output.contains("1 env"));
        assert!(output.contains("empty"));
    }

    #[test]
    fn test_order_listing_resolves_names() {
        let mut plan = staged_plan();
        OrderingSynchronizer::new().reorder(&mut plan, 0, 1).unwrap();

        let output = OutputFormatter::new(OutputFormat::Text).format_order(&plan);

        assert!(output.contains("[0] Resource 2 (api)"));
        assert!(output.contains("[1] Resource 1 (api)"));
    }

    #[test]
    fn test_order_json_lists_ids() {
        let plan = staged_plan();
        let output = OutputFormatter::new(OutputFormat::Json).format_order(&plan);

        let ids: Vec<u32> = serde_json::from_str(&output).unwrap();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_validation_output_lists_errors() {
        let plan = Plan::new();
        let result = PlanValidator::new().check(&plan);

        let output =
            OutputFormatter::new(OutputFormat::Text).format_validation(&result, true);

        assert!(output.contains("error(s)"));
        assert!(output.contains("projectName"));
        assert!(output.contains("Warnings:"));
    }

    #[test]
    fn test_validation_json_shape() {
        let plan = Plan::new();
        let result = PlanValidator::new().check(&plan);

        let output =
            OutputFormatter::new(OutputFormat::Json).format_validation(&result, true);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["valid"], false);
        assert!(value["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }
}
