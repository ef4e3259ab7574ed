//! Required-field validation for deployment plans.
//!
//! Mirrors the submission gates of the authoring flow: a plan is only
//! complete when its metadata is filled in and every resource is named.
//! Softer issues are reported as warnings.

use tracing::debug;

use crate::error::{PlanwrightError, Result};

use super::types::{Plan, RESOURCE_COUNT_MAX, RESOURCE_COUNT_MIN};

/// Validator for deployment plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanValidator;

/// Validation result containing all findings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl PlanValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Collects every validation finding without failing.
    #[must_use]
    pub fn check(&self, plan: &Plan) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::check_metadata(plan, &mut result);
        Self::check_resources(plan, &mut result);
        Self::check_order(plan, &mut result);

        result
    }

    /// Validates a plan for submission.
    ///
    /// # Errors
    ///
    /// Returns a validation error carrying the first failing field when any
    /// required field is missing or out of range.
    pub fn validate(&self, plan: &Plan) -> Result<ValidationResult> {
        let result = self.check(plan);

        if result.is_valid() {
            debug!("Plan validation passed with {} warnings", result.warnings.len());
            Ok(result)
        } else {
            let first = &result.errors[0];
            Err(PlanwrightError::Validation {
                message: first.message.clone(),
                field: Some(first.field.clone()),
            })
        }
    }

    /// Checks the plan metadata fields.
    fn check_metadata(plan: &Plan, result: &mut ValidationResult) {
        if plan.project_name.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("projectName"),
                message: String::from("Project name cannot be empty"),
            });
        }

        if plan.deployment_date.is_none() {
            result.errors.push(ValidationError {
                field: String::from("deploymentDate"),
                message: String::from("Deployment date must be set"),
            });
        }

        if plan.manager.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("manager"),
                message: String::from("Manager cannot be empty"),
            });
        }

        if plan.estimated_minutes == 0 {
            result.errors.push(ValidationError {
                field: String::from("estimatedTime"),
                message: String::from("Estimated time must be at least 1 minute"),
            });
        }

        if plan.resource_count < RESOURCE_COUNT_MIN || plan.resource_count > RESOURCE_COUNT_MAX {
            result.errors.push(ValidationError {
                field: String::from("serverCount"),
                message: format!(
                    "Resource count must be between {RESOURCE_COUNT_MIN} and {RESOURCE_COUNT_MAX}"
                ),
            });
        }
    }

    /// Checks the resource list.
    fn check_resources(plan: &Plan, result: &mut ValidationResult) {
        if plan.resources.is_empty() {
            result.warnings.push(String::from("No resources provisioned yet"));
            return;
        }

        if plan.resources.len() != plan.resource_count as usize {
            result.warnings.push(format!(
                "{} resources found but {} declared; resource sync pending",
                plan.resources.len(),
                plan.resource_count
            ));
        }

        let mut seen_ids = std::collections::HashSet::new();
        for (i, resource) in plan.resources.iter().enumerate() {
            if resource.name.trim().is_empty() {
                result.errors.push(ValidationError {
                    field: format!("servers[{i}].name"),
                    message: format!("Resource {} has no name", resource.id),
                });
            }

            if !seen_ids.insert(resource.id) {
                result.warnings.push(format!("Duplicate resource id: {}", resource.id));
            }

            if resource.details.is_none() {
                result.warnings.push(format!(
                    "Resource '{}' has no operational details",
                    resource.name
                ));
            }
        }
    }

    /// Checks the deployment order against the resource list.
    fn check_order(plan: &Plan, result: &mut ValidationResult) {
        if plan.resources.is_empty() && plan.deployment_order.is_empty() {
            return;
        }

        let mut order_ids: Vec<u32> = plan.deployment_order.iter().map(|r| r.id()).collect();
        let mut expected = plan.resource_ids();
        order_ids.sort_unstable();
        expected.sort_unstable();

        if order_ids != expected {
            result.warnings.push(String::from(
                "Deployment order is out of sync with resources; order sync pending",
            ));
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
