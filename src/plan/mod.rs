//! Plan module for the planwright authoring core.
//!
//! This module owns everything about the plan aggregate:
//! - The data model and its persisted JSON mapping
//! - Reconciliation of the derived collections (resources, order)
//! - Detail initialization and per-field editing
//! - Required-field validation and change-detection hashing

mod types;
mod provisioner;
mod ordering;
mod details;
mod validate;
mod hash;

pub use types::{
    DEFAULT_ESTIMATED_MINUTES, DEFAULT_RESOURCE_COUNT, EnvVar, Environment, Plan, Resource,
    ResourceDetails, ResourceKind, ResourceRef, RESOURCE_COUNT_MAX, RESOURCE_COUNT_MIN,
    RollbackPlan, SqlScript,
};
pub use provisioner::ResourceProvisioner;
pub use ordering::OrderingSynchronizer;
pub use details::{DetailEditor, EnvField, RollbackField, SqlField};
pub use validate::{PlanValidator, ValidationError, ValidationResult};
pub use hash::PlanHasher;
