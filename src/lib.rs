// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![forbid(unsafe_code)]               // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Planwright
//!
//! A deployment-plan authoring tool with self-healing derived state.
//!
//! ## Overview
//!
//! Planwright turns the staged authoring flow of a deployment wizard into a
//! file-based workflow:
//!
//! - Describe the deployment (project, environment, schedule, resource count)
//! - Provision and customize the resource list
//! - Arrange the deployment order
//! - Attach operational details (environment variables, SQL scripts, rollback)
//! - Validate, render, and share the plan as a portable JSON document
//!
//! ## Architecture
//!
//! The plan is one mutable aggregate with two **derived collections**: the
//! resource list (derived from the declared count) and the deployment order
//! (derived from the resource list). Instead of guarding every edit, the
//! tool repairs these collections at step boundaries:
//!
//! 1. **Resource synchronization**: a count mismatch rebuilds the list
//! 2. **Order synchronization**: a drifted order is reset to declaration order
//! 3. **Detail scaffolding**: resources get an empty details block exactly once
//!
//! Repairs are strict no-ops when nothing drifted, so user customization
//! survives every revisit of a step.
//!
//! ## Modules
//!
//! - [`plan`]: Plan aggregate, synchronization, detail editing, validation
//! - [`store`]: Plan file persistence and the portable JSON codec
//! - [`render`]: Projection of a plan into a deployment document
//! - [`session`]: Editing facade the CLI drives
//! - [`cli`]: Command-line interface
//! - [`error`]: Error taxonomy
//!
//! ## Plan document
//!
//! ```json
//! {
//!   "projectName": "checkout",
//!   "environment": "production",
//!   "estimatedTime": 45,
//!   "serverCount": 2,
//!   "deploymentDate": "2026-09-01",
//!   "manager": "J. Doe",
//!   "servers": [
//!     { "id": 1, "name": "orders db", "type": "db" },
//!     { "id": 2, "name": "api gateway", "type": "api" }
//!   ],
//!   "deploymentOrder": [1, 2]
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod error;
pub mod plan;
pub mod render;
pub mod session;
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use error::{EditError, PlanwrightError, Result, StoreError};
pub use plan::{
    DetailEditor, Environment, OrderingSynchronizer, Plan, PlanHasher, PlanValidator, Resource,
    ResourceKind, ResourceProvisioner, ValidationResult,
};
pub use render::{DocumentRenderer, DocumentTree};
pub use session::PlanSession;
pub use store::{PlanCodec, PlanStore};
