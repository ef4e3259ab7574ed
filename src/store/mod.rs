//! Plan document storage for planwright.
//!
//! This module provides the serialization gateway between plans and their
//! portable JSON form, plus the file-backed store the CLI persists to.

mod codec;
mod file;

pub use codec::PlanCodec;
pub use file::{DEFAULT_PLAN_FILE, PlanStore};
