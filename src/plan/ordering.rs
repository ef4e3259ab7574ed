//! Deployment-order synchronization.
//!
//! The deployment order is a derived collection of resource ids. This
//! module repairs it whenever it stops being a permutation of the current
//! resources, and applies explicit reorder operations.

use tracing::{debug, info};

use crate::error::{EditError, Result};

use super::types::{Plan, ResourceRef};

/// Keeps the deployment order in sync with the plan's resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingSynchronizer;

impl OrderingSynchronizer {
    /// Creates a new synchronizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Repairs the deployment order so it is a permutation of the current
    /// resource ids.
    ///
    /// A missing, drifted, or duplicated order is reset to the resources'
    /// declaration order. An order that already is a permutation is kept
    /// exactly as the user arranged it.
    ///
    /// Returns true when a reset happened.
    pub fn reconcile(&self, plan: &mut Plan) -> bool {
        if Self::is_permutation(&plan.deployment_order, &plan.resource_ids()) {
            debug!(
                "Deployment order covers all {} resources, keeping it",
                plan.resources.len()
            );
            return false;
        }

        info!(
            "Resetting deployment order: {} entries for {} resources",
            plan.deployment_order.len(),
            plan.resources.len()
        );
        plan.deployment_order = plan.resources.iter().map(|r| ResourceRef::new(r.id)).collect();
        true
    }

    /// Moves the order entry at `from` so it ends up at position `to`.
    ///
    /// The entry is removed first and reinserted, so the entries between
    /// the two positions shift toward the gap.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error when either position is past the end
    /// of the order; the order is unchanged in that case.
    pub fn reorder(&self, plan: &mut Plan, from: usize, to: usize) -> Result<()> {
        let len = plan.deployment_order.len();
        if from >= len {
            return Err(EditError::out_of_range("deployment order", from, len).into());
        }
        if to >= len {
            return Err(EditError::out_of_range("deployment order", to, len).into());
        }

        let entry = plan.deployment_order.remove(from);
        plan.deployment_order.insert(to, entry);
        debug!("Moved resource {} from position {} to {}", entry, from, to);
        Ok(())
    }

    fn is_permutation(order: &[ResourceRef], ids: &[u32]) -> bool {
        if order.len() != ids.len() {
            return false;
        }
        let mut order_ids: Vec<u32> = order.iter().map(|r| r.id()).collect();
        let mut expected = ids.to_vec();
        order_ids.sort_unstable();
        expected.sort_unstable();
        order_ids == expected
    }
}
