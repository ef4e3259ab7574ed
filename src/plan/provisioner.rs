//! Resource provisioning for deployment plans.
//!
//! The resource list is derived from the declared resource count. This
//! module repairs the list whenever the two disagree and applies
//! per-resource edits by id.

use tracing::{debug, info};

use crate::error::{EditError, Result};

use super::types::{Plan, Resource, ResourceKind};

/// Reconciles the plan's resource list against its declared count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceProvisioner;

impl ResourceProvisioner {
    /// Creates a new provisioner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Repairs the resource list so it matches the declared count.
    ///
    /// A count mismatch rebuilds the whole list from scratch: ids
    /// `1..=count`, default names and types, no details. Edits made to the
    /// previous resources do not survive the rebuild. When the lengths
    /// already agree the plan is not modified at all.
    ///
    /// Returns true when a rebuild happened.
    pub fn reconcile(&self, plan: &mut Plan) -> bool {
        let declared = plan.resource_count as usize;
        if plan.resources.len() == declared {
            debug!("Resource list matches declared count ({}), nothing to do", declared);
            return false;
        }

        info!(
            "Rebuilding resources: declared {}, found {}",
            declared,
            plan.resources.len()
        );
        plan.resources = (1..=plan.resource_count).map(Resource::provisioned).collect();
        true
    }

    /// Renames the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if no resource with that id exists.
    pub fn rename(&self, plan: &mut Plan, id: u32, name: impl Into<String>) -> Result<()> {
        let resource = plan.resource_mut(id).ok_or(EditError::UnknownResource { id })?;
        resource.name = name.into();
        debug!("Renamed resource {} to {:?}", id, resource.name);
        Ok(())
    }

    /// Changes the type of the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if no resource with that id exists.
    pub fn retype(&self, plan: &mut Plan, id: u32, kind: ResourceKind) -> Result<()> {
        let resource = plan.resource_mut(id).ok_or(EditError::UnknownResource { id })?;
        resource.kind = kind;
        debug!("Changed resource {} type to {}", id, kind);
        Ok(())
    }
}
