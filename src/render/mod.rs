//! Document rendering for deployment plans.
//!
//! Projects a plan into a [`DocumentTree`]: a metadata block plus one
//! resource block per deployment-order entry, carrying only the detail
//! sections that were actually filled in.

mod document;
mod renderer;

pub use document::{DocumentTree, MetadataBlock, ResourceBlock, ResourceSection};
pub use renderer::DocumentRenderer;
