//! Shared catalog snapshots and pooled meshers for parallel chunk meshing.
#![forbid(unsafe_code)]

mod catalog;
mod mesher_pool;

pub use catalog::{CatalogSnapshot, SharedCatalog};
pub use mesher_pool::{MesherGuard, MesherPool};
