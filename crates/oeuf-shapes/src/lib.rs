//! Shape variants, occupancy classes, UV patterns and the catalog that ties them together.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod face;
pub mod occupancy;
pub mod uv;

pub use catalog::ShapeCatalog;
pub use config::{ShapeVariantDef, ShapesConfig, VariantGeometryDef};
pub use database::{FaceDescriptor, SHAPE_KEY_SPACE, ShapeDatabase, ShapeKey, ShapeVariant};
pub use error::{ShapeConfigError, VariantRef};
pub use face::FaceDir;
pub use occupancy::{OccupancyClass, OccupancyMatcher, OccupancySpec};
pub use uv::{UvPattern, UvPatternId, UvPatternTable};
