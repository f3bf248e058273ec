use std::fmt;

use thiserror::Error;

use crate::occupancy::OccupancySpec;

/// Identifies the variant a validation error refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VariantRef {
    pub shape_type: i32,
    pub rotation: i32,
    pub vflip: bool,
}

impl fmt::Display for VariantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} (rotation {}, vflip {})",
            self.shape_type, self.rotation, self.vflip
        )
    }
}

/// Structural problems found while building a shape catalog.
#[derive(Debug, Error)]
pub enum ShapeConfigError {
    #[error("failed to read shape description: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse shape description: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}: shape_type must be in 0..16")]
    ShapeTypeOutOfRange(VariantRef),
    #[error("{0}: rotation must be in 0..4")]
    RotationOutOfRange(VariantRef),
    #[error("{0}: defined more than once")]
    DuplicateVariant(VariantRef),
    #[error("{variant}: {count} faces given, at most 6 are allowed")]
    TooManyFaces { variant: VariantRef, count: usize },
    #[error("{variant}: `{field}` has {found} entries for {expected} faces")]
    FaceFieldLength {
        variant: VariantRef,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{variant} face {face}: {len} indices is not a whole number of triangles")]
    RaggedTriangles {
        variant: VariantRef,
        face: usize,
        len: usize,
    },
    #[error("{variant} face {face}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        variant: VariantRef,
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("{variant} face {face}: unknown occupancy {value:?}")]
    UnknownOccupancy {
        variant: VariantRef,
        face: usize,
        value: OccupancySpec,
    },
}
