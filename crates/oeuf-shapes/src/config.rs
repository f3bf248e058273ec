use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ShapeConfigError;
use crate::occupancy::OccupancySpec;

/// Geometry and per-face metadata of one variant, as found in shape descriptions.
///
/// All per-face arrays are parallel to `faces`; face `i` looks in direction
/// `FaceDir::ALL[i]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VariantGeometryDef {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<Vec<u32>>,
    pub uv_patterns: Vec<String>,
    pub tile_voffsets: Vec<i32>,
    pub occupy_face: Vec<bool>,
    pub occupancy: Vec<OccupancySpec>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ShapeVariantDef {
    pub shape_type: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub vflip: bool,
    #[serde(flatten)]
    pub geometry: VariantGeometryDef,
}

/// Full shape description: UV patterns plus every variant.
///
/// ```toml
/// [uv_patterns]
/// full = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
///
/// [[shape]]
/// shape_type = 0
/// rotation = 0
/// vflip = false
/// vertices = [[0.0, 0.0, 0.0], ...]
/// faces = [[0, 1, 2], ...]
/// uv_patterns = ["full", ...]
/// tile_voffsets = [0, ...]
/// occupy_face = [true, ...]
/// occupancy = ["quad", ...]
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ShapesConfig {
    #[serde(default)]
    pub uv_patterns: HashMap<String, Vec<[f32; 2]>>,
    #[serde(default, rename = "shape")]
    pub shapes: Vec<ShapeVariantDef>,
}

impl ShapesConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ShapeConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ShapeConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builds a config from the positional `[shape_type][rotation][vflip]` layout.
    pub fn from_nested(
        nested: Vec<Vec<Vec<VariantGeometryDef>>>,
        uv_patterns: HashMap<String, Vec<[f32; 2]>>,
    ) -> Self {
        let mut shapes = Vec::new();
        for (shape_type, rotations) in nested.into_iter().enumerate() {
            for (rotation, flips) in rotations.into_iter().enumerate() {
                for (flip, geometry) in flips.into_iter().enumerate() {
                    shapes.push(ShapeVariantDef {
                        shape_type: shape_type as i32,
                        rotation: rotation as i32,
                        // Entries past index 1 alias `true` and are rejected as duplicates.
                        vflip: flip != 0,
                        geometry,
                    });
                }
            }
        }
        Self {
            uv_patterns,
            shapes,
        }
    }
}
