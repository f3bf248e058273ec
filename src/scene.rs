use std::error::Error;
use std::fs;
use std::path::Path;

use oeuf_chunk::{ChunkCoord, VoxelProperties};
use oeuf_geom::IVec3;
use serde::Deserialize;

fn default_size() -> [usize; 3] {
    [16, 16, 16]
}

fn default_layers() -> Vec<bool> {
    vec![true]
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VoxelDef {
    pub pos: [i32; 3],
    #[serde(default)]
    pub shape: i32,
    #[serde(default)]
    pub tile: [i32; 2],
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub vflip: bool,
    #[serde(default)]
    pub layer: i32,
}

/// One chunk's worth of voxels as described in a scene file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scene {
    #[serde(default)]
    pub chunk: [i32; 3],
    #[serde(default = "default_size")]
    pub size: [usize; 3],
    #[serde(default = "default_layers")]
    pub layers: Vec<bool>,
    #[serde(default, rename = "voxel")]
    pub voxels: Vec<VoxelDef>,
}

impl Scene {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read scene {}: {}", path.display(), e))?;
        Self::from_toml_str(&text)
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        ChunkCoord::from(self.chunk)
    }

    /// Parallel position and property lists in file order.
    pub fn voxel_lists(&self) -> (Vec<IVec3>, Vec<VoxelProperties>) {
        self.voxels
            .iter()
            .map(|v| {
                (
                    IVec3::from(v.pos),
                    VoxelProperties {
                        shape_type: v.shape,
                        tx: v.tile[0],
                        ty: v.tile[1],
                        rotation: v.rotation,
                        vflip: v.vflip,
                        layer: v.layer,
                    },
                )
            })
            .unzip()
    }
}
