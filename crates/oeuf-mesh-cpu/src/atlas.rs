use oeuf_geom::Vec2;

use crate::constants::{TILE_PIXELS, TILE_ROWS_PER_GROUP};

/// Per-tile UV steps for a texture atlas of 16px tiles.
///
/// Tile `(tx, ty)` starts at `du * tx + dv * (3 * ty + tile_voffset)`: each
/// `ty` selects a group of three tile rows and the face picks a row within it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AtlasLayout {
    pub du: Vec2,
    pub dv: Vec2,
}

impl AtlasLayout {
    /// Layout for a `width` x `height` atlas; `None` for non-positive or non-finite sizes.
    pub fn from_dimensions(width: f32, height: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return None;
        }
        Some(Self {
            du: Vec2::new(TILE_PIXELS / width, 0.0),
            dv: Vec2::new(0.0, TILE_PIXELS / height),
        })
    }

    #[inline]
    pub fn tile_offset(&self, tx: i32, ty: i32, tile_voffset: i32) -> Vec2 {
        self.du * tx as f32 + self.dv * (TILE_ROWS_PER_GROUP * ty + tile_voffset) as f32
    }
}
