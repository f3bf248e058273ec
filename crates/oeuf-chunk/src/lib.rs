//! Chunk extents, per-voxel properties and the dense spatial voxel index.
#![forbid(unsafe_code)]

mod index;

pub use index::SpatialVoxelIndex;

use oeuf_geom::IVec3;

/// Chunk position in chunk units; multiply by the chunk size for the world origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<[i32; 3]> for ChunkCoord {
    fn from(value: [i32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// Per-voxel attributes, paired by index with the voxel position list.
///
/// Fields stay signed so out-of-range values from external data survive
/// until the mesher skips them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelProperties {
    pub shape_type: i32,
    pub tx: i32,
    pub ty: i32,
    /// Quarter turns, 0..4.
    pub rotation: i32,
    pub vflip: bool,
    pub layer: i32,
}

impl VoxelProperties {
    #[inline]
    pub fn new(shape_type: i32, tx: i32, ty: i32) -> Self {
        Self {
            shape_type,
            tx,
            ty,
            ..Self::default()
        }
    }

    /// True if `layer` indexes a visible entry of `visibility`.
    #[inline]
    pub fn is_visible(&self, visibility: &[bool]) -> bool {
        usize::try_from(self.layer)
            .ok()
            .and_then(|l| visibility.get(l).copied())
            .unwrap_or(false)
    }
}

/// Chunk coordinate plus size; converts world positions to chunk-local ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkExtent {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl ChunkExtent {
    #[inline]
    pub fn new(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        Self { coord, sx, sy, sz }
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    #[inline]
    pub fn origin(&self) -> IVec3 {
        IVec3::new(
            self.coord.cx * self.sx as i32,
            self.coord.cy * self.sy as i32,
            self.coord.cz * self.sz as i32,
        )
    }

    /// World position relative to the origin; `None` if that leaves the i32 range.
    #[inline]
    pub fn to_local(&self, world: IVec3) -> Option<IVec3> {
        let axis = |w: i32, c: i32, size: usize| {
            i32::try_from(i64::from(w) - i64::from(c) * size as i64).ok()
        };
        Some(IVec3::new(
            axis(world.x, self.coord.cx, self.sx)?,
            axis(world.y, self.coord.cy, self.sy)?,
            axis(world.z, self.coord.cz, self.sz)?,
        ))
    }

    #[inline]
    pub fn contains_local(&self, local: IVec3) -> bool {
        local.x >= 0
            && local.y >= 0
            && local.z >= 0
            && (local.x as usize) < self.sx
            && (local.y as usize) < self.sy
            && (local.z as usize) < self.sz
    }

    #[inline]
    pub fn contains_world(&self, world: IVec3) -> bool {
        self.linear_world(world).is_some()
    }

    /// Linear cell index `x + y*sx + z*sx*sy`, or `None` outside the extent.
    #[inline]
    pub fn linear(&self, local: IVec3) -> Option<usize> {
        if !self.contains_local(local) {
            return None;
        }
        Some(local.x as usize + local.y as usize * self.sx + local.z as usize * self.sx * self.sy)
    }

    #[inline]
    pub fn linear_world(&self, world: IVec3) -> Option<usize> {
        self.linear(self.to_local(world)?)
    }
}
