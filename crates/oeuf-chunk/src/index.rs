use oeuf_geom::IVec3;

use crate::ChunkExtent;

const EMPTY: u32 = u32::MAX;

/// Dense chunk-local grid mapping each cell to the list index of the voxel in it.
///
/// The cell allocation is kept between [`rebuild`](Self::rebuild) calls.
#[derive(Clone, Debug, Default)]
pub struct SpatialVoxelIndex {
    extent: ChunkExtent,
    cells: Vec<u32>,
}

impl SpatialVoxelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn extent(&self) -> &ChunkExtent {
        &self.extent
    }

    /// Re-indexes `voxels` (world positions) for `extent`.
    ///
    /// Voxels outside the extent are left out. When two voxels share a cell the
    /// later one wins. Returns the number of voxels that landed in the grid.
    pub fn rebuild(&mut self, extent: ChunkExtent, voxels: &[IVec3]) -> usize {
        self.extent = extent;
        self.cells.clear();
        self.cells.resize(extent.volume(), EMPTY);
        let mut placed = 0;
        for (i, &pos) in voxels.iter().enumerate() {
            let Ok(id) = u32::try_from(i) else { break };
            if id == EMPTY {
                break;
            }
            if let Some(cell) = extent.linear_world(pos) {
                self.cells[cell] = id;
                placed += 1;
            }
        }
        placed
    }

    /// Voxel list index at a chunk-local position; `None` when empty or outside.
    #[inline]
    pub fn get(&self, local: IVec3) -> Option<usize> {
        let cell = self.extent.linear(local)?;
        match self.cells[cell] {
            EMPTY => None,
            id => Some(id as usize),
        }
    }

    #[inline]
    pub fn get_world(&self, world: IVec3) -> Option<usize> {
        self.get(self.extent.to_local(world)?)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }
}
