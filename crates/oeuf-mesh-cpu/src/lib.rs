//! CPU chunk meshing: detailed per-face culling mesher and greedy proxy mesher.
#![forbid(unsafe_code)]

mod atlas;
mod constants;
mod detailed;
mod greedy;
mod mesh_build;
mod wobble;

use std::sync::Arc;

pub use atlas::AtlasLayout;
pub use detailed::{DetailedMesher, DetailedStats};
pub use greedy::GreedyMesher;
pub use mesh_build::{ChunkMeshArrays, SimplifiedMesh, face_normal};
pub use wobble::VertexWobbler;

use oeuf_chunk::{ChunkCoord, ChunkExtent, VoxelProperties};
use oeuf_geom::IVec3;
use oeuf_shapes::{ShapeCatalog, ShapeConfigError, ShapesConfig};

/// Chunk mesher façade: owns the catalog snapshot, atlas layout, noise fields
/// and all per-call scratch.
///
/// One instance serves one thread; run one per worker for parallel meshing.
pub struct VoxelMesher {
    catalog: Arc<ShapeCatalog>,
    atlas: AtlasLayout,
    wobbler: VertexWobbler,
    detailed: DetailedMesher,
    greedy: GreedyMesher,
}

impl VoxelMesher {
    /// A mesher with an empty catalog and zero UV deltas.
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(ShapeCatalog::empty()))
    }

    pub fn with_catalog(catalog: Arc<ShapeCatalog>) -> Self {
        Self {
            catalog,
            atlas: AtlasLayout::default(),
            wobbler: VertexWobbler::new(),
            detailed: DetailedMesher::new(),
            greedy: GreedyMesher::new(),
        }
    }

    /// Validates `cfg` and replaces the shape database and UV table wholesale.
    ///
    /// On error the previous catalog stays installed.
    pub fn parse_shapes(&mut self, cfg: &ShapesConfig) -> Result<(), ShapeConfigError> {
        let catalog = ShapeCatalog::build(cfg)?;
        log::info!(
            "parsed {} shape variants ({} uv patterns)",
            catalog.database.len(),
            catalog.uv_patterns.len()
        );
        self.catalog = Arc::new(catalog);
        Ok(())
    }

    pub fn set_catalog(&mut self, catalog: Arc<ShapeCatalog>) {
        self.catalog = catalog;
    }

    #[inline]
    pub fn catalog(&self) -> &Arc<ShapeCatalog> {
        &self.catalog
    }

    /// Sets the atlas size used for tile UV offsets; invalid sizes are ignored.
    pub fn set_texture_dimensions(&mut self, width: f32, height: f32) {
        match AtlasLayout::from_dimensions(width, height) {
            Some(layout) => self.atlas = layout,
            None => log::warn!(
                "ignoring texture dimensions {}x{}: both must be positive and finite",
                width,
                height
            ),
        }
    }

    #[inline]
    pub fn atlas(&self) -> AtlasLayout {
        self.atlas
    }

    #[inline]
    pub fn set_atlas(&mut self, atlas: AtlasLayout) {
        self.atlas = atlas;
    }

    /// Reinstalls the fixed wobble seeds. `_seed` is accepted for API
    /// compatibility and has no effect.
    pub fn initialize_noise(&mut self, _seed: i32) {
        self.wobbler.reset();
    }

    /// Detailed mesh of one chunk: culled, wobbled and textured triangles.
    pub fn generate_chunk_mesh(
        &mut self,
        chunk_coord: ChunkCoord,
        voxels: &[IVec3],
        voxel_properties: &[VoxelProperties],
        layer_visibility: &[bool],
        size_x: usize,
        size_y: usize,
        size_z: usize,
    ) -> ChunkMeshArrays {
        let extent = ChunkExtent::new(chunk_coord, size_x, size_y, size_z);
        let (arrays, stats) = self.detailed.mesh(
            &self.catalog,
            &self.atlas,
            &self.wobbler,
            extent,
            voxels,
            voxel_properties,
            layer_visibility,
        );
        log::debug!(
            "chunk {:?}: {} voxels, {} hidden, {} unresolved, {} faces ({} culled), {} triangles",
            chunk_coord,
            stats.voxels,
            stats.hidden,
            stats.unresolved,
            stats.faces_emitted,
            stats.faces_culled,
            stats.triangles
        );
        arrays.clone()
    }

    /// Greedy-merged proxy of the chunk's solid cells; `None` when nothing is exposed.
    pub fn generate_simplified_mesh(
        &mut self,
        chunk_coord: ChunkCoord,
        voxels: &[IVec3],
        size_x: usize,
        size_y: usize,
        size_z: usize,
    ) -> Option<SimplifiedMesh> {
        let extent = ChunkExtent::new(chunk_coord, size_x, size_y, size_z);
        let mesh = self.greedy.mesh(extent, voxels);
        log::debug!(
            "chunk {:?}: simplified mesh with {} triangles",
            chunk_coord,
            mesh.as_ref().map_or(0, SimplifiedMesh::triangle_count)
        );
        mesh
    }
}

impl Default for VoxelMesher {
    fn default() -> Self {
        Self::new()
    }
}
