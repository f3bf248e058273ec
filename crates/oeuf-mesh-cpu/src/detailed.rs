use oeuf_chunk::{ChunkExtent, SpatialVoxelIndex, VoxelProperties};
use oeuf_geom::{Color, IVec3, Vec3};
use oeuf_shapes::{FaceDir, ShapeCatalog, ShapeKey};

use crate::atlas::AtlasLayout;
use crate::mesh_build::{ChunkMeshArrays, face_normal};
use crate::wobble::VertexWobbler;

/// Counters from one detailed meshing pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailedStats {
    pub voxels: usize,
    pub hidden: usize,
    pub unresolved: usize,
    pub faces_emitted: usize,
    pub faces_culled: usize,
    pub triangles: usize,
}

/// Per-voxel, per-face culling mesher over shape variants.
///
/// Holds only scratch: the spatial index, resolved keys, one voxel's wobbled
/// vertices and the output arrays. None of it carries over between calls.
#[derive(Default)]
pub struct DetailedMesher {
    index: SpatialVoxelIndex,
    // None: invisible layer or no variant; such voxels neither render nor occlude
    keys: Vec<Option<ShapeKey>>,
    wobbled: Vec<Vec3>,
    colors: Vec<Color>,
    out: ChunkMeshArrays,
}

impl DetailedMesher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes one chunk into the internal buffers and returns them.
    ///
    /// Only the first `min(voxels.len(), props.len())` voxels are used.
    pub fn mesh(
        &mut self,
        catalog: &ShapeCatalog,
        atlas: &AtlasLayout,
        wobbler: &VertexWobbler,
        extent: ChunkExtent,
        voxels: &[IVec3],
        props: &[VoxelProperties],
        layer_visibility: &[bool],
    ) -> (&ChunkMeshArrays, DetailedStats) {
        let n = voxels.len().min(props.len());
        let voxels = &voxels[..n];
        let props = &props[..n];
        let db = &catalog.database;
        let mut stats = DetailedStats {
            voxels: n,
            ..DetailedStats::default()
        };

        self.out.clear_keep_capacity();
        self.index.rebuild(extent, voxels);
        self.keys.clear();
        self.keys.extend(props.iter().map(|p| {
            if !p.is_visible(layer_visibility) {
                return None;
            }
            db.resolve(p.shape_type, p.rotation, p.vflip)
        }));

        for (i, (&pos, prop)) in voxels.iter().zip(props).enumerate() {
            if !prop.is_visible(layer_visibility) {
                stats.hidden += 1;
                continue;
            }
            let Some(variant) = self.keys[i].and_then(|k| db.get(k)) else {
                log::trace!(
                    "skipping voxel {} at {:?}: no variant for shape {} rot {} vflip {}",
                    i,
                    pos,
                    prop.shape_type,
                    prop.rotation,
                    prop.vflip
                );
                stats.unresolved += 1;
                continue;
            };
            // None only when the position is too far from the chunk to express locally
            let local = extent.to_local(pos);
            let world = Vec3::from(pos);
            let mut wobbled_ready = false;

            for dir in FaceDir::ALL {
                let Some(face) = variant.face(dir) else {
                    continue;
                };
                if face.indices.is_empty() {
                    continue;
                }
                if face.is_cullable() {
                    let (dx, dy, dz) = dir.delta();
                    let neighbor_key = local
                        .and_then(|l| l.checked_add(IVec3::new(dx, dy, dz)))
                        .and_then(|n| self.index.get(n))
                        .and_then(|j| self.keys[j]);
                    if let Some(nk) = neighbor_key {
                        let cover = db.face_occupancy(nk, dir.opposite());
                        if catalog.fits(face.occupancy, cover) {
                            stats.faces_culled += 1;
                            continue;
                        }
                    }
                }

                if !wobbled_ready {
                    wobbler.wobble_into(&variant.vertices, world, &mut self.wobbled, &mut self.colors);
                    wobbled_ready = true;
                }

                let offset = atlas.tile_offset(prop.tx, prop.ty, face.tile_voffset);
                let pattern = face.uv_pattern.and_then(|id| catalog.uv_patterns.get(id));
                self.out.reserve_triangles(face.triangle_count());
                for (t, tri) in face.indices.chunks_exact(3).enumerate() {
                    let start = t * 3;
                    let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                    let (wa, wb, wc) = (self.wobbled[a], self.wobbled[b], self.wobbled[c]);
                    let uvs = match pattern {
                        Some(p) if p.len() > start + 2 => {
                            [p[start] + offset, p[start + 1] + offset, p[start + 2] + offset]
                        }
                        _ => [offset; 3],
                    };
                    self.out.push_triangle(
                        [wa + world, wb + world, wc + world],
                        face_normal(wa, wb, wc),
                        [self.colors[a], self.colors[b], self.colors[c]],
                        uvs,
                        i as u32,
                        dir.index() as u32,
                    );
                }
                stats.faces_emitted += 1;
            }
        }

        stats.triangles = self.out.triangle_count();
        (&self.out, stats)
    }
}
