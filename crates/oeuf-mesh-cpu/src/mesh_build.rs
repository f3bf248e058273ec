use oeuf_geom::{Aabb, Color, Vec2, Vec3};

use crate::constants::{DEFAULT_NORMAL, NORMAL_EPSILON};

/// Flat normal of a triangle whose corners are wound clockwise seen from the front.
#[inline]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    (-e1.cross(e2)).normalized_or(NORMAL_EPSILON, DEFAULT_NORMAL)
}

/// Unindexed triangle soup for one chunk: every triangle owns three consecutive
/// entries in each per-vertex array and one `(voxel, face)` pair in `tri_voxel_info`.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ChunkMeshArrays {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Color>,
    pub uvs: Vec<Vec2>,
    pub tri_voxel_info: Vec<u32>,
}

impl ChunkMeshArrays {
    /// Clears all arrays but retains capacity for reuse across calls.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.colors.clear();
        self.uvs.clear();
        self.tri_voxel_info.clear();
    }

    #[inline]
    pub fn reserve_triangles(&mut self, n: usize) {
        self.vertices.reserve(n * 3);
        self.normals.reserve(n * 3);
        self.colors.reserve(n * 3);
        self.uvs.reserve(n * 3);
        self.tri_voxel_info.reserve(n * 2);
    }

    /// Appends one triangle with a flat `normal` on all three corners.
    pub fn push_triangle(
        &mut self,
        pos: [Vec3; 3],
        normal: Vec3,
        colors: [Color; 3],
        uvs: [Vec2; 3],
        voxel_index: u32,
        face_index: u32,
    ) {
        self.vertices.extend_from_slice(&pos);
        self.normals.extend_from_slice(&[normal; 3]);
        self.colors.extend_from_slice(&colors);
        self.uvs.extend_from_slice(&uvs);
        self.tri_voxel_info.extend_from_slice(&[voxel_index, face_index]);
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `(voxel_index, face_index)` of triangle `tri`.
    #[inline]
    pub fn provenance(&self, tri: usize) -> Option<(u32, u32)> {
        let v = self.tri_voxel_info.get(tri * 2)?;
        let f = self.tri_voxel_info.get(tri * 2 + 1)?;
        Some((*v, *f))
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

/// Greedy-merged proxy mesh: triangle list with a flat normal per vertex.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct SimplifiedMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SimplifiedMesh {
    /// Appends the rectangle `p0 p1 p2 p3` as two triangles `(p0,p1,p2)`, `(p0,p2,p3)`.
    pub fn push_quad(&mut self, p: [Vec3; 4], normal: Vec3) {
        self.vertices
            .extend_from_slice(&[p[0], p[1], p[2], p[0], p[2], p[3]]);
        self.normals.extend_from_slice(&[normal; 6]);
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_winding_faces_outward() {
        // seen from +Y, (0,1,0) -> (1,1,0) -> (1,1,1) runs clockwise
        let n = face_normal(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        assert_eq!(n, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn degenerate_triangle_gets_default_normal() {
        let p = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(face_normal(p, p, p), DEFAULT_NORMAL);
        let q = Vec3::new(3.0, 3.0, 4.0);
        let r = Vec3::new(4.0, 3.0, 4.0);
        assert_eq!(face_normal(p, q, r), DEFAULT_NORMAL);
    }

    #[test]
    fn push_triangle_keeps_arrays_parallel() {
        let mut m = ChunkMeshArrays::default();
        m.push_triangle([Vec3::ZERO; 3], Vec3::UP, [Color::default(); 3], [Vec2::ZERO; 3], 7, 4);
        assert_eq!(m.triangle_count(), 1);
        assert_eq!(m.normals.len(), 3);
        assert_eq!(m.provenance(0), Some((7, 4)));
        assert_eq!(m.provenance(1), None);
        m.clear_keep_capacity();
        assert!(m.is_empty());
        assert!(m.vertices.capacity() >= 3);
    }
}
