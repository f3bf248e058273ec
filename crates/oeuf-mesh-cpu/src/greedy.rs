use oeuf_chunk::ChunkExtent;
use oeuf_geom::{IVec3, Vec3};

use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};
use crate::mesh_build::SimplifiedMesh;

// Local small bitset type
#[derive(Default, Clone, Debug)]
struct Bitset {
    data: Vec<u64>,
}
impl Bitset {
    /// Clears and resizes to hold `nbits`, keeping the allocation.
    fn reset(&mut self, nbits: usize) {
        self.data.clear();
        self.data.resize((nbits + WORD_INDEX_MASK) / BITS_PER_WORD, 0);
    }
    #[inline]
    fn set(&mut self, i: usize, v: bool) {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        if v {
            self.data[w] |= 1u64 << b;
        } else {
            self.data[w] &= !(1u64 << b);
        }
    }
    #[inline]
    fn get(&self, i: usize) -> bool {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        ((self.data[w] >> b) & 1) != 0
    }
    #[inline]
    fn any(&self) -> bool {
        self.data.iter().any(|&w| w != 0)
    }
}

#[inline]
fn unit(axis: usize) -> Vec3 {
    match axis {
        0 => Vec3::new(1.0, 0.0, 0.0),
        1 => Vec3::new(0.0, 1.0, 0.0),
        _ => Vec3::new(0.0, 0.0, 1.0),
    }
}

/// Binary greedy mesher: solid/empty grid in, maximal axis-aligned quads out.
///
/// For axis `a` the mask plane spans `u = (a+1)%3` (inner) and `v = (a+2)%3`
/// (outer). Faces in the `+a` direction sit on plane `slice + 1`, faces in the
/// `-a` direction on plane `slice`.
#[derive(Default, Clone, Debug)]
pub struct GreedyMesher {
    solid: Bitset,
    mask: Bitset,
    dims: [usize; 3],
}

impl GreedyMesher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn cell(&self, c: [usize; 3]) -> usize {
        c[0] + c[1] * self.dims[0] + c[2] * self.dims[0] * self.dims[1]
    }

    fn rasterize(&mut self, extent: &ChunkExtent, voxels: &[IVec3]) -> usize {
        self.dims = [extent.sx, extent.sy, extent.sz];
        self.solid.reset(extent.volume());
        let mut filled = 0;
        for &pos in voxels {
            if let Some(i) = extent.linear_world(pos) {
                self.solid.set(i, true);
                filled += 1;
            }
        }
        filled
    }

    /// Merged surface of every voxel inside `extent`; `None` when nothing is exposed.
    pub fn mesh(&mut self, extent: ChunkExtent, voxels: &[IVec3]) -> Option<SimplifiedMesh> {
        if self.rasterize(&extent, voxels) == 0 {
            return None;
        }
        let origin = Vec3::from(extent.origin());
        let mut out = SimplifiedMesh::default();

        for a in 0..3 {
            let (ua, va) = ((a + 1) % 3, (a + 2) % 3);
            let (da, du, dv) = (self.dims[a], self.dims[ua], self.dims[va]);
            for positive in [true, false] {
                for slice in 0..da {
                    if !self.build_mask(a, slice, positive) {
                        continue;
                    }
                    let plane = if positive { slice + 1 } else { slice };
                    let normal = if positive { unit(a) } else { -unit(a) };
                    for v in 0..dv {
                        let mut u = 0;
                        while u < du {
                            if !self.mask.get(v * du + u) {
                                u += 1;
                                continue;
                            }
                            let (w, h) = self.take_rect(u, v, du, dv);
                            let mut base = origin;
                            base += unit(a) * plane as f32;
                            base += unit(ua) * u as f32;
                            base += unit(va) * v as f32;
                            let du_vec = unit(ua) * w as f32;
                            let dv_vec = unit(va) * h as f32;
                            let (p0, p1, p2, p3) =
                                (base, base + du_vec, base + du_vec + dv_vec, base + dv_vec);
                            // Clockwise seen from the side the normal points to.
                            if positive {
                                out.push_quad([p0, p3, p2, p1], normal);
                            } else {
                                out.push_quad([p0, p1, p2, p3], normal);
                            }
                            u += w;
                        }
                    }
                }
            }
        }

        if out.is_empty() { None } else { Some(out) }
    }

    /// Fills the (u, v) exposure mask for one slice; returns whether any cell is set.
    fn build_mask(&mut self, a: usize, slice: usize, positive: bool) -> bool {
        let (ua, va) = ((a + 1) % 3, (a + 2) % 3);
        let (da, du, dv) = (self.dims[a], self.dims[ua], self.dims[va]);
        let next = if positive {
            (slice + 1 < da).then_some(slice + 1)
        } else {
            slice.checked_sub(1)
        };
        self.mask.reset(du * dv);
        for v in 0..dv {
            for u in 0..du {
                let mut c = [0usize; 3];
                c[a] = slice;
                c[ua] = u;
                c[va] = v;
                if !self.solid.get(self.cell(c)) {
                    continue;
                }
                let exposed = match next {
                    None => true,
                    Some(n) => {
                        c[a] = n;
                        !self.solid.get(self.cell(c))
                    }
                };
                if exposed {
                    self.mask.set(v * du + u, true);
                }
            }
        }
        self.mask.any()
    }

    /// Grows the rectangle at `(u, v)` along u then v, clears it and returns `(w, h)`.
    fn take_rect(&mut self, u: usize, v: usize, du: usize, dv: usize) -> (usize, usize) {
        let mut w = 1;
        while u + w < du && self.mask.get(v * du + u + w) {
            w += 1;
        }
        let mut h = 1;
        'grow: while v + h < dv {
            for k in 0..w {
                if !self.mask.get((v + h) * du + u + k) {
                    break 'grow;
                }
            }
            h += 1;
        }
        for row in v..v + h {
            for k in u..u + w {
                self.mask.set(row * du + k, false);
            }
        }
        (w, h)
    }
}
