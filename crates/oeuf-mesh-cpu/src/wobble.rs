use fastnoise_lite::{FastNoiseLite, NoiseType};
use oeuf_geom::{Color, Vec3};

use crate::constants::{
    COLOR_EPSILON, DEFAULT_COLOR, WOBBLE_FREQUENCIES, WOBBLE_SCALE, WOBBLE_SEEDS,
};

/// Deterministic per-vertex displacement from three value-noise fields.
///
/// Output depends only on the local vertex and the voxel's world position, so
/// shared corners of neighboring voxels move together.
pub struct VertexWobbler {
    fields: [FastNoiseLite; 3],
}

impl VertexWobbler {
    pub fn new() -> Self {
        Self {
            fields: [0, 1, 2].map(|axis| value_field(WOBBLE_SEEDS[axis], WOBBLE_FREQUENCIES[axis])),
        }
    }

    /// Rebuilds the noise fields from the fixed seeds.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Displaced copy of shape-local vertex `p` for a voxel at world position `world`.
    ///
    /// Each axis moves by at most `WOBBLE_SCALE`.
    #[inline]
    pub fn displace(&self, p: Vec3, world: Vec3) -> Vec3 {
        let s = p + world;
        let [fx, fy, fz] = &self.fields;
        p + Vec3::new(sample(fx, s), sample(fy, s), sample(fz, s)) * WOBBLE_SCALE
    }

    /// Pseudo-normal color of a displaced vertex: direction remapped from [-1,1] to [0,1].
    #[inline]
    pub fn color(&self, wobbled: Vec3) -> Color {
        let len = wobbled.length();
        if !(len > COLOR_EPSILON && len.is_finite()) {
            return DEFAULT_COLOR;
        }
        let n = wobbled / len;
        Color::rgb((n.x + 1.0) * 0.5, (n.y + 1.0) * 0.5, (n.z + 1.0) * 0.5)
    }

    /// Fills `positions` and `colors` with the wobbled shape vertices of one voxel.
    pub fn wobble_into(
        &self,
        vertices: &[Vec3],
        world: Vec3,
        positions: &mut Vec<Vec3>,
        colors: &mut Vec<Color>,
    ) {
        positions.clear();
        colors.clear();
        for &v in vertices {
            let w = self.displace(v, world);
            positions.push(w);
            colors.push(self.color(w));
        }
    }
}

impl Default for VertexWobbler {
    fn default() -> Self {
        Self::new()
    }
}

// Far from the origin the scaled coordinate no longer fits the noise lattice
// and the interpolation diverges; such samples contribute nothing.
#[inline]
fn sample(field: &FastNoiseLite, s: Vec3) -> f32 {
    let n = field.get_noise_3d(s.x, s.y, s.z);
    if n.is_finite() { n.clamp(-1.0, 1.0) } else { 0.0 }
}

fn value_field(seed: i32, frequency: f32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed);
    n.set_noise_type(Some(NoiseType::Value));
    n.set_frequency(Some(frequency));
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_is_bounded_and_deterministic() {
        let a = VertexWobbler::new();
        let b = VertexWobbler::new();
        let p = Vec3::new(1.0, 0.0, 1.0);
        let w = Vec3::new(5.0, -3.0, 12.0);
        let da = a.displace(p, w);
        assert_eq!(da, b.displace(p, w));
        let d = da - p;
        for c in [d.x, d.y, d.z] {
            assert!(c.abs() <= WOBBLE_SCALE + 1e-6, "offset {c} exceeds scale");
        }
    }

    #[test]
    fn far_positions_stay_finite_and_bounded() {
        let w = VertexWobbler::new();
        let p = Vec3::new(1.0, 1.0, 0.0);
        for x in [1.0e5_f32, 1.0e6, 3.0e6, -2.0e6] {
            let d = w.displace(p, Vec3::new(x, 0.0, x)) - p;
            for c in [d.x, d.y, d.z] {
                assert!(c.is_finite(), "x={x}: offset {d:?}");
                assert!(c.abs() <= WOBBLE_SCALE + 1e-6, "x={x}: offset {d:?}");
            }
        }
    }

    #[test]
    fn shared_corners_move_together() {
        let w = VertexWobbler::new();
        // corner (1,0,0) of voxel at origin == corner (0,0,0) of voxel at x=1
        let a = w.displace(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO) - Vec3::new(1.0, 0.0, 0.0);
        let b = w.displace(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!((a - b).length() < 1e-5, "{a:?} vs {b:?}");
    }

    #[test]
    fn color_of_zero_vector_is_grey() {
        let w = VertexWobbler::new();
        assert_eq!(w.color(Vec3::ZERO), DEFAULT_COLOR);
        let c = w.color(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 1.0, 0.5, 1.0));
    }
}
