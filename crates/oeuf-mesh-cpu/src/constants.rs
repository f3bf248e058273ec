//! Shared constants for oeuf-mesh-cpu. Centralizes common magic numbers.

use oeuf_geom::{Color, Vec3};

// Atlas layout
pub(crate) const TILE_PIXELS: f32 = 16.0; // texels per tile edge
pub(crate) const TILE_ROWS_PER_GROUP: i32 = 3; // tile rows per column group

// Wobble noise: one value-noise field per output axis
pub(crate) const WOBBLE_SCALE: f32 = 0.1;
pub(crate) const WOBBLE_SEEDS: [i32; 3] = [13_123_123, 123_123, 132];
pub(crate) const WOBBLE_FREQUENCIES: [f32; 3] = [12_424.12, 23_123.23, 4_123.412_4];

// Degenerate-vector thresholds
pub(crate) const NORMAL_EPSILON: f32 = 1e-6;
pub(crate) const COLOR_EPSILON: f32 = 1e-6;

pub(crate) const DEFAULT_NORMAL: Vec3 = Vec3::UP;
pub(crate) const DEFAULT_COLOR: Color = Color::rgb(0.5, 0.5, 0.5);

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1
