use oeuf_geom::Vec3;

use crate::face::FaceDir;
use crate::occupancy::OccupancyClass;
use crate::uv::UvPatternId;

/// Shape types occupy the low 4 bits of a [`ShapeKey`].
pub const SHAPE_TYPE_LIMIT: i32 = 16;
/// Quarter turns occupy bits 4..6.
pub const ROTATION_LIMIT: i32 = 4;
/// Number of distinct packed keys (`shape_type | rot << 4 | vflip << 6`).
pub const SHAPE_KEY_SPACE: usize = 128;

const FACE_COUNT: usize = 6;

/// Packed `(shape_type, rotation, vflip)` used for direct table indexing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShapeKey(u8);

impl ShapeKey {
    /// Packs the triple, or `None` when any component is out of range.
    #[inline]
    pub fn pack(shape_type: i32, rotation: i32, vflip: bool) -> Option<ShapeKey> {
        if !(0..SHAPE_TYPE_LIMIT).contains(&shape_type) || !(0..ROTATION_LIMIT).contains(&rotation)
        {
            return None;
        }
        Some(ShapeKey(
            (shape_type as u8) | ((rotation as u8) << 4) | ((vflip as u8) << 6),
        ))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn shape_type(self) -> u8 {
        self.0 & 0x0F
    }

    #[inline]
    pub fn rotation(self) -> u8 {
        (self.0 >> 4) & 0x03
    }

    #[inline]
    pub fn vflip(self) -> bool {
        (self.0 >> 6) & 1 == 1
    }
}

/// One face of a shape variant.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDescriptor {
    /// Flattened triangle list, three vertex indices per triangle.
    pub indices: Vec<u32>,
    pub occupancy: OccupancyClass,
    /// Whether a covering neighbor may cull this face at all.
    pub occupy_face: bool,
    pub uv_pattern: Option<UvPatternId>,
    /// Extra tile rows added to the atlas V offset.
    pub tile_voffset: i32,
}

impl FaceDescriptor {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if this face takes part in neighbor culling.
    #[inline]
    pub fn is_cullable(&self) -> bool {
        self.occupy_face && self.occupancy != OccupancyClass::Empty
    }
}

/// Immutable local geometry for one `(shape_type, rotation, vflip)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeVariant {
    pub vertices: Vec<Vec3>,
    pub faces: [Option<FaceDescriptor>; FACE_COUNT],
}

impl ShapeVariant {
    #[inline]
    pub fn face(&self, dir: FaceDir) -> Option<&FaceDescriptor> {
        self.faces[dir.index()].as_ref()
    }

    /// Occupancy of the face in `dir`; a missing face covers nothing.
    #[inline]
    pub fn occupancy(&self, dir: FaceDir) -> OccupancyClass {
        self.face(dir)
            .map(|f| f.occupancy)
            .unwrap_or(OccupancyClass::Empty)
    }

    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .flatten()
            .map(FaceDescriptor::triangle_count)
            .sum()
    }
}

/// Fixed-size catalog of shape variants addressed by [`ShapeKey`].
#[derive(Clone, Debug)]
pub struct ShapeDatabase {
    variants: Vec<Option<ShapeVariant>>,
    // [key * 6 + face] -> occupancy, so neighbor checks skip the variant indirection
    face_occupancy: Vec<OccupancyClass>,
}

impl ShapeDatabase {
    pub fn new() -> Self {
        Self {
            variants: vec![None; SHAPE_KEY_SPACE],
            face_occupancy: vec![OccupancyClass::Empty; SHAPE_KEY_SPACE * FACE_COUNT],
        }
    }

    /// Stores `variant` under `key`, returning the entry it replaced.
    pub fn insert(&mut self, key: ShapeKey, variant: ShapeVariant) -> Option<ShapeVariant> {
        let base = key.index() * FACE_COUNT;
        for dir in FaceDir::ALL {
            self.face_occupancy[base + dir.index()] = variant.occupancy(dir);
        }
        self.variants[key.index()].replace(variant)
    }

    #[inline]
    pub fn get(&self, key: ShapeKey) -> Option<&ShapeVariant> {
        self.variants[key.index()].as_ref()
    }

    #[inline]
    pub fn contains(&self, key: ShapeKey) -> bool {
        self.variants[key.index()].is_some()
    }

    /// Resolves an unpacked triple; any out-of-range component yields `None`.
    #[inline]
    pub fn resolve(&self, shape_type: i32, rotation: i32, vflip: bool) -> Option<ShapeKey> {
        ShapeKey::pack(shape_type, rotation, vflip).filter(|k| self.contains(*k))
    }

    #[inline]
    pub fn face_occupancy(&self, key: ShapeKey, dir: FaceDir) -> OccupancyClass {
        self.face_occupancy[key.index() * FACE_COUNT + dir.index()]
    }

    pub fn len(&self) -> usize {
        self.variants.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &ShapeVariant)> + '_ {
        self.variants
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (ShapeKey(i as u8), v)))
    }
}

impl Default for ShapeDatabase {
    fn default() -> Self {
        Self::new()
    }
}
