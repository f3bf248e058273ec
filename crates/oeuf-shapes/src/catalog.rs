use std::collections::HashSet;
use std::path::Path;

use oeuf_geom::Vec3;

use crate::config::{ShapeVariantDef, ShapesConfig};
use crate::database::{
    FaceDescriptor, ROTATION_LIMIT, SHAPE_TYPE_LIMIT, ShapeDatabase, ShapeKey, ShapeVariant,
};
use crate::error::{ShapeConfigError, VariantRef};
use crate::face::FaceDir;
use crate::occupancy::{OccupancyClass, OccupancyMatcher};
use crate::uv::UvPatternTable;

/// Everything the chunk mesher reads: variants, UV patterns and the fits table.
///
/// A catalog is immutable once built; reparsing produces a new one.
#[derive(Clone, Debug, Default)]
pub struct ShapeCatalog {
    pub database: ShapeDatabase,
    pub uv_patterns: UvPatternTable,
    pub matcher: OccupancyMatcher,
}

impl ShapeCatalog {
    /// A catalog with no variants; every voxel meshed against it is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ShapeConfigError> {
        Self::build(&ShapesConfig::from_toml_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ShapeConfigError> {
        Self::build(&ShapesConfig::from_path(path)?)
    }

    /// Validates `cfg` and builds the lookup tables in one pass.
    pub fn build(cfg: &ShapesConfig) -> Result<Self, ShapeConfigError> {
        let uv_patterns = UvPatternTable::from_map(&cfg.uv_patterns);
        let mut database = ShapeDatabase::new();
        let mut missing_patterns: HashSet<&str> = HashSet::new();

        for def in &cfg.shapes {
            let (key, variant) = compile_variant(def, &uv_patterns, &mut missing_patterns)?;
            if database.insert(key, variant).is_some() {
                return Err(ShapeConfigError::DuplicateVariant(variant_ref(def)));
            }
        }

        for name in &missing_patterns {
            log::warn!("uv pattern '{}' is not defined; faces using it fall back to tile offsets", name);
        }
        log::debug!(
            "built shape catalog: {} variants, {} uv patterns",
            database.len(),
            uv_patterns.len()
        );

        Ok(ShapeCatalog {
            database,
            uv_patterns,
            matcher: OccupancyMatcher::new(),
        })
    }

    #[inline]
    pub fn fits(&self, subject: OccupancyClass, container: OccupancyClass) -> bool {
        self.matcher.fits(subject, container)
    }
}

fn variant_ref(def: &ShapeVariantDef) -> VariantRef {
    VariantRef {
        shape_type: def.shape_type,
        rotation: def.rotation,
        vflip: def.vflip,
    }
}

fn compile_variant<'a>(
    def: &'a ShapeVariantDef,
    uv_patterns: &UvPatternTable,
    missing_patterns: &mut HashSet<&'a str>,
) -> Result<(ShapeKey, ShapeVariant), ShapeConfigError> {
    let variant = variant_ref(def);
    if !(0..SHAPE_TYPE_LIMIT).contains(&def.shape_type) {
        return Err(ShapeConfigError::ShapeTypeOutOfRange(variant));
    }
    if !(0..ROTATION_LIMIT).contains(&def.rotation) {
        return Err(ShapeConfigError::RotationOutOfRange(variant));
    }
    let key = ShapeKey::pack(def.shape_type, def.rotation, def.vflip)
        .ok_or(ShapeConfigError::ShapeTypeOutOfRange(variant))?;

    let g = &def.geometry;
    let face_count = g.faces.len();
    if face_count > FaceDir::ALL.len() {
        return Err(ShapeConfigError::TooManyFaces {
            variant,
            count: face_count,
        });
    }
    for (field, found) in [
        ("uv_patterns", g.uv_patterns.len()),
        ("tile_voffsets", g.tile_voffsets.len()),
        ("occupy_face", g.occupy_face.len()),
        ("occupancy", g.occupancy.len()),
    ] {
        if found != face_count {
            return Err(ShapeConfigError::FaceFieldLength {
                variant,
                field,
                expected: face_count,
                found,
            });
        }
    }

    let vertex_count = g.vertices.len();
    let mut out = ShapeVariant {
        vertices: g.vertices.iter().copied().map(Vec3::from).collect(),
        faces: Default::default(),
    };
    for (face, indices) in g.faces.iter().enumerate() {
        if indices.len() % 3 != 0 {
            return Err(ShapeConfigError::RaggedTriangles {
                variant,
                face,
                len: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ShapeConfigError::IndexOutOfRange {
                variant,
                face,
                index,
                vertex_count,
            });
        }
        let occupancy =
            g.occupancy[face]
                .resolve()
                .ok_or_else(|| ShapeConfigError::UnknownOccupancy {
                    variant,
                    face,
                    value: g.occupancy[face].clone(),
                })?;
        let pattern_name = g.uv_patterns[face].as_str();
        let uv_pattern = uv_patterns.id_of(pattern_name);
        if uv_pattern.is_none() {
            missing_patterns.insert(pattern_name);
        }
        out.faces[face] = Some(FaceDescriptor {
            indices: indices.clone(),
            occupancy,
            occupy_face: g.occupy_face[face],
            uv_pattern,
            tile_voffset: g.tile_voffsets[face],
        });
    }
    Ok((key, out))
}
