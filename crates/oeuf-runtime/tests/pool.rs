use std::sync::Arc;

use oeuf_chunk::{ChunkCoord, VoxelProperties};
use oeuf_geom::IVec3;
use oeuf_mesh_cpu::{AtlasLayout, VoxelMesher};
use oeuf_runtime::{MesherPool, SharedCatalog};
use oeuf_shapes::{ShapeCatalog, ShapesConfig};
use rayon::prelude::*;

fn basic_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/shapes/basic.toml")
}

fn shared() -> Arc<SharedCatalog> {
    Arc::new(SharedCatalog::new(ShapeCatalog::from_path(basic_path()).unwrap()))
}

fn floor(coord: ChunkCoord) -> (Vec<IVec3>, Vec<VoxelProperties>) {
    let (ox, oz) = (coord.cx * 8, coord.cz * 8);
    let mut voxels = Vec::new();
    let mut props = Vec::new();
    for z in 0..8 {
        for x in 0..8 {
            voxels.push(IVec3::new(ox + x, 0, oz + z));
            props.push(VoxelProperties::new((x + z) % 2, x, z));
        }
    }
    (voxels, props)
}

#[test]
fn snapshot_versions_increase_and_failed_replace_keeps_catalog() {
    let cat = SharedCatalog::empty();
    assert_eq!(cat.version(), 0);
    assert!(cat.snapshot().catalog.database.is_empty());

    let v1 = cat.reload_from_path(basic_path()).unwrap();
    assert_eq!(v1, 1);
    let snap = cat.snapshot();
    assert_eq!(snap.version, 1);
    assert_eq!(snap.catalog.database.len(), 2);

    let bad = ShapesConfig::from_toml_str(
        r#"
        [[shape]]
        shape_type = 99
        vertices = []
        faces = []
        uv_patterns = []
        tile_voffsets = []
        occupy_face = []
        occupancy = []
        "#,
    )
    .unwrap();
    assert!(cat.replace(&bad).is_err());
    assert!(cat.reload_from_path("/no/such/file.toml").is_err());
    assert_eq!(cat.version(), 1);
    assert!(Arc::ptr_eq(&cat.snapshot().catalog, &snap.catalog));

    assert_eq!(cat.replace(&ShapesConfig::default()).unwrap(), 2);
    assert!(cat.snapshot().catalog.database.is_empty());
    // the old snapshot is still intact for whoever holds it
    assert_eq!(snap.catalog.database.len(), 2);
}

#[test]
fn guards_are_refreshed_to_latest_catalog_and_atlas() {
    let cat = Arc::new(SharedCatalog::empty());
    let pool = MesherPool::new(cat.clone(), 1);
    let (voxels, props) = floor(ChunkCoord::new(0, 0, 0));
    {
        let mut m = pool.acquire();
        assert_eq!(m.catalog_version(), 0);
        let out = m.generate_chunk_mesh(ChunkCoord::new(0, 0, 0), &voxels, &props, &[true], 8, 8, 8);
        assert!(out.is_empty());
    }

    cat.reload_from_path(basic_path()).unwrap();
    pool.set_texture_dimensions(128.0, 128.0);
    pool.set_texture_dimensions(-1.0, 128.0);
    {
        let mut m = pool.acquire();
        assert_eq!(m.catalog_version(), 1);
        assert_eq!(m.atlas(), AtlasLayout::from_dimensions(128.0, 128.0).unwrap());
        let out = m.generate_chunk_mesh(ChunkCoord::new(0, 0, 0), &voxels, &props, &[true], 8, 8, 8);
        assert!(!out.is_empty());
    }
    assert_eq!(pool.allocated(), 1);
}

#[test]
fn pool_creates_at_most_capacity() {
    let pool = MesherPool::new(shared(), 2);
    let a = pool.acquire();
    let b = pool.acquire();
    assert_eq!(pool.allocated(), 2);
    drop(a);
    let _c = pool.acquire();
    assert_eq!(pool.allocated(), 2);
    drop(b);
}

#[test]
fn parallel_meshing_matches_sequential() {
    let cat = shared();
    let pool = MesherPool::with_capacity_from_workers(cat.clone(), 3);
    pool.set_texture_dimensions(256.0, 256.0);
    let coords: Vec<ChunkCoord> = (0..4)
        .flat_map(|cx| (0..4).map(move |cz| ChunkCoord::new(cx, 0, cz)))
        .collect();

    let parallel: Vec<_> = coords
        .par_iter()
        .map(|&coord| {
            let (voxels, props) = floor(coord);
            let mut m = pool.acquire();
            let detailed = m.generate_chunk_mesh(coord, &voxels, &props, &[true], 8, 8, 8);
            let simplified = m.generate_simplified_mesh(coord, &voxels, 8, 8, 8);
            (detailed, simplified)
        })
        .collect();
    assert!(pool.allocated() <= 3);

    let mut seq = VoxelMesher::with_catalog(cat.snapshot().catalog);
    seq.set_texture_dimensions(256.0, 256.0);
    for (coord, (detailed, simplified)) in coords.iter().zip(&parallel) {
        let (voxels, props) = floor(*coord);
        assert_eq!(
            &seq.generate_chunk_mesh(*coord, &voxels, &props, &[true], 8, 8, 8),
            detailed
        );
        assert_eq!(&seq.generate_simplified_mesh(*coord, &voxels, 8, 8, 8), simplified);
    }
}
