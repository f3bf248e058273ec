use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};

use oeuf_chunk::{ChunkCoord, VoxelProperties};
use oeuf_geom::IVec3;
use oeuf_mesh_cpu::VoxelMesher;
use oeuf_shapes::ShapeCatalog;

const SIZE: usize = 32;

fn load_catalog() -> Arc<ShapeCatalog> {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    Arc::new(ShapeCatalog::from_path(root.join("../../assets/shapes/basic.toml")).unwrap())
}

/// Rolling terrain: a height field of cubes with wedges on every fourth column.
fn terrain() -> (Vec<IVec3>, Vec<VoxelProperties>) {
    let mut voxels = Vec::new();
    let mut props = Vec::new();
    for z in 0..SIZE as i32 {
        for x in 0..SIZE as i32 {
            let h = 4 + ((x as f32 * 0.3).sin() * 3.0 + (z as f32 * 0.2).cos() * 3.0) as i32;
            for y in 0..h {
                voxels.push(IVec3::new(x, y, z));
                let shape = if y == h - 1 && (x + z) % 4 == 0 { 1 } else { 0 };
                props.push(VoxelProperties::new(shape, x % 4, z % 4));
            }
        }
    }
    (voxels, props)
}

fn solid_block() -> Vec<IVec3> {
    let mut voxels = Vec::with_capacity(SIZE * SIZE * SIZE);
    for z in 0..SIZE as i32 {
        for y in 0..SIZE as i32 {
            for x in 0..SIZE as i32 {
                voxels.push(IVec3::new(x, y, z));
            }
        }
    }
    voxels
}

fn bench_detailed_terrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("detailed_terrain");
    let (voxels, props) = terrain();
    let mut mesher = VoxelMesher::with_catalog(load_catalog());
    mesher.set_texture_dimensions(256.0, 256.0);
    group.bench_function("terrain_32x32x32", |b| {
        b.iter(|| {
            let out = mesher.generate_chunk_mesh(
                ChunkCoord::new(0, 0, 0),
                &voxels,
                &props,
                &[true],
                SIZE,
                SIZE,
                SIZE,
            );
            black_box(out);
        })
    });
    group.finish();
}

fn bench_detailed_solid(c: &mut Criterion) {
    let mut group = c.benchmark_group("detailed_solid");
    let voxels = solid_block();
    let props = vec![VoxelProperties::new(0, 0, 0); voxels.len()];
    let mut mesher = VoxelMesher::with_catalog(load_catalog());
    group.bench_function("solid_32x32x32", |b| {
        b.iter(|| {
            let out = mesher.generate_chunk_mesh(
                ChunkCoord::new(0, 0, 0),
                &voxels,
                &props,
                &[true],
                SIZE,
                SIZE,
                SIZE,
            );
            black_box(out);
        })
    });
    group.finish();
}

fn bench_simplified(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplified");
    let (voxels, _) = terrain();
    let solid = solid_block();
    let mut mesher = VoxelMesher::new();
    group.bench_function("terrain_32x32x32", |b| {
        b.iter(|| {
            black_box(mesher.generate_simplified_mesh(
                ChunkCoord::new(0, 0, 0),
                &voxels,
                SIZE,
                SIZE,
                SIZE,
            ));
        })
    });
    group.bench_function("solid_32x32x32", |b| {
        b.iter(|| {
            black_box(mesher.generate_simplified_mesh(
                ChunkCoord::new(0, 0, 0),
                &solid,
                SIZE,
                SIZE,
                SIZE,
            ));
        })
    });
    group.finish();
}

fn long_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3))
        .sample_size(30)
}

criterion_group! {
    name = benches;
    config = long_config();
    targets =
        bench_detailed_terrain,
        bench_detailed_solid,
        bench_simplified
}
criterion_main!(benches);
