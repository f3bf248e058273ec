//! `oeuf`: load a shape catalog and a scene, mesh the chunk, export OBJ.
#![forbid(unsafe_code)]

mod obj;
mod scene;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use oeuf_mesh_cpu::VoxelMesher;
use oeuf_runtime::{MesherPool, SharedCatalog};
use oeuf_shapes::{FaceDir, ShapeCatalog};

use crate::scene::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Voxel chunk mesher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mesh one scene chunk and report statistics
    Mesh(MeshArgs),
    /// Validate a shape catalog and print a summary
    Check {
        /// Shape catalog (TOML)
        #[arg(long)]
        shapes: PathBuf,
    },
    /// Re-mesh whenever the shape catalog changes on disk
    Watch(MeshArgs),
}

#[derive(Args, Debug)]
struct MeshArgs {
    /// Shape catalog (TOML)
    #[arg(long)]
    shapes: PathBuf,

    /// Scene describing one chunk of voxels (TOML)
    #[arg(long)]
    scene: PathBuf,

    /// Texture atlas size in pixels, e.g. 256x256
    #[arg(long, value_parser = parse_atlas)]
    atlas: Option<(f32, f32)>,

    /// Also build the greedy-merged proxy mesh
    #[arg(long)]
    simplified: bool,

    /// Write the result as Wavefront OBJ
    #[arg(long)]
    obj: Option<PathBuf>,
}

fn parse_atlas(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
        return Err(format!("atlas size must be positive, got {w}x{h}"));
    }
    Ok((w, h))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Mesh(args) => run_mesh(&args),
        Command::Check { shapes } => run_check(&shapes),
        Command::Watch(args) => run_watch(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_check(shapes: &Path) -> Result<(), Box<dyn Error>> {
    let catalog = ShapeCatalog::from_path(shapes)?;
    println!(
        "{}: {} variants, {} uv patterns",
        shapes.display(),
        catalog.database.len(),
        catalog.uv_patterns.len()
    );
    for (key, variant) in catalog.database.iter() {
        let faces: Vec<String> = FaceDir::ALL
            .iter()
            .filter_map(|&d| {
                variant
                    .face(d)
                    .map(|f| format!("{:?}:{}/{:?}", d, f.triangle_count(), f.occupancy))
            })
            .collect();
        println!(
            "  shape {} rot {} vflip {}: {} vertices, {} triangles [{}]",
            key.shape_type(),
            key.rotation(),
            key.vflip(),
            variant.vertices.len(),
            variant.triangle_count(),
            faces.join(" ")
        );
    }
    Ok(())
}

fn mesh_scene(mesher: &mut VoxelMesher, scene: &Scene, args: &MeshArgs) -> Result<(), Box<dyn Error>> {
    let (voxels, props) = scene.voxel_lists();
    let [sx, sy, sz] = scene.size;
    let t0 = Instant::now();
    let detailed =
        mesher.generate_chunk_mesh(scene.coord(), &voxels, &props, &scene.layers, sx, sy, sz);
    let simplified = if args.simplified {
        mesher.generate_simplified_mesh(scene.coord(), &voxels, sx, sy, sz)
    } else {
        None
    };
    log::info!(
        "chunk {:?}: {} voxels -> {} triangles{} in {:.2?}",
        scene.coord(),
        voxels.len(),
        detailed.triangle_count(),
        simplified
            .as_ref()
            .map(|s| format!(", simplified {} triangles", s.triangle_count()))
            .unwrap_or_default(),
        t0.elapsed()
    );
    if let Some(bb) = detailed.bounds() {
        log::debug!("bounds {:?} .. {:?}", bb.min, bb.max);
    }
    if let Some(path) = &args.obj {
        let file = File::create(path)
            .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
        let mut w = BufWriter::new(file);
        obj::write_obj(&mut w, &detailed, simplified.as_ref())?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn run_mesh(args: &MeshArgs) -> Result<(), Box<dyn Error>> {
    let catalog = ShapeCatalog::from_path(&args.shapes)?;
    let scene = Scene::from_path(&args.scene)?;
    let mut mesher = VoxelMesher::with_catalog(Arc::new(catalog));
    if let Some((w, h)) = args.atlas {
        mesher.set_texture_dimensions(w, h);
    }
    mesh_scene(&mut mesher, &scene, args)
}

fn run_watch(args: &MeshArgs) -> Result<(), Box<dyn Error>> {
    use notify::{EventKind, RecursiveMode, Watcher};

    let shared = Arc::new(SharedCatalog::new(ShapeCatalog::from_path(&args.shapes)?));
    let pool = MesherPool::new(shared.clone(), 1);
    if let Some((w, h)) = args.atlas {
        pool.set_texture_dimensions(w, h);
    }
    let scene = Scene::from_path(&args.scene)?;
    mesh_scene(&mut pool.acquire(), &scene, args)?;

    let (tx, rx) = mpsc::channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                    let _ = tx.send(());
                }
                _ => {}
            }
        }
    })?;
    watcher.watch(&args.shapes, RecursiveMode::NonRecursive)?;
    log::info!("watching {} (ctrl-c to stop)", args.shapes.display());

    while rx.recv().is_ok() {
        // editors tend to emit several events per save
        while rx.recv_timeout(Duration::from_millis(100)).is_ok() {}
        if shared.reload_from_path(&args.shapes).is_err() {
            continue;
        }
        mesh_scene(&mut pool.acquire(), &scene, args)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_sizes_parse() {
        assert_eq!(parse_atlas("256x128"), Ok((256.0, 128.0)));
        assert_eq!(parse_atlas("64X64"), Ok((64.0, 64.0)));
        assert!(parse_atlas("256").is_err());
        assert!(parse_atlas("0x16").is_err());
        assert!(parse_atlas("axb").is_err());
    }

    #[test]
    fn cli_parses_mesh_flags() {
        let cli = Cli::try_parse_from([
            "oeuf",
            "mesh",
            "--shapes",
            "s.toml",
            "--scene",
            "c.toml",
            "--atlas",
            "512x256",
            "--simplified",
        ])
        .unwrap();
        match cli.command {
            Command::Mesh(a) => {
                assert_eq!(a.atlas, Some((512.0, 256.0)));
                assert!(a.simplified);
                assert!(a.obj.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sample_scene_meshes_and_exports() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let out = std::env::temp_dir().join(format!("oeuf-test-{}.obj", std::process::id()));
        let args = MeshArgs {
            shapes: root.join("assets/shapes/basic.toml"),
            scene: root.join("assets/scenes/steps.toml"),
            atlas: Some((256.0, 256.0)),
            simplified: true,
            obj: Some(out.clone()),
        };
        run_mesh(&args).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let _ = std::fs::remove_file(&out);
        assert!(text.contains("o detailed"));
        assert!(text.contains("o simplified"));
        assert!(text.lines().any(|l| l.starts_with("f ")));
    }
}
