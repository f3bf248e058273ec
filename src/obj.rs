use std::io::{self, Write};

use oeuf_mesh_cpu::{ChunkMeshArrays, SimplifiedMesh};

/// Writes the detailed mesh (and optionally the simplified one) as Wavefront OBJ.
///
/// Meshes are wound clockwise-front; OBJ expects counter-clockwise, so each
/// triangle is written as `(v0, v2, v1)`.
pub fn write_obj<W: Write>(
    out: &mut W,
    detailed: &ChunkMeshArrays,
    simplified: Option<&SimplifiedMesh>,
) -> io::Result<()> {
    writeln!(out, "# oeuf chunk mesh")?;
    writeln!(out, "o detailed")?;
    for v in &detailed.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for uv in &detailed.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &detailed.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in 0..detailed.triangle_count() {
        let [a, b, c] = [t * 3 + 1, t * 3 + 2, t * 3 + 3];
        writeln!(out, "f {a}/{a}/{a} {c}/{c}/{c} {b}/{b}/{b}")?;
    }

    let Some(simple) = simplified else {
        return Ok(());
    };
    // OBJ indices are global across objects
    let v_base = detailed.vertices.len();
    let n_base = detailed.normals.len();
    writeln!(out, "o simplified")?;
    for v in &simple.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &simple.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in 0..simple.triangle_count() {
        let [a, b, c] = [t * 3 + 1, t * 3 + 2, t * 3 + 3];
        writeln!(
            out,
            "f {}//{} {}//{} {}//{}",
            v_base + a,
            n_base + a,
            v_base + c,
            n_base + c,
            v_base + b,
            n_base + b
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oeuf_geom::{Color, Vec2, Vec3};

    #[test]
    fn writes_reversed_faces_with_global_indices() {
        let mut detailed = ChunkMeshArrays::default();
        detailed.push_triangle(
            [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)],
            Vec3::UP,
            [Color::default(); 3],
            [Vec2::ZERO; 3],
            0,
            4,
        );
        let mut simple = SimplifiedMesh::default();
        simple.push_quad(
            [
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            Vec3::new(0.0, 0.0, -1.0),
        );
        let mut buf = Vec::new();
        write_obj(&mut buf, &detailed, Some(&simple)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("f 1/1/1 3/3/3 2/2/2"));
        assert!(text.contains("o simplified"));
        assert!(text.contains("f 4//4 6//6 5//5"));
        assert!(text.contains("f 7//7 9//9 8//8"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 9);
    }
}
