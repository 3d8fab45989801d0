//! Example: Export a saved planet mesh as Wavefront OBJ
//!
//! Usage: `cargo run --example export_obj -- <planet dir> [output.obj] [--normals]`
//!
//! Reads the mesh read-only: vertices become `v` records, per-face normals
//! `vn` records, and faces `f` records with 1-based indices.

use icosphere_planet::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

fn write_obj(mesh: &PlanetMesh, out: &mut impl Write, include_normals: bool) -> std::io::Result<()> {
    writeln!(out, "# Exported Planet Mesh")?;

    for v in mesh.vertices() {
        writeln!(out, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    if include_normals {
        for n in &mesh.geometry().normals {
            writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }
    }

    for (idx, [v1, v2, v3]) in mesh.faces().iter().enumerate() {
        if include_normals {
            let n = idx + 1;
            writeln!(out, "f {}//{} {}//{} {}//{}", v1 + 1, n, v2 + 1, n, v3 + 1, n)?;
        } else {
            writeln!(out, "f {} {} {}", v1 + 1, v2 + 1, v3 + 1)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let include_normals = args.iter().any(|a| a == "--normals");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let Some(planet_dir) = positional.next().map(PathBuf::from) else {
        eprintln!("usage: export_obj <planet dir> [output.obj] [--normals]");
        std::process::exit(2);
    };
    let output = positional
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("planet.obj"));

    let planet = Planet::load(&planet_dir)?;
    println!(
        "Exporting {} ({} vertices, {} faces) to {} (normals={})",
        planet.name,
        planet.mesh.vertex_count(),
        planet.mesh.face_count(),
        output.display(),
        if include_normals { "on" } else { "off" }
    );

    let file = File::create(&output).map_err(|source| PlanetError::Io {
        operation: "create",
        path: output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_obj(&planet.mesh, &mut writer, include_normals)
        .and_then(|_| writer.flush())
        .map_err(|source| PlanetError::Io {
            operation: "write",
            path: output.clone(),
            source,
        })?;

    println!("OBJ export complete");
    Ok(())
}
