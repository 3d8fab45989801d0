//! Core icosphere generation pipeline
//!
//! Builds the subdivided icosahedron, derives face adjacency from shared
//! edges, then computes per-face geometry. Every stage is a pure function
//! over the previous stage's output.

mod adjacency;
mod face_geometry;
mod icosphere;

pub use adjacency::{build_face_adjacency, edge_report, AdjacencyMap, EdgeReport};
pub use face_geometry::{compute_face_geometry, lat_lon_degrees, point_from_lat_lon, FaceGeometry};
pub use icosphere::{face_count_for, generate_icosphere, vertex_count_for};

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::mesh::validation::validate_vertex_distances;
use crate::mesh::PlanetMesh;

/// Generate a complete planet mesh (vertices, faces, adjacency, geometry)
///
/// Vertex distances are checked against `vertex_tolerance`; off-sphere
/// vertices are logged, not fatal.
#[instrument(level = "info", skip(vertex_tolerance))]
pub fn generate_planet_mesh(radius: f64, subdivisions: u32, vertex_tolerance: f64) -> Result<PlanetMesh> {
    // Step 1: Subdivide the icosahedron
    let (vertices, faces) = generate_icosphere(radius, subdivisions)?;
    info!(
        vertices = vertices.len(),
        faces = faces.len(),
        "Icosphere generated"
    );
    if let (Some(v0), Some(f0)) = (vertices.first(), faces.first()) {
        debug!("Sample vertex: {:.3}, {:.3}, {:.3}", v0.x, v0.y, v0.z);
        debug!("Sample face: {:?}", f0);
    }

    // Step 2: Validate on-sphere distances
    validate_vertex_distances(&vertices, radius, vertex_tolerance);

    // Step 3: Face adjacency from shared edges
    let adjacency = build_face_adjacency(&faces);
    info!(faces = adjacency.len(), "Adjacency map built");
    debug!("Sample adjacency (face 0): {:?}", adjacency.neighbors(0));

    // Step 4: Per-face geometry
    let geometry = compute_face_geometry(&vertices, &faces);
    info!("Computed face centers, normals, areas, slopes and coordinates");
    if !geometry.is_empty() {
        debug!(
            "Sample face 0: area {:.6}, slope {:.2}°, lat/lon {:.2}°, {:.2}°",
            geometry.areas[0], geometry.slopes[0], geometry.latitudes[0], geometry.longitudes[0]
        );
    }

    Ok(PlanetMesh::new(radius, vertices, faces, adjacency, geometry))
}
