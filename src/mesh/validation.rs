//! Structural and geometric checks over a generated mesh
//!
//! None of these checks fail generation. They return reports and log
//! warnings so the caller can decide what to do with an anomaly.

use glam::DVec3;
use std::f64::consts::PI;
use tracing::{debug, info, warn};

use super::PlanetMesh;
use crate::generation::{edge_report, EdgeReport};

/// Number of individual off-sphere vertices logged before only the total is reported
const MAX_LOGGED_VERTICES: usize = 5;

/// Result of the on-sphere distance check
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceReport {
    /// Vertices checked
    pub checked: usize,
    /// Vertices farther than the tolerance from the sphere surface
    pub off_sphere: usize,
    /// Largest absolute deviation from the radius
    pub max_deviation: f64,
}

impl DistanceReport {
    /// True when every vertex lies within tolerance
    #[inline]
    pub fn all_on_sphere(&self) -> bool {
        self.off_sphere == 0
    }
}

/// Check that every vertex lies within `epsilon` of the sphere surface
///
/// The first few offenders are logged individually, followed by a total.
pub fn validate_vertex_distances(vertices: &[DVec3], radius: f64, epsilon: f64) -> DistanceReport {
    let mut report = DistanceReport {
        checked: vertices.len(),
        ..Default::default()
    };

    for (i, v) in vertices.iter().enumerate() {
        let distance = v.length();
        let deviation = (distance - radius).abs();
        report.max_deviation = report.max_deviation.max(deviation);

        if deviation > epsilon {
            report.off_sphere += 1;
            if report.off_sphere <= MAX_LOGGED_VERTICES {
                warn!(
                    "Vertex {} is off-sphere: distance={:.3} (expected {})",
                    i, distance, radius
                );
            }
        } else if i < MAX_LOGGED_VERTICES {
            debug!("Vertex {} lies on sphere: distance={:.3}", i, distance);
        }
    }

    if report.all_on_sphere() {
        info!("All vertices lie within expected distance tolerance");
    } else {
        warn!(
            "{} vertices were off-sphere (>{:e} tolerance)",
            report.off_sphere, epsilon
        );
    }

    report
}

/// Combined result of all mesh checks
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// On-sphere distance check
    pub distances: DistanceReport,
    /// Boundary and non-manifold edge counts
    pub edges: EdgeReport,
    /// Faces whose neighbor count is not exactly 3
    pub irregular_faces: Vec<usize>,
    /// Whether the 12 original vertices each belong to exactly 5 faces
    pub pentagons_valid: bool,
}

impl ValidationReport {
    /// True when the mesh is a well-formed closed icosphere
    pub fn is_valid(&self) -> bool {
        self.distances.all_on_sphere()
            && self.edges.is_closed_manifold()
            && self.irregular_faces.is_empty()
            && self.pentagons_valid
    }
}

/// Run every structural and geometric check over a mesh
pub fn validate_mesh(mesh: &PlanetMesh, epsilon: f64) -> ValidationReport {
    let distances = validate_vertex_distances(mesh.vertices(), mesh.radius(), epsilon);

    let edges = edge_report(mesh.faces());
    if !edges.is_closed_manifold() {
        warn!(
            "Mesh has {} boundary and {} non-manifold edges",
            edges.boundary_edges, edges.non_manifold_edges
        );
    }

    let irregular_faces: Vec<usize> = (0..mesh.face_count())
        .filter(|&face| mesh.get_neighbors(face).len() != 3)
        .collect();
    if !irregular_faces.is_empty() {
        warn!("{} faces do not have exactly 3 neighbors", irregular_faces.len());
    }

    let pentagons_valid = mesh.verify_pentagon_vertices();

    ValidationReport {
        distances,
        edges,
        irregular_faces,
        pentagons_valid,
    }
}

/// Area statistics of a mesh compared with its ideal sphere
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometrySummary {
    pub radius: f64,
    pub circumference: f64,
    /// Surface area of the ideal sphere, 4πr²
    pub sphere_area: f64,
    /// Sum of all face areas
    pub mesh_area: f64,
    pub mean_face_area: f64,
    pub face_area_stddev: f64,
    /// Approximate area of a six-triangle hex tile
    pub hex_tile_area: f64,
    /// Approximate area of a five-triangle pentagon tile
    pub pentagon_tile_area: f64,
}

impl GeometrySummary {
    /// Summarize a list of face areas
    pub fn from_areas(radius: f64, areas: &[f64]) -> Self {
        let count = areas.len();
        let mesh_area: f64 = areas.iter().sum();
        let (mean, stddev) = if count > 0 {
            let mean = mesh_area / count as f64;
            let variance = areas.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / count as f64;
            (mean, variance.sqrt())
        } else {
            (0.0, 0.0)
        };

        Self {
            radius,
            circumference: 2.0 * PI * radius,
            sphere_area: 4.0 * PI * radius * radius,
            mesh_area,
            mean_face_area: mean,
            face_area_stddev: stddev,
            hex_tile_area: mean * 6.0,
            pentagon_tile_area: mean * 5.0,
        }
    }

    /// Relative difference between mesh area and ideal sphere area
    pub fn area_error(&self) -> f64 {
        if self.sphere_area == 0.0 {
            return 0.0;
        }
        (self.sphere_area - self.mesh_area).abs() / self.sphere_area
    }

    /// Log the summary at info level
    pub fn log(&self) {
        info!("--- Planet Geometry Summary ---");
        info!("Planet radius: {:.2} km", self.radius);
        info!("Planet circumference: {:.2} km", self.circumference);
        info!("Planet surface area (ideal sphere): {:.2} km²", self.sphere_area);
        info!("Calculated mesh surface area: {:.2} km²", self.mesh_area);
        info!("Average triangle face area: {:.6} km²", self.mean_face_area);
        info!("Face area standard deviation: {:.6} km²", self.face_area_stddev);
        info!("Approx. standard hex-tile area: {:.2} km²", self.hex_tile_area);
        info!("Approx. 5-triangle pentagon tile area: {:.2} km²", self.pentagon_tile_area);
    }
}
