//! Icosahedron subdivision
//!
//! Builds the canonical 12-vertex icosahedron and recursively splits every
//! triangle into four, projecting each new vertex onto the sphere.
//!
//! # Algorithm
//!
//! 1. Golden-ratio icosahedron, each vertex scaled to the target radius
//! 2. For each subdivision pass, triangle (v1, v2, v3) becomes
//!    (v1, a, c), (v2, b, a), (v3, c, b), (a, b, c) with
//!    a = mid(v1, v2), b = mid(v2, v3), c = mid(v3, v1)
//! 3. Midpoints are cached per undirected edge so neighbouring triangles
//!    share the new vertex (no cracks)
//! 4. A final pass re-projects every vertex onto the sphere
//!
//! Vertex indices follow insertion order and are never reassigned.

use glam::DVec3;
use std::collections::HashMap;

use crate::config::{validate_radius, validate_subdivisions};
use crate::error::Result;

/// Golden ratio φ = (1 + √5) / 2
const PHI: f64 = 1.618_033_988_749_895;

/// Unscaled icosahedron corners
const ICOSAHEDRON_VERTICES: [[f64; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

/// Face winding table; every edge appears in exactly two faces
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Number of faces produced by `subdivisions` passes: 20 · 4ⁿ
///
/// `None` when the count does not fit in `usize`.
#[inline]
pub fn face_count_for(subdivisions: u32) -> Option<usize> {
    4_usize.checked_pow(subdivisions)?.checked_mul(20)
}

/// Number of vertices produced by `subdivisions` passes: 10 · 4ⁿ + 2
///
/// `None` when the count does not fit in `usize`.
#[inline]
pub fn vertex_count_for(subdivisions: u32) -> Option<usize> {
    4_usize.checked_pow(subdivisions)?.checked_mul(10)?.checked_add(2)
}

/// Generate an icosphere of the given radius
///
/// # Arguments
///
/// * `radius` - Sphere radius (must be finite and > 0)
/// * `subdivisions` - Number of subdivision passes (0 = bare icosahedron)
///
/// # Returns
///
/// `(vertices, faces)` where every vertex lies on the sphere and every face
/// keeps the winding of the icosahedron face it descends from.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive radius or a subdivision level above
/// `MAX_SUBDIVISIONS`. No work is done in that case.
///
/// # Example
///
/// ```rust
/// use icosphere_planet::generation::generate_icosphere;
///
/// let (vertices, faces) = generate_icosphere(1.0, 2).unwrap();
/// assert_eq!(vertices.len(), 162);
/// assert_eq!(faces.len(), 320);
/// ```
pub fn generate_icosphere(radius: f64, subdivisions: u32) -> Result<(Vec<DVec3>, Vec<[u32; 3]>)> {
    validate_radius(radius)?;
    validate_subdivisions(subdivisions)?;

    let mut builder = IcosphereBuilder::new(radius, subdivisions);
    for _ in 0..subdivisions {
        builder.subdivide();
    }
    builder.normalize_vertices();

    Ok((builder.vertices, builder.faces))
}

/// Owns the vertex and face buffers while the sphere is being built
struct IcosphereBuilder {
    radius: f64,
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl IcosphereBuilder {
    fn new(radius: f64, subdivisions: u32) -> Self {
        let mut vertices = Vec::with_capacity(vertex_count_for(subdivisions).unwrap_or(0));
        vertices.extend(
            ICOSAHEDRON_VERTICES
                .iter()
                .map(|&v| project(DVec3::from_array(v), radius)),
        );

        Self {
            radius,
            vertices,
            faces: ICOSAHEDRON_FACES.to_vec(),
        }
    }

    /// Split every face into four
    fn subdivide(&mut self) {
        // Each edge is shared by two faces, so a pass adds faces * 3 / 2 midpoints
        let mut midpoint_cache: HashMap<(u32, u32), u32> =
            HashMap::with_capacity(self.faces.len() * 3 / 2);
        let mut new_faces = Vec::with_capacity(self.faces.len() * 4);

        let faces = std::mem::take(&mut self.faces);
        for [i1, i2, i3] in faces {
            let a = self.midpoint(&mut midpoint_cache, i1, i2);
            let b = self.midpoint(&mut midpoint_cache, i2, i3);
            let c = self.midpoint(&mut midpoint_cache, i3, i1);

            new_faces.push([i1, a, c]);
            new_faces.push([i2, b, a]);
            new_faces.push([i3, c, b]);
            new_faces.push([a, b, c]);
        }

        self.faces = new_faces;
    }

    /// Index of the midpoint vertex of edge (i1, i2), created on first request
    fn midpoint(&mut self, cache: &mut HashMap<(u32, u32), u32>, i1: u32, i2: u32) -> u32 {
        let key = if i1 < i2 { (i1, i2) } else { (i2, i1) };

        if let Some(&index) = cache.get(&key) {
            return index;
        }

        let mid = (self.vertices[i1 as usize] + self.vertices[i2 as usize]) * 0.5;
        let index = self.vertices.len() as u32;
        self.vertices.push(project(mid, self.radius));
        cache.insert(key, index);
        index
    }

    /// Re-project all vertices to correct accumulated drift
    fn normalize_vertices(&mut self) {
        let radius = self.radius;
        for vertex in &mut self.vertices {
            *vertex = project(*vertex, radius);
        }
    }
}

/// Scale a point onto the sphere of the given radius
#[inline]
fn project(point: DVec3, radius: f64) -> DVec3 {
    point.normalize() * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bare_icosahedron() {
        let (vertices, faces) = generate_icosphere(1.0, 0).unwrap();
        assert_eq!(vertices.len(), 12);
        assert_eq!(faces.len(), 20);
        assert_eq!(faces, ICOSAHEDRON_FACES.to_vec());
    }

    #[test]
    fn test_counts_per_level() {
        for level in 0..=5 {
            let (vertices, faces) = generate_icosphere(10.0, level).unwrap();
            assert_eq!(faces.len(), 20 * 4_usize.pow(level), "faces at level {}", level);
            assert_eq!(vertices.len(), 10 * 4_usize.pow(level) + 2, "vertices at level {}", level);
            assert_eq!(Some(faces.len()), face_count_for(level));
            assert_eq!(Some(vertices.len()), vertex_count_for(level));
        }
    }

    #[test]
    fn test_counts_overflow_is_none() {
        assert_eq!(face_count_for(10), Some(20_971_520));
        assert_eq!(vertex_count_for(10), Some(10_485_762));
        assert_eq!(face_count_for(40), None);
        assert_eq!(vertex_count_for(40), None);
        assert_eq!(face_count_for(u32::MAX), None);
    }

    #[test]
    fn test_vertices_on_sphere() {
        for &radius in &[1.0, 6371.0, 0.25] {
            let (vertices, _) = generate_icosphere(radius, 4).unwrap();
            for (i, v) in vertices.iter().enumerate() {
                let distance = v.length();
                assert!(
                    (distance - radius).abs() < 1e-9 * radius.max(1.0),
                    "vertex {} is {} from origin, expected {}",
                    i,
                    distance,
                    radius
                );
            }
        }
    }

    #[test]
    fn test_base_winding_covers_each_edge_twice() {
        let mut directed = HashSet::new();
        for [a, b, c] in ICOSAHEDRON_FACES {
            for edge in [(a, b), (b, c), (c, a)] {
                assert!(directed.insert(edge), "directed edge {:?} used twice", edge);
            }
        }
        // Consistent winding: every directed edge has its reverse
        for &(a, b) in &directed {
            assert!(directed.contains(&(b, a)));
        }
        assert_eq!(directed.len(), 60);
    }

    #[test]
    fn test_base_winding_faces_outward() {
        let (vertices, faces) = generate_icosphere(1.0, 0).unwrap();
        for face in faces {
            let [a, b, c] = face.map(|i| vertices[i as usize]);
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "face {:?} winds inward", face);
        }
    }

    #[test]
    fn test_midpoints_are_shared() {
        let (vertices, _) = generate_icosphere(1.0, 3).unwrap();
        let unique: HashSet<[u64; 3]> = vertices
            .iter()
            .map(|v| [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
            .collect();
        assert_eq!(unique.len(), vertices.len(), "duplicate vertex positions");
    }

    #[test]
    fn test_deterministic() {
        let first = generate_icosphere(6371.0, 3).unwrap();
        let second = generate_icosphere(6371.0, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(generate_icosphere(0.0, 2).is_err());
        assert!(generate_icosphere(-1.0, 2).is_err());
        assert!(generate_icosphere(f64::NAN, 2).is_err());
        assert!(generate_icosphere(1.0, crate::config::MAX_SUBDIVISIONS + 1).is_err());
    }
}
