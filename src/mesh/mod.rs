//! PlanetMesh aggregate
//!
//! Owns the generated icosphere (radius, vertices, faces, adjacency and face
//! geometry) and answers topology and spatial queries over it. The mesh is
//! immutable once built; derived lookup tables are computed on first use and
//! cached behind `OnceLock`, so a mesh can be shared across threads.

pub mod validation;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::warn;

use crate::config::{PlanetConfig, DEFAULT_VERTEX_TOLERANCE};
use crate::error::Result;
use crate::generation::{generate_planet_mesh, AdjacencyMap, FaceGeometry};

#[cfg(feature = "spatial-index")]
use crate::generation::point_from_lat_lon;
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

pub use validation::{validate_mesh, validate_vertex_distances, DistanceReport, GeometrySummary, ValidationReport};

/// Indices of the original icosahedron vertices
///
/// Subdivision only inserts vertices surrounded by six faces, so these twelve
/// remain the only pentagon vertices at every level.
const PENTAGON_VERTICES: [u32; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Largest face ring: the center face plus up to six neighbors
const MAX_RING_SIZE: usize = 7;

/// Vertex index to the faces that contain it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexFaceMap {
    faces: Vec<Vec<usize>>,
}

impl VertexFaceMap {
    /// Faces containing a vertex, or an empty slice for an unknown vertex
    #[inline]
    pub fn faces_of(&self, vertex: u32) -> &[usize] {
        self.faces
            .get(vertex as usize)
            .map(|f| f.as_slice())
            .unwrap_or(&[])
    }

    /// Number of vertices covered by the map
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the map covers no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A generated planet surface
///
/// # Examples
///
/// ```
/// use icosphere_planet::*;
///
/// let mesh = PlanetMesh::generate(6371.0, 3).unwrap();
/// assert_eq!(mesh.face_count(), 1_280);
/// assert!(mesh.verify_pentagon_vertices());
///
/// // Hex tile around a face
/// let ring = mesh.get_face_ring(100);
/// assert_eq!(ring[0], 100);
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanetMesh {
    /// Sphere radius (kilometers)
    radius: f64,

    /// Vertex positions, indexed by vertex ID
    vertices: Vec<DVec3>,

    /// Triangles as vertex index triples, indexed by face ID
    faces: Vec<[u32; 3]>,

    /// Edge-sharing neighbors per face
    adjacency: AdjacencyMap,

    /// Per-face centers, normals, areas, slopes and coordinates
    geometry: FaceGeometry,

    /// Lazily built vertex-to-faces lookup (not persisted)
    #[serde(skip)]
    vertex_faces: OnceLock<VertexFaceMap>,

    /// Lazily built KD-tree over face centers (not persisted)
    #[cfg(feature = "spatial-index")]
    #[serde(skip)]
    spatial_index: OnceLock<SpatialIndex>,
}

impl PlanetMesh {
    /// Assemble a mesh from already computed parts
    ///
    /// `adjacency` and `geometry` must describe `faces`; use
    /// [`PlanetMesh::generate`] to run the whole pipeline.
    pub fn new(
        radius: f64,
        vertices: Vec<DVec3>,
        faces: Vec<[u32; 3]>,
        adjacency: AdjacencyMap,
        geometry: FaceGeometry,
    ) -> Self {
        Self {
            radius,
            vertices,
            faces,
            adjacency,
            geometry,
            vertex_faces: OnceLock::new(),
            #[cfg(feature = "spatial-index")]
            spatial_index: OnceLock::new(),
        }
    }

    /// Generate a mesh of the given radius and subdivision level
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if radius <= 0 or subdivisions exceeds the maximum.
    pub fn generate(radius: f64, subdivisions: u32) -> Result<Self> {
        generate_planet_mesh(radius, subdivisions, DEFAULT_VERTEX_TOLERANCE)
    }

    /// Generate a mesh from a planet configuration
    pub fn from_config(config: &PlanetConfig) -> Result<Self> {
        generate_planet_mesh(config.radius, config.subdivisions, config.vertex_tolerance)
    }

    /// Get the sphere radius
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Get all vertex positions
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Get all faces as vertex index triples
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Get the face adjacency map
    #[inline]
    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Get the per-face geometry arrays
    #[inline]
    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get edge-adjacent faces, or an empty slice for an unknown face
    #[inline]
    pub fn get_neighbors(&self, face: usize) -> &[usize] {
        self.adjacency.neighbors(face)
    }

    /// Get the hex (or pentagon-adjacent) tile group around a face
    ///
    /// Returns the face itself followed by its neighbors, at most 7 entries.
    /// Triangles on an icosphere have three edge neighbors, so rings are
    /// normally 4 entries long; shorter rings are not an error. An unknown
    /// face yields an empty ring.
    pub fn get_face_ring(&self, center_index: usize) -> Vec<usize> {
        if center_index >= self.faces.len() {
            return vec![];
        }

        std::iter::once(center_index)
            .chain(self.get_neighbors(center_index).iter().copied())
            .take(MAX_RING_SIZE)
            .collect()
    }

    /// Get the 12 vertex indices of the original icosahedron
    #[inline]
    pub fn get_pentagon_vertices() -> [u32; 12] {
        PENTAGON_VERTICES
    }

    /// Scan all faces and build a fresh vertex-to-faces map
    ///
    /// Prefer [`PlanetMesh::vertex_face_map`], which caches the result.
    pub fn build_vertex_face_map(&self) -> VertexFaceMap {
        let slots = self
            .faces
            .iter()
            .flatten()
            .map(|&v| v as usize + 1)
            .max()
            .unwrap_or(0)
            .max(self.vertices.len());

        let mut faces: Vec<Vec<usize>> = vec![Vec::new(); slots];
        for (face_idx, face) in self.faces.iter().enumerate() {
            for &vertex in face {
                faces[vertex as usize].push(face_idx);
            }
        }

        VertexFaceMap { faces }
    }

    /// Get the cached vertex-to-faces map, building it on first use
    pub fn vertex_face_map(&self) -> &VertexFaceMap {
        self.vertex_faces.get_or_init(|| self.build_vertex_face_map())
    }

    /// Get the faces that contain a vertex
    ///
    /// Returns an empty slice if the vertex index is unknown.
    pub fn get_faces_sharing_vertex(&self, vertex_index: u32) -> &[usize] {
        self.vertex_face_map().faces_of(vertex_index)
    }

    /// Check that each of the 12 original vertices belongs to exactly 5 faces
    ///
    /// Every deviation is logged as a warning; the check itself never fails.
    pub fn verify_pentagon_vertices(&self) -> bool {
        let map = self.vertex_face_map();

        let mut valid = true;
        for vertex in PENTAGON_VERTICES {
            let face_count = map.faces_of(vertex).len();
            if face_count != 5 {
                warn!("Vertex {} is part of {} faces, expected 5", vertex, face_count);
                valid = false;
            }
        }
        valid
    }

    /// Find faces within a given hop count from a center face (BFS)
    ///
    /// Returns the center face plus every face reachable through at most
    /// `hops` shared edges. Returns an empty vec for an unknown face.
    pub fn faces_within_hops(&self, center_index: usize, hops: usize) -> Vec<usize> {
        if center_index >= self.faces.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_index];
        visited.insert(center_index);

        // BFS with hop limit
        for _ in 0..hops {
            let mut next = Vec::new();
            for &face in &current {
                for &neighbor in self.get_neighbors(face) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut faces: Vec<usize> = visited.into_iter().collect();
        faces.sort_unstable();
        faces
    }

    /// Total surface area of the faceted mesh
    pub fn surface_area(&self) -> f64 {
        self.geometry.total_area()
    }

    /// Area statistics for logging and reports
    pub fn summary(&self) -> GeometrySummary {
        GeometrySummary::from_areas(self.radius, &self.geometry.areas)
    }

    /// Find the face whose center is nearest to a position
    ///
    /// The KD-tree over face centers is built on first use. Returns `None`
    /// for an empty mesh.
    #[cfg(feature = "spatial-index")]
    pub fn find_face_at(&self, position: DVec3) -> Option<usize> {
        if self.faces.is_empty() {
            return None;
        }
        let index = self
            .spatial_index
            .get_or_init(|| SpatialIndex::new(&self.geometry.centers));
        Some(index.find_nearest(position))
    }

    /// Find the face under a latitude/longitude (degrees)
    #[cfg(feature = "spatial-index")]
    pub fn find_face_at_lat_lon(&self, latitude: f64, longitude: f64) -> Option<usize> {
        self.find_face_at(point_from_lat_lon(latitude, longitude, self.radius))
    }
}

impl Clone for PlanetMesh {
    fn clone(&self) -> Self {
        Self::new(
            self.radius,
            self.vertices.clone(),
            self.faces.clone(),
            self.adjacency.clone(),
            self.geometry.clone(),
        )
    }
}

/// Meshes are equal when their persisted parts are equal; caches are ignored
impl PartialEq for PlanetMesh {
    fn eq(&self, other: &Self) -> bool {
        self.radius == other.radius
            && self.vertices == other.vertices
            && self.faces == other.faces
            && self.adjacency == other.adjacency
            && self.geometry == other.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{build_face_adjacency, compute_face_geometry};

    #[test]
    fn test_mesh_generation() {
        let mesh = PlanetMesh::generate(6371.0, 2).unwrap();
        assert_eq!(mesh.face_count(), 320);
        assert_eq!(mesh.vertex_count(), 162);
        assert_eq!(mesh.radius(), 6371.0);
        assert_eq!(mesh.adjacency().len(), mesh.face_count());
        assert_eq!(mesh.geometry().len(), mesh.face_count());
    }

    #[test]
    fn test_from_config() {
        let config = crate::PlanetConfigBuilder::new()
            .seed(1)
            .radius(100.0)
            .unwrap()
            .subdivisions(1)
            .unwrap()
            .build()
            .unwrap();
        let mesh = PlanetMesh::from_config(&config).unwrap();
        assert_eq!(Some(mesh.face_count()), config.face_count());
        assert_eq!(Some(mesh.vertex_count()), config.vertex_count());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(PlanetMesh::generate(0.0, 2).is_err());
        assert!(PlanetMesh::generate(-10.0, 2).is_err());
    }

    #[test]
    fn test_face_ring() {
        let mesh = PlanetMesh::generate(1.0, 2).unwrap();

        for face in [0, 17, 319] {
            let ring = mesh.get_face_ring(face);
            assert_eq!(ring[0], face);
            assert!(ring.len() <= 7);
            assert_eq!(ring.len(), 1 + mesh.get_neighbors(face).len());
        }

        assert!(mesh.get_face_ring(mesh.face_count()).is_empty());
    }

    #[test]
    fn test_face_ring_near_pentagon_vertex() {
        let mesh = PlanetMesh::generate(1.0, 3).unwrap();
        for &face in mesh.get_faces_sharing_vertex(0) {
            let ring = mesh.get_face_ring(face);
            assert!(ring.len() < 7);
            assert_eq!(ring[0], face);
        }
    }

    #[test]
    fn test_face_ring_truncated_to_seven() {
        // Hand-built adjacency where face 0 touches eight others
        let vertices = vec![DVec3::X, DVec3::Y, DVec3::Z];
        let faces = vec![[0, 1, 2]; 9];
        let geometry = compute_face_geometry(&vertices, &faces);

        let mut lists = vec![(1..9).collect::<Vec<usize>>()];
        lists.extend(std::iter::repeat(vec![0]).take(8));
        let adjacency = AdjacencyMap::from_neighbor_lists(lists);

        let mesh = PlanetMesh::new(1.0, vertices, faces, adjacency, geometry);

        assert_eq!(mesh.get_face_ring(0), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_pentagon_vertices() {
        assert_eq!(
            PlanetMesh::get_pentagon_vertices().to_vec(),
            (0..12).collect::<Vec<u32>>()
        );

        for level in 0..=6 {
            let mesh = PlanetMesh::generate(1.0, level).unwrap();
            assert!(mesh.verify_pentagon_vertices(), "level {}", level);
        }
    }

    #[test]
    fn test_non_pentagon_vertices_have_six_faces() {
        let mesh = PlanetMesh::generate(1.0, 3).unwrap();
        let map = mesh.vertex_face_map();
        assert_eq!(map.len(), mesh.vertex_count());
        for vertex in 12..mesh.vertex_count() as u32 {
            assert_eq!(map.faces_of(vertex).len(), 6, "vertex {}", vertex);
        }
    }

    #[test]
    fn test_verify_pentagon_vertices_detects_damage() {
        let mesh = PlanetMesh::generate(1.0, 1).unwrap();

        // Drop one face touching vertex 0
        let mut faces = mesh.faces().to_vec();
        let victim = mesh.get_faces_sharing_vertex(0)[0];
        faces.remove(victim);

        let adjacency = build_face_adjacency(&faces);
        let geometry = compute_face_geometry(mesh.vertices(), &faces);
        let damaged = PlanetMesh::new(1.0, mesh.vertices().to_vec(), faces, adjacency, geometry);

        assert!(!damaged.verify_pentagon_vertices());
    }

    #[test]
    fn test_faces_sharing_vertex() {
        let mesh = PlanetMesh::generate(1.0, 2).unwrap();

        let faces = mesh.get_faces_sharing_vertex(0);
        assert_eq!(faces.len(), 5);
        for &face in faces {
            assert!(mesh.faces()[face].contains(&0));
        }

        assert!(mesh.get_faces_sharing_vertex(1_000_000).is_empty());
        assert_eq!(mesh.vertex_face_map(), &mesh.build_vertex_face_map());
    }

    #[test]
    fn test_faces_within_hops() {
        let mesh = PlanetMesh::generate(1.0, 3).unwrap();

        // Zero hops should return just the center face
        assert_eq!(mesh.faces_within_hops(0, 0), vec![0]);

        // One hop adds the three edge neighbors
        let one = mesh.faces_within_hops(0, 1);
        assert_eq!(one.len(), 4);

        let two = mesh.faces_within_hops(0, 2);
        assert!(two.len() > one.len());

        assert!(mesh.faces_within_hops(usize::MAX, 3).is_empty());
    }

    #[test]
    fn test_clone_and_equality_ignore_caches() {
        let mesh = PlanetMesh::generate(1.0, 1).unwrap();
        let _ = mesh.vertex_face_map();
        let copy = mesh.clone();
        assert_eq!(mesh, copy);
    }

    #[test]
    fn test_mesh_is_shareable_across_threads() {
        let mesh = std::sync::Arc::new(PlanetMesh::generate(1.0, 2).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mesh = std::sync::Arc::clone(&mesh);
                std::thread::spawn(move || mesh.get_faces_sharing_vertex(3).len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 5);
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_face_at() {
        let mesh = PlanetMesh::generate(6371.0, 3).unwrap();

        // Querying a face center should find that face
        for face in [0, 42, 1_000] {
            let center = mesh.geometry().centers[face];
            assert_eq!(mesh.find_face_at(center), Some(face));
        }

        let lat = mesh.geometry().latitudes[7];
        let lon = mesh.geometry().longitudes[7];
        assert_eq!(mesh.find_face_at_lat_lon(lat, lon), Some(7));
    }
}
