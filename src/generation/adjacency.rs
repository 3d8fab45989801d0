//! Face adjacency via shared edges
//!
//! Two faces are neighbors when they share exactly one undirected edge.
//! Edges used by a single face (an open boundary) or by more than two faces
//! (non-manifold input) contribute no adjacency and are reported instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Type alias for undirected edge (sorted vertex pair) to face list map
type EdgeFaceMap = HashMap<(u32, u32), Vec<usize>>;

/// Face index to edge-adjacent face indices
///
/// Each neighbor list is sorted and free of duplicates, so it behaves as a set
/// with a deterministic iteration order. Callers should still treat it as
/// unordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMap {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyMap {
    /// Build a map from explicit per-face neighbor lists
    ///
    /// Lists are sorted and de-duplicated.
    pub fn from_neighbor_lists(mut neighbors: Vec<Vec<usize>>) -> Self {
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Self { neighbors }
    }

    /// Neighbors of a face, or an empty slice for an unknown face
    #[inline]
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.neighbors
            .get(face)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Number of faces covered by the map
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if the map covers no faces
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Check whether two faces share an edge
    pub fn are_neighbors(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Iterate over `(face, neighbors)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(face, n)| (face, n.as_slice()))
    }
}

/// Edge usage anomalies found in a face list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Number of distinct undirected edges
    pub edge_count: usize,
    /// Edges used by exactly one face
    pub boundary_edges: usize,
    /// Edges used by more than two faces
    pub non_manifold_edges: usize,
}

impl EdgeReport {
    /// True when every edge is shared by exactly two faces
    #[inline]
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Build the face adjacency map from a triangle list
///
/// Boundary and non-manifold edges are logged as warnings; generation does
/// not fail on them.
///
/// # Example
///
/// ```rust
/// use icosphere_planet::generation::{build_face_adjacency, generate_icosphere};
///
/// let (_, faces) = generate_icosphere(1.0, 1).unwrap();
/// let adjacency = build_face_adjacency(&faces);
/// assert!(adjacency.iter().all(|(_, n)| n.len() == 3));
/// ```
pub fn build_face_adjacency(faces: &[[u32; 3]]) -> AdjacencyMap {
    let edge_map = build_edge_face_map(faces);
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::with_capacity(3); faces.len()];

    for face_list in edge_map.values() {
        if let [f1, f2] = face_list.as_slice() {
            if f1 != f2 {
                neighbors[*f1].push(*f2);
                neighbors[*f2].push(*f1);
            }
        }
    }

    let report = summarize_edges(&edge_map);
    if !report.is_closed_manifold() {
        warn!(
            boundary_edges = report.boundary_edges,
            non_manifold_edges = report.non_manifold_edges,
            "Face list is not a closed manifold; affected edges contribute no adjacency"
        );
    }

    AdjacencyMap::from_neighbor_lists(neighbors)
}

/// Count boundary and non-manifold edges without building adjacency
pub fn edge_report(faces: &[[u32; 3]]) -> EdgeReport {
    summarize_edges(&build_edge_face_map(faces))
}

/// Map each undirected edge to the faces that use it
fn build_edge_face_map(faces: &[[u32; 3]]) -> EdgeFaceMap {
    let mut map: EdgeFaceMap = HashMap::with_capacity(faces.len() * 3 / 2);

    for (face_idx, &[a, b, c]) in faces.iter().enumerate() {
        for (v1, v2) in [(a, b), (b, c), (c, a)] {
            let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
            map.entry(key).or_default().push(face_idx);
        }
    }

    map
}

fn summarize_edges(edge_map: &EdgeFaceMap) -> EdgeReport {
    let mut report = EdgeReport {
        edge_count: edge_map.len(),
        ..Default::default()
    };

    for face_list in edge_map.values() {
        match face_list.len() {
            1 => report.boundary_edges += 1,
            2 => {}
            _ => report.non_manifold_edges += 1,
        }
    }

    report
}
