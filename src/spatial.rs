//! Spatial indexing for fast position-to-face lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;
use std::fmt;

/// Wrapper around a KD-tree over face centers
///
/// Provides O(log n) nearest-neighbor lookups to convert 3D positions
/// (raycast hits, lat/lon picks) into face indices.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 3, 32>,
    len: usize,
}

impl SpatialIndex {
    /// Build spatial index from face centers
    ///
    /// # Example
    ///
    /// ```
    /// use icosphere_planet::SpatialIndex;
    /// use glam::DVec3;
    ///
    /// let centers = vec![
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(0.0, 1.0, 0.0),
    ///     DVec3::new(0.0, 0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), 0);
    /// ```
    pub fn new(centers: &[DVec3]) -> Self {
        let points: Vec<[f64; 3]> = centers.iter().map(|c| c.to_array()).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            len: points.len(),
        }
    }

    /// Index of the center nearest to a position
    pub fn find_nearest(&self, position: DVec3) -> usize {
        let query = position.to_array();
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }

    /// Number of indexed centers
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
