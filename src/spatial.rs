//! Spatial indexing for fast position-to-point lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree over mesh points
///
/// Provides O(log n) nearest-neighbor lookups to convert arbitrary positions
/// (cursor picks, feature placement) into point indices, and from there into
/// plates.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

impl SpatialIndex {
    /// Build spatial index from point positions
    ///
    /// # Example
    ///
    /// ```
    /// use plate_mesh::{SpatialIndex, DVec2};
    ///
    /// let points = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&points);
    /// assert_eq!(index.find_nearest(DVec2::new(0.9, 0.1)), 1);
    /// ```
    pub fn new(points: &[DVec2]) -> Self {
        let coordinates: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&coordinates),
        }
    }

    /// Index of the point nearest to `position`
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        result.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let points = vec![
            DVec2::new(-1.0, -1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, 1.0),
        ];

        let index = SpatialIndex::new(&points);

        assert_eq!(index.find_nearest(DVec2::new(-0.8, -0.9)), 0);
        assert_eq!(index.find_nearest(DVec2::new(0.7, -0.6)), 1);
        assert_eq!(index.find_nearest(DVec2::new(0.2, 0.9)), 2);
        assert_eq!(index.find_nearest(DVec2::new(-0.4, 0.3)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let points = vec![DVec2::new(0.25, 0.5), DVec2::new(-0.5, 0.125)];
        let index = SpatialIndex::new(&points);

        assert_eq!(index.find_nearest(points[0]), 0);
        assert_eq!(index.find_nearest(points[1]), 1);
    }
}
