//! Point adjacency derived from a triangulation
//!
//! Every point learns which triangles it belongs to and which points it
//! shares an edge with. This is the graph plate growth walks over.

use glam::DVec2;
use std::collections::BTreeSet;

use crate::error::{MeshError, Result};
use crate::triangulation::Triangulation;

/// A mesh point annotated with its incident triangles and neighbors
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    /// Index of the point in the triangulation's point sequence
    pub index: usize,

    /// Position of the point
    pub position: DVec2,

    /// Indices of triangles using this point as a vertex (ascending)
    pub triangles: Vec<usize>,

    /// Indices of points sharing an edge with this point (ascending)
    pub neighbors: Vec<usize>,
}

impl MapPoint {
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this point shares an edge with another point
    #[inline]
    pub fn is_neighbor_of(&self, other: usize) -> bool {
        self.neighbors.binary_search(&other).is_ok()
    }
}

/// Adjacency map over every point of a triangulation
///
/// Built once; read-only afterwards.
#[derive(Debug, Clone)]
pub struct PointMap {
    triangulation: Triangulation,
    points: Vec<MapPoint>,
}

impl PointMap {
    /// Derive incident triangles and neighbors for every point
    ///
    /// Each triangle is visited once; for each of its vertices the triangle is
    /// recorded as incident and the other two vertices as neighbors.
    pub fn new(triangulation: Triangulation) -> Self {
        let count = triangulation.point_count();
        let mut triangles: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); count];
        let mut neighbors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); count];

        for (triangle_index, triangle) in triangulation.triangles().iter().enumerate() {
            let Some(vertices) = triangle.real_vertices() else {
                continue;
            };
            for (i, &vertex) in vertices.iter().enumerate() {
                triangles[vertex].insert(triangle_index);
                neighbors[vertex].insert(vertices[(i + 1) % 3]);
                neighbors[vertex].insert(vertices[(i + 2) % 3]);
            }
        }

        let points = triangulation
            .points()
            .iter()
            .zip(triangles.into_iter().zip(neighbors))
            .enumerate()
            .map(|(index, (&position, (triangles, neighbors)))| MapPoint {
                index,
                position,
                triangles: triangles.into_iter().collect(),
                neighbors: neighbors.into_iter().collect(),
            })
            .collect();

        Self { triangulation, points }
    }

    /// The triangulation this map was derived from
    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    #[inline]
    pub fn points(&self) -> &[MapPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&MapPoint> {
        self.points.get(index)
    }

    /// Neighbor indices of a point
    ///
    /// # Errors
    ///
    /// Returns `PointNotFound` if the index is out of bounds.
    pub fn neighbors(&self, index: usize) -> Result<&[usize]> {
        self.points
            .get(index)
            .map(|p| p.neighbors.as_slice())
            .ok_or(MeshError::PointNotFound(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GridPoints, PointGenerator};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square_map() -> PointMap {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
        ];
        PointMap::new(Triangulation::new(points).unwrap())
    }

    #[test]
    fn test_square_adjacency() {
        let map = square_map();
        assert_eq!(map.len(), 4);

        // Two triangles share a diagonal: its endpoints see 3 neighbors and
        // 2 triangles, the other corners 2 neighbors and 1 triangle
        let mut degrees: Vec<(usize, usize)> = map
            .points()
            .iter()
            .map(|p| (p.neighbor_count(), p.triangles.len()))
            .collect();
        degrees.sort();
        assert_eq!(degrees, vec![(2, 1), (2, 1), (3, 2), (3, 2)]);
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let points = GridPoints { width: 12, height: 12 }.generate(&mut rng);
        let map = PointMap::new(Triangulation::new(points).unwrap());

        for point in map.points() {
            assert!(!point.neighbors.contains(&point.index));
            for &neighbor in &point.neighbors {
                assert!(map.points()[neighbor].is_neighbor_of(point.index));
            }
        }
    }

    #[test]
    fn test_incident_triangles_contain_point() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let points = GridPoints { width: 8, height: 8 }.generate(&mut rng);
        let map = PointMap::new(Triangulation::new(points).unwrap());
        let triangles = map.triangulation().triangles();

        let mut incidence = 0;
        for point in map.points() {
            for &t in &point.triangles {
                assert!(triangles[t].has_vertex(point.index));
                incidence += 1;
            }
        }
        assert_eq!(incidence, 3 * triangles.len());
    }

    #[test]
    fn test_neighbors_lookup() {
        let map = square_map();
        assert!(map.neighbors(0).is_ok());
        assert_eq!(map.neighbors(4), Err(MeshError::PointNotFound(4)));
        assert!(map.get(4).is_none());
    }
}
