//! Incremental Delaunay triangulation of an x-sorted planar point set
//!
//! Points are inserted left to right into a super-triangle spanned by three
//! ghost points. Each insertion removes the triangles whose circumcircle
//! contains the new point (the cavity) and re-triangulates the cavity boundary
//! from the new point. Because input arrives in ascending x order, a triangle
//! whose circumcircle lies entirely left of the current point can never be
//! touched again and is moved straight to the output.

mod triangle;

pub use triangle::{Edge, Triangle, VertexId, VertexLookup};

use glam::DVec2;
use log::{debug, warn};
use std::collections::HashMap;

use crate::error::{MeshError, Result};

/// Distance of the ghost points from the center of the bounding box,
/// in multiples of its largest side
const GHOST_DISTANCE: f64 = 20.0;

/// Point positions plus the three ghost points used during construction
struct SweepVertices<'a> {
    points: &'a [DVec2],
    ghosts: [DVec2; 3],
}

impl VertexLookup for SweepVertices<'_> {
    fn position(&self, id: VertexId) -> DVec2 {
        match id {
            VertexId::Real(index) => self.points[index],
            VertexId::Ghost(ghost) => self.ghosts[ghost as usize],
        }
    }
}

/// Completed triangulation of a point set
///
/// Only valid triangles (no ghost vertex) are kept. The points are stored in
/// input order, so triangle vertex indices refer directly into `points()`.
///
/// # Example
///
/// ```
/// use plate_mesh::{Triangulation, DVec2};
///
/// let points = vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
/// ];
/// let triangulation = Triangulation::new(points).unwrap();
/// assert_eq!(triangulation.triangle_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<DVec2>,
    triangles: Vec<Triangle>,
    degenerate_rejections: usize,
}

impl Triangulation {
    /// Triangulate `points`, which must be sorted by ascending x
    ///
    /// Sets of fewer than three points produce an empty triangulation.
    ///
    /// # Errors
    ///
    /// Returns `UnsortedPoints` if the x-order precondition is violated.
    pub fn new(points: Vec<DVec2>) -> Result<Self> {
        if let Some(index) = points.windows(2).position(|pair| pair[1].x < pair[0].x) {
            return Err(MeshError::UnsortedPoints { index: index + 1 });
        }

        if points.len() < 3 {
            debug!("triangulation skipped: only {} points", points.len());
            return Ok(Self {
                points,
                triangles: Vec::new(),
                degenerate_rejections: 0,
            });
        }

        let lookup = SweepVertices {
            points: &points,
            ghosts: ghost_points(&points),
        };

        let super_triangle = Triangle::new(
            [VertexId::Ghost(0), VertexId::Ghost(1), VertexId::Ghost(2)],
            &lookup,
        )?;

        let mut active = vec![super_triangle];
        let mut finished = Vec::new();
        let mut degenerate_rejections = 0;

        for (index, &point) in points.iter().enumerate() {
            let mut cavity_edges: Vec<Edge> = Vec::new();
            let mut remaining = Vec::with_capacity(active.len());

            for triangle in active.drain(..) {
                if triangle.circumcircle().lies_left_of(point.x) {
                    if triangle.is_valid() {
                        finished.push(triangle);
                    }
                } else if triangle.in_circumcircle(point) {
                    cavity_edges.extend_from_slice(triangle.edges());
                } else {
                    remaining.push(triangle);
                }
            }
            active = remaining;

            // Edges recorded twice are interior to the cavity
            let mut edge_counts: HashMap<Edge, usize> = HashMap::with_capacity(cavity_edges.len());
            for edge in &cavity_edges {
                *edge_counts.entry(*edge).or_insert(0) += 1;
            }

            for edge in cavity_edges.iter().filter(|edge| edge_counts[*edge] == 1) {
                match Triangle::new([VertexId::Real(index), edge.s, edge.e], &lookup) {
                    Ok(triangle) => active.push(triangle),
                    Err(err) => {
                        degenerate_rejections += 1;
                        warn!(
                            "rejected triangle ({:?}, {:?}, {:?}): {}",
                            VertexId::Real(index),
                            edge.s,
                            edge.e,
                            err
                        );
                    }
                }
            }
        }

        finished.extend(active.into_iter().filter(Triangle::is_valid));

        debug!(
            "triangulated {} points into {} triangles ({} degenerate rejected)",
            points.len(),
            finished.len(),
            degenerate_rejections
        );

        Ok(Self {
            points,
            triangles: finished,
            degenerate_rejections,
        })
    }

    /// Input points in x-sorted order
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Valid triangles, in the order they were finalized
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of cavity triangles dropped because their vertices were collinear
    #[inline]
    pub fn degenerate_rejections(&self) -> usize {
        self.degenerate_rejections
    }

    /// Sum of the unsigned areas of all triangles
    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Flattened point coordinates: x0, y0, x1, y1, ...
    pub fn point_data(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().flat_map(|p| [p.x, p.y])
    }

    /// Flattened edge endpoint pairs, three edges per triangle (wireframe)
    pub fn edge_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.triangles
            .iter()
            .filter_map(Triangle::real_vertices)
            .flat_map(|[a, b, c]| [a, b, b, c, c, a])
    }

    /// Flattened vertex triples, one per triangle (filled rendering)
    pub fn vertex_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.triangles
            .iter()
            .filter_map(Triangle::real_vertices)
            .flatten()
    }
}

/// Three points spanning a triangle far outside the bounding box of `points`
fn ghost_points(points: &[DVec2]) -> [DVec2; 3] {
    let (min, max) = points.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(min, max), &p| (min.min(p), max.max(p)),
    );
    let extent = (max - min).max_element().max(1.0);
    let mid = (min + max) * 0.5;

    [
        mid + DVec2::new(-GHOST_DISTANCE * extent, -extent),
        mid + DVec2::new(0.0, GHOST_DISTANCE * extent),
        mid + DVec2::new(GHOST_DISTANCE * extent, -extent),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GridPoints, PointGenerator, RandomPoints};
    use crate::geometry::signed_area;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_delaunay(triangulation: &Triangulation) {
        let points = triangulation.points();
        for triangle in triangulation.triangles() {
            let circle = triangle.circumcircle();
            let tolerance = 1e-9 * circle.radius_squared.max(1.0);
            for (index, &point) in points.iter().enumerate() {
                if triangle.has_vertex(index) {
                    continue;
                }
                let dist = circle.center.distance_squared(point);
                assert!(
                    dist >= circle.radius_squared - tolerance,
                    "point {} lies inside circumcircle of {:?}",
                    index,
                    triangle.vertices()
                );
            }
        }
    }

    #[test]
    fn test_unit_square() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
        ];
        let triangulation = Triangulation::new(points).unwrap();

        assert_eq!(triangulation.triangle_count(), 2);
        assert!((triangulation.total_area() - 1.0).abs() < 1e-9);
        assert!(triangulation.triangles().iter().all(Triangle::is_valid));
        assert_delaunay(&triangulation);
    }

    #[test]
    fn test_small_scale_square() {
        let side = 1e-6;
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, side),
            DVec2::new(side, 0.0),
            DVec2::new(side, side),
        ];
        let triangulation = Triangulation::new(points).unwrap();

        assert_eq!(triangulation.triangle_count(), 2);
        assert_eq!(triangulation.degenerate_rejections(), 0);
        assert!((triangulation.total_area() / (side * side) - 1.0).abs() < 1e-9);
        assert_delaunay(&triangulation);
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let triangulation = Triangulation::new(points).unwrap();

        assert_eq!(triangulation.triangle_count(), 1);

        let mut vertices = triangulation.triangles()[0].real_vertices().unwrap();
        vertices.sort();
        assert_eq!(vertices, [0, 1, 2]);
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)];
        let triangulation = Triangulation::new(points).unwrap();
        assert_eq!(triangulation.triangle_count(), 0);
        assert_eq!(triangulation.point_count(), 2);

        let empty = Triangulation::new(Vec::new()).unwrap();
        assert_eq!(empty.triangle_count(), 0);
    }

    #[test]
    fn test_unsorted_points_rejected() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.5, 1.0),
        ];
        let result = Triangulation::new(points);
        assert_eq!(result.unwrap_err(), MeshError::UnsortedPoints { index: 2 });
    }

    #[test]
    fn test_collinear_points_produce_no_triangles() {
        let points = (0..5).map(|i| DVec2::new(i as f64, i as f64 * 0.5)).collect();
        let triangulation = Triangulation::new(points).unwrap();
        assert_eq!(triangulation.triangle_count(), 0);
    }

    #[test]
    fn test_random_points_delaunay() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let points = RandomPoints { count: 200 }.generate(&mut rng);
        let triangulation = Triangulation::new(points).unwrap();

        assert!(triangulation.triangle_count() > 200);
        assert!(triangulation.triangles().iter().all(|t| t.real_vertices().is_some()));
        assert_delaunay(&triangulation);
    }

    #[test]
    fn test_grid_points_fully_covered() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let points = GridPoints { width: 16, height: 16 }.generate(&mut rng);
        let triangulation = Triangulation::new(points).unwrap();

        let mut used = vec![false; triangulation.point_count()];
        for index in triangulation.vertex_indices() {
            used[index] = true;
        }
        assert!(used.iter().all(|&u| u), "every grid point should be a vertex");

        // A jittered grid spanning [-0.5, 0.5]² covers the unit square
        assert!((triangulation.total_area() - 1.0).abs() < 1e-6);
        assert_delaunay(&triangulation);
    }

    #[test]
    fn test_flattened_buffers() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = RandomPoints { count: 50 }.generate(&mut rng);
        let triangulation = Triangulation::new(points).unwrap();

        let point_data: Vec<f64> = triangulation.point_data().collect();
        assert_eq!(point_data.len(), 2 * triangulation.point_count());
        assert_eq!(point_data[0], triangulation.points()[0].x);
        assert_eq!(point_data[1], triangulation.points()[0].y);

        assert_eq!(triangulation.edge_indices().count(), 6 * triangulation.triangle_count());
        assert_eq!(triangulation.vertex_indices().count(), 3 * triangulation.triangle_count());

        // Restartable: a second traversal yields the same sequence
        let first: Vec<usize> = triangulation.vertex_indices().collect();
        let second: Vec<usize> = triangulation.vertex_indices().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ghost_points_enclose_bounds() {
        let points = vec![DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0), DVec2::new(1.0, -1.0)];
        let [a, b, c] = ghost_points(&points);
        let corners = [
            DVec2::new(-1.0, -1.0),
            DVec2::new(-1.0, 1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
        ];
        for corner in corners {
            // Counter-clockwise super-triangle: every corner is on the left of each edge
            assert!(signed_area(c, b, corner) > 0.0);
            assert!(signed_area(b, a, corner) > 0.0);
            assert!(signed_area(a, c, corner) > 0.0);
        }
    }
}
