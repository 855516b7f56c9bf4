//! Planar geometry primitives
//!
//! Circumcircle and signed-area computation for triangles given as three
//! points. These are the only numeric kernels the triangulation relies on.

use glam::DVec2;

use crate::error::{MeshError, Result};

/// Triangles whose corner at `v1` has a sine below this are treated as collinear
///
/// The test is relative to the lengths of the two edges leaving `v1`, so it
/// does not depend on the scale of the input coordinates.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Circle passing through the three vertices of a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    /// Center of the circle
    pub center: DVec2,
    /// Squared radius (r²)
    pub radius_squared: f64,
}

impl Circumcircle {
    /// True when the whole circle lies strictly to the left of the vertical line at `x`
    ///
    /// Points inserted in ascending x order can never fall inside such a circle again.
    #[inline]
    pub fn lies_left_of(&self, x: f64) -> bool {
        let dx = x - self.center.x;
        dx > 0.0 && dx * dx > self.radius_squared
    }

    /// Test whether a point lies inside (or on) this circle
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        in_circumcircle(self, point)
    }
}

/// Signed area of the triangle (v1, v2, v3)
///
/// Positive for counter-clockwise winding, negative for clockwise.
#[inline]
pub fn signed_area(v1: DVec2, v2: DVec2, v3: DVec2) -> f64 {
    0.5 * ((v2.x - v1.x) * (v3.y - v1.y) - (v3.x - v1.x) * (v2.y - v1.y))
}

/// True if (v1, v2, v3) are collinear or two of them coincide
///
/// Compares twice the signed area, `|ab| |ac| sin(a)`, against the product of
/// the edge lengths at `v1`.
#[inline]
pub fn is_degenerate(v1: DVec2, v2: DVec2, v3: DVec2) -> bool {
    let cross = 2.0 * signed_area(v1, v2, v3);
    let scale = v1.distance(v2) * v1.distance(v3);
    !cross.is_finite() || cross.abs() <= DEGENERATE_EPSILON * scale
}

/// Compute the circumcircle of the triangle (v1, v2, v3)
///
/// Solves the two linear equations expressing equal distance from the center
/// to each vertex pair. When `v1` and `v2` share an x-coordinate the pairs
/// (v2, v3) and (v3, v1) are used instead so the primary branch never divides
/// by zero.
///
/// # Errors
///
/// Returns `DegenerateGeometry` when the three points are collinear (the
/// circumcircle is undefined) or when the result is not finite.
pub fn circumcircle(v1: DVec2, v2: DVec2, v3: DVec2) -> Result<Circumcircle> {
    if is_degenerate(v1, v2, v3) {
        return Err(MeshError::DegenerateGeometry);
    }

    // Rotate the vertices so that the first pair never shares an x-coordinate
    let (a, b, c) = if v2.x == v1.x { (v2, v3, v1) } else { (v1, v2, v3) };

    let c_ab = (a.x * a.x - b.x * b.x) + (a.y * a.y - b.y * b.y);
    let c_bc = (b.x * b.x - c.x * c.x) + (b.y * b.y - c.y * c.y);
    let slope = (b.y - a.y) / (b.x - a.x);

    let numerator = c_ab * (c.x - b.x) / (b.x - a.x) - c_bc;
    let div = 2.0 * ((c.y - b.y) - slope * (c.x - b.x));

    let center_y = numerator / div;
    let center_x = (c_ab + 2.0 * center_y * (b.y - a.y)) / (2.0 * (a.x - b.x));
    let center = DVec2::new(center_x, center_y);

    if !center.is_finite() {
        return Err(MeshError::DegenerateGeometry);
    }

    Ok(Circumcircle {
        center,
        radius_squared: center.distance_squared(v1),
    })
}

/// True if `point` lies inside or on the circle
///
/// The comparison is inclusive: co-circular points count as inside, which
/// makes cavities absorb co-circular triangles instead of leaving them.
#[inline]
pub fn in_circumcircle(circle: &Circumcircle, point: DVec2) -> bool {
    circle.center.distance_squared(point) <= circle.radius_squared
}
