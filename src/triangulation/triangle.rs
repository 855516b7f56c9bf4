//! Triangle, edge and vertex identifier value types

use glam::DVec2;
use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::geometry::{circumcircle, signed_area, Circumcircle};

/// Identifier of a triangle vertex
///
/// Real vertices index into the input point sequence. Ghost vertices are the
/// three synthetic points bounding the initial super-triangle and never appear
/// in a finished triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexId {
    /// Index into the real point sequence
    Real(usize),
    /// One of the three bounding points (0..=2)
    Ghost(u8),
}

impl VertexId {
    /// The real point index, if this is not a ghost
    #[inline]
    pub fn real(self) -> Option<usize> {
        match self {
            VertexId::Real(index) => Some(index),
            VertexId::Ghost(_) => None,
        }
    }

    #[inline]
    pub fn is_ghost(self) -> bool {
        matches!(self, VertexId::Ghost(_))
    }
}

/// Unordered pair of vertices: `{s, e} == {e, s}`
#[derive(Debug, Clone, Copy, Eq)]
pub struct Edge {
    pub s: VertexId,
    pub e: VertexId,
}

impl Edge {
    pub fn new(s: VertexId, e: VertexId) -> Self {
        Self { s, e }
    }

    /// Endpoints in a canonical order, used for equality and hashing
    #[inline]
    fn key(&self) -> (VertexId, VertexId) {
        if self.s <= self.e {
            (self.s, self.e)
        } else {
            (self.e, self.s)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Resolves vertex identifiers to coordinates
pub trait VertexLookup {
    fn position(&self, id: VertexId) -> DVec2;
}

/// A triangle with its derived attributes computed once at construction
///
/// Vertex order is kept for edge derivation; equality and hashing only look
/// at the vertex set.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    vertices: [VertexId; 3],
    edges: [Edge; 3],
    area: f64,
    circumcircle: Circumcircle,
}

impl Triangle {
    /// Build a triangle, resolving positions through `lookup`
    ///
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the vertices are collinear.
    pub fn new<L: VertexLookup + ?Sized>(vertices: [VertexId; 3], lookup: &L) -> Result<Self> {
        let [a, b, c] = vertices.map(|v| lookup.position(v));
        let circumcircle = circumcircle(a, b, c)?;

        Ok(Self {
            vertices,
            edges: [
                Edge::new(vertices[0], vertices[1]),
                Edge::new(vertices[1], vertices[2]),
                Edge::new(vertices[2], vertices[0]),
            ],
            area: signed_area(a, b, c),
            circumcircle,
        })
    }

    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge; 3] {
        &self.edges
    }

    /// Signed area (sign follows winding order)
    #[inline]
    pub fn signed_area(&self) -> f64 {
        self.area
    }

    /// Unsigned area, used as a sampling weight
    #[inline]
    pub fn area(&self) -> f64 {
        self.area.abs()
    }

    #[inline]
    pub fn circumcircle(&self) -> &Circumcircle {
        &self.circumcircle
    }

    /// True if `point` lies inside or on this triangle's circumcircle
    #[inline]
    pub fn in_circumcircle(&self, point: DVec2) -> bool {
        self.circumcircle.contains(point)
    }

    /// A triangle is valid when none of its vertices is a ghost
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.vertices.iter().any(|v| v.is_ghost())
    }

    /// Real point indices, or `None` if any vertex is a ghost
    pub fn real_vertices(&self) -> Option<[usize; 3]> {
        Some([
            self.vertices[0].real()?,
            self.vertices[1].real()?,
            self.vertices[2].real()?,
        ])
    }

    /// Check whether the triangle uses the given real point as a vertex
    pub fn has_vertex(&self, index: usize) -> bool {
        self.vertices.contains(&VertexId::Real(index))
    }

    fn sorted_vertices(&self) -> [VertexId; 3] {
        let mut sorted = self.vertices;
        sorted.sort();
        sorted
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_vertices() == other.sorted_vertices()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_vertices().hash(state);
    }
}
