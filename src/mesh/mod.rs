//! Render buffers for triangulations and plate maps
//!
//! Produces flat, engine-agnostic arrays ready for vertex/index buffer upload.

mod colors;

pub use colors::{BasicPlateColorMapper, CustomPlateColorMapper, PlateColor, PlateColorMapper};

use crate::plates::PlateMap;
use crate::triangulation::Triangulation;

/// Primitive type of an index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshMode {
    /// Pairs of indices, one pair per triangle edge
    #[default]
    Lines,
    /// Triples of indices, one triple per triangle
    Triangles,
}

/// Shared point positions plus an index buffer
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Interleaved point coordinates: x0, y0, x1, y1, ...
    pub positions: Vec<f32>,
    /// Indices into the points
    pub indices: Vec<u32>,
    /// How `indices` are grouped
    pub mode: MeshMode,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Number of primitives (lines or triangles)
    pub fn primitive_count(&self) -> usize {
        match self.mode {
            MeshMode::Lines => self.indices.len() / 2,
            MeshMode::Triangles => self.indices.len() / 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Per-plate triangle soup with a plate scalar per vertex
///
/// Every (triangle, plate) attribution gets its own three vertices so a
/// boundary triangle is drawn once per plate it belongs to.
#[derive(Debug, Clone, Default)]
pub struct PlateMeshData {
    /// Interleaved vertices: x, y, plate scalar in [0, 1]
    pub vertices: Vec<f32>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl PlateMeshData {
    /// Floats per vertex in `vertices`
    pub const STRIDE: usize = 3;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Plate index normalized to [0, 1] by the plate count
#[inline]
pub fn plate_scalar(plate: usize, plate_count: usize) -> f32 {
    if plate_count > 1 {
        plate as f32 / (plate_count - 1) as f32
    } else {
        0.0
    }
}

/// Build a wireframe or filled mesh from a triangulation
pub fn generate_mesh(triangulation: &Triangulation, mode: MeshMode) -> MeshData {
    let positions = triangulation.point_data().map(|v| v as f32).collect();
    let indices = match mode {
        MeshMode::Lines => triangulation.edge_indices().map(|i| i as u32).collect(),
        MeshMode::Triangles => triangulation.vertex_indices().map(|i| i as u32).collect(),
    };

    MeshData {
        positions,
        indices,
        mode,
    }
}

/// Build colored per-plate triangles from a finished plate map
pub fn generate_plate_mesh<C>(plate_map: &PlateMap, color_mapper: &C) -> PlateMeshData
where
    C: PlateColorMapper,
{
    let mut mesh = PlateMeshData::default();
    let triangulation = plate_map.triangulation();
    let points = triangulation.points();
    let triangles = triangulation.triangles();
    let plate_count = plate_map.plate_count();

    for &(triangle_index, plate_index) in plate_map.attributions() {
        let Some(vertices) = triangles[triangle_index].real_vertices() else {
            continue;
        };
        let Some(plate) = plate_map.plate(plate_index) else {
            continue;
        };

        let shade = plate_scalar(plate_index, plate_count);
        let color = color_mapper.map_color(plate.plate_type, shade);
        let base_idx = mesh.vertex_count() as u32;

        for vertex in vertices {
            let position = points[vertex];
            mesh.vertices.extend_from_slice(&[position.x as f32, position.y as f32, shade]);
            mesh.colors.push(color);
        }
        mesh.indices.extend_from_slice(&[base_idx, base_idx + 1, base_idx + 2]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapSize, PlateConfigBuilder};
    use crate::plates::create_plate_map;
    use glam::DVec2;

    fn square() -> Triangulation {
        Triangulation::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_wireframe_mesh() {
        let mesh = generate_mesh(&square(), MeshMode::Lines);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.primitive_count(), 6);
        assert_eq!(mesh.indices.len(), 12);
        assert!(mesh.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_filled_mesh() {
        let mesh = generate_mesh(&square(), MeshMode::Triangles);

        assert_eq!(mesh.primitive_count(), 2);
        assert_eq!(mesh.positions, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_plate_scalar() {
        assert_eq!(plate_scalar(0, 1), 0.0);
        assert_eq!(plate_scalar(0, 5), 0.0);
        assert_eq!(plate_scalar(4, 5), 1.0);
        assert_eq!(plate_scalar(2, 5), 0.5);
    }

    #[test]
    fn test_plate_mesh() {
        let config = PlateConfigBuilder::new()
            .seed(42)
            .map_size(MapSize::Custom { width: 10, height: 10 })
            .plate_count(4)
            .unwrap()
            .build()
            .unwrap();
        let plate_map = create_plate_map(&config).unwrap();
        let mesh = generate_plate_mesh(&plate_map, &BasicPlateColorMapper);

        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangle_count(), plate_map.attributions().len());
        assert_eq!(mesh.vertex_count(), 3 * mesh.triangle_count());
        assert_eq!(mesh.colors.len(), mesh.vertex_count());

        for vertex in mesh.vertices.chunks(PlateMeshData::STRIDE) {
            assert!((0.0..=1.0).contains(&vertex[2]));
        }
    }
}
