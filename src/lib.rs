//! Planar Delaunay meshes partitioned into tectonic plates
//!
//! A standalone library for procedural world maps: scatter points, triangulate
//! them, grow weighted plates over the point adjacency graph, and emit flat
//! render buffers suitable for any game engine (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use plate_mesh::*;
//!
//! // Partition a medium map into plates
//! let config = PlateConfigBuilder::new()
//!     .seed(42)
//!     .map_size(MapSize::Medium)
//!     .plate_count(12).unwrap()
//!     .build().unwrap();
//!
//! let plate_map = create_plate_map(&config).unwrap();
//!
//! // Generate mesh for rendering
//! let mesh = generate_plate_mesh(&plate_map, &BasicPlateColorMapper);
//! println!("Generated {} plate triangles", mesh.triangle_count());
//! ```
//!
//! Growth can also be driven one round at a time through [`PlateGrower::step`].
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-plate lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and plate types

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod triangulation;
pub mod point_map;
pub mod generation;
pub mod plates;
pub mod mesh;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MeshError, Result};
pub use config::{
    GrowthConfig, MapSize, PlateConfig, PlateConfigBuilder, PointLayout, DEFAULT_LAND_GROWTH,
    DEFAULT_SEA_GROWTH, DEFAULT_UNCLAIMED_SLACK, LAND_PROBABILITY_RANGE,
};
pub use geometry::{circumcircle, in_circumcircle, is_degenerate, signed_area, Circumcircle};
pub use triangulation::{Edge, Triangle, Triangulation, VertexId};
pub use point_map::{MapPoint, PointMap};
pub use generation::{generate_points, GridPoints, PerlinPoints, PointGenerator, RandomPoints};
pub use plates::{
    create_plate_map, GrowthState, Plate, PlateGenState, PlateGrower, PlateMap, PlateType,
};
pub use mesh::{
    generate_mesh, generate_plate_mesh, BasicPlateColorMapper, CustomPlateColorMapper, MeshData,
    MeshMode, PlateColor, PlateColorMapper, PlateMeshData,
};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
