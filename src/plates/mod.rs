//! Tectonic plate partitioning of a point mesh
//!
//! Plates are grown over the point adjacency graph (see [`PlateGrower`]) and
//! frozen into an immutable [`PlateMap`] once every triangle is attributed.

mod growth;

pub use growth::{GrowthState, PlateGenState, PlateGrower};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

use crate::config::{GrowthConfig, PlateConfig};
use crate::error::{MeshError, Result};
use crate::point_map::PointMap;
use crate::triangulation::Triangulation;

/// Residual share tolerated when a weighted pick runs past the last candidate
pub const SELECTION_EPSILON: f64 = 1e-9;

/// Kind of plate; selects the growth rate
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlateType {
    /// Continental plate
    #[default]
    Land,
    /// Oceanic plate
    Sea,
}

impl PlateType {
    /// Budget increment this plate type earns per growth round
    #[inline]
    pub fn growth_rate(self, config: &GrowthConfig) -> f64 {
        match self {
            PlateType::Land => config.land_growth,
            PlateType::Sea => config.sea_growth,
        }
    }

    #[inline]
    pub fn is_land(self) -> bool {
        matches!(self, PlateType::Land)
    }
}

/// A finished plate
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    /// Position of the plate in creation order
    pub index: usize,

    /// Point the plate grew from
    pub seed_point: usize,

    pub plate_type: PlateType,

    /// Claimed points in claim order
    pub points: Vec<usize>,

    /// Triangles with at least one vertex on this plate
    ///
    /// Triangles straddling a boundary are listed by every plate they touch.
    pub triangles: Vec<usize>,

    /// Sum of the unsigned areas of `triangles`
    pub area: f64,
}

impl Plate {
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Pick one of this plate's triangles with probability proportional to its area
    ///
    /// `value` in [0, 1] is walked through the triangles' area shares in order.
    ///
    /// # Errors
    ///
    /// - `OverflowSelection` if `value` is outside [0, 1]
    /// - `EmptySelection` if the plate has no area
    pub fn pick_triangle_by_area(
        &self,
        value: f64,
        triangulation: &Triangulation,
    ) -> Result<usize> {
        let triangles = triangulation.triangles();
        let weights: Vec<f64> = self.triangles.iter().map(|&t| triangles[t].area()).collect();
        pick_by_weight(&weights, value).map(|i| self.triangles[i])
    }
}

/// Walk `weights` in order, subtracting each normalized share from `value`
fn pick_by_weight(weights: &[f64], value: f64) -> Result<usize> {
    if !(value >= 0.0) {
        return Err(MeshError::OverflowSelection(value));
    }

    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Err(MeshError::EmptySelection);
    }

    let mut remaining = value;
    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight / total;
        if remaining <= 0.0 {
            return Ok(index);
        }
    }

    if remaining <= SELECTION_EPSILON {
        Ok(weights.len() - 1)
    } else {
        Err(MeshError::OverflowSelection(value))
    }
}

/// Finished partition of a mesh into plates
///
/// # Example
///
/// ```
/// use plate_mesh::*;
///
/// let config = PlateConfigBuilder::new()
///     .seed(42)
///     .plate_count(6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let plate_map = create_plate_map(&config).unwrap();
/// assert_eq!(plate_map.plate_count(), 6);
/// assert!(plate_map.unclaimed().len() <= 3);
///
/// let largest_bias = plate_map.pick_plate_by_area(0.5).unwrap();
/// println!("picked plate {} ({:?})", largest_bias.index, largest_bias.plate_type);
/// ```
#[derive(Clone)]
pub struct PlateMap {
    point_map: PointMap,
    plates: Vec<Plate>,
    owners: Vec<Option<usize>>,
    unclaimed: Vec<usize>,
    attributions: Vec<(usize, usize)>,

    /// Spatial index for position-to-point lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl PlateMap {
    pub(crate) fn new(
        point_map: PointMap,
        plates: Vec<Plate>,
        owners: Vec<Option<usize>>,
        attributions: Vec<(usize, usize)>,
    ) -> Self {
        let unclaimed = owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| index)
            .collect();

        #[cfg(feature = "spatial-index")]
        let spatial_index = if point_map.is_empty() {
            None
        } else {
            Some(SpatialIndex::new(point_map.triangulation().points()))
        };

        Self {
            point_map,
            plates,
            owners,
            unclaimed,
            attributions,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    #[inline]
    pub fn point_map(&self) -> &PointMap {
        &self.point_map
    }

    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        self.point_map.triangulation()
    }

    /// Plates in creation order
    #[inline]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    #[inline]
    pub fn plate(&self, index: usize) -> Option<&Plate> {
        self.plates.get(index)
    }

    #[inline]
    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    /// Plate owning a point, `None` for unclaimed or unknown points
    #[inline]
    pub fn plate_of(&self, point: usize) -> Option<usize> {
        self.owners.get(point).copied().flatten()
    }

    /// Points left out of every plate
    #[inline]
    pub fn unclaimed(&self) -> &[usize] {
        &self.unclaimed
    }

    /// (triangle, plate) pairs in triangle order
    #[inline]
    pub fn attributions(&self) -> &[(usize, usize)] {
        &self.attributions
    }

    /// Sum of all plate areas
    ///
    /// Boundary triangles count once per plate they touch, so this exceeds
    /// the triangulation's area whenever there is more than one plate.
    pub fn total_area(&self) -> f64 {
        self.plates.iter().map(|p| p.area).sum()
    }

    /// Pick a plate with probability proportional to its area
    ///
    /// Walks the plates in creation order subtracting each plate's share of
    /// the total area from `value` until it is no longer positive. Small
    /// rounding residue after the last plate still selects the last plate.
    ///
    /// # Errors
    ///
    /// - `OverflowSelection` if `value` is negative, NaN or exceeds 1
    /// - `EmptySelection` if the plates have no area at all
    pub fn pick_plate_by_area(&self, value: f64) -> Result<&Plate> {
        let weights: Vec<f64> = self.plates.iter().map(|p| p.area).collect();
        pick_by_weight(&weights, value).map(|index| &self.plates[index])
    }

    /// Plate owning the mesh point nearest to `position` (requires spatial-index feature)
    ///
    /// Returns `None` for an empty mesh or when the nearest point is unclaimed.
    #[cfg(feature = "spatial-index")]
    pub fn plate_at(&self, position: DVec2) -> Option<usize> {
        let index = self.spatial_index.as_ref()?.find_nearest(position);
        self.plate_of(index)
    }
}

/// Generate a mesh from `config` and partition it into plates
///
/// Equivalent to `PlateGrower::from_config(config)?.finish()`.
pub fn create_plate_map(config: &PlateConfig) -> Result<PlateMap> {
    Ok(PlateGrower::from_config(config)?.finish())
}
