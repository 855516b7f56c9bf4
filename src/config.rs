//! Plate map configuration and builder
//!
//! This module provides configuration types for deterministic plate map generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::ops::Range;

use crate::error::{MeshError, Result};

/// Range the land probability is drawn from when none is configured
pub const LAND_PROBABILITY_RANGE: Range<f64> = 0.3..0.55;

/// Default budget increment per round for land plates
pub const DEFAULT_LAND_GROWTH: f64 = 0.707;

/// Default budget increment per round for sea plates (twice the land rate)
pub const DEFAULT_SEA_GROWTH: f64 = 1.414;

/// Unclaimed points tolerated when growth stops
pub const DEFAULT_UNCLAIMED_SLACK: usize = 3;

/// Map size presets
///
/// Each size maps to the number of grid cells along each axis. Scattered
/// point layouts use the same total point count.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapSize {
    /// 16 × 16 points
    #[default]
    Small,
    /// 48 × 48 points
    Medium,
    /// 100 × 100 points
    Large,
    /// Custom grid dimensions
    Custom {
        /// Points along x
        width: usize,
        /// Points along y
        height: usize,
    },
}

impl MapSize {
    /// Grid dimensions as (width, height)
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            MapSize::Small => (16, 16),
            MapSize::Medium => (48, 48),
            MapSize::Large => (100, 100),
            MapSize::Custom { width, height } => (width, height),
        }
    }

    /// Total number of points generated for this size
    pub fn point_count(self) -> usize {
        let (width, height) = self.dimensions();
        width * height
    }

    /// Get a human-readable name for this map size
    pub fn name(self) -> &'static str {
        match self {
            MapSize::Small => "Small",
            MapSize::Medium => "Medium",
            MapSize::Large => "Large",
            MapSize::Custom { .. } => "Custom",
        }
    }
}

/// How mesh points are placed
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointLayout {
    /// Jittered grid over [-0.5, 0.5]²
    #[default]
    Grid,
    /// Uniform scatter over [-1, 1]²
    Random,
    /// Noise-clustered scatter
    Perlin,
}

/// Parameters of the plate growth engine
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthConfig {
    /// Number of plates to grow
    pub plate_count: usize,

    /// Probability that a plate is land
    ///
    /// `None` draws a value from `LAND_PROBABILITY_RANGE` using the plate RNG.
    pub land_probability: Option<f64>,

    /// Budget added to land plates each round
    pub land_growth: f64,

    /// Budget added to sea plates each round
    pub sea_growth: f64,

    /// Growth stops once at most this many points remain unclaimed
    pub unclaimed_slack: usize,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            plate_count: 12,
            land_probability: None,
            land_growth: DEFAULT_LAND_GROWTH,
            sea_growth: DEFAULT_SEA_GROWTH,
            unclaimed_slack: DEFAULT_UNCLAIMED_SLACK,
        }
    }
}

impl GrowthConfig {
    /// Check the invariants the growth engine relies on
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for zero plates, a probability outside [0, 1]
    /// or a non-positive growth rate (a plate with negative budget would then
    /// never grow again).
    pub fn validate(&self) -> Result<()> {
        if self.plate_count == 0 {
            return Err(MeshError::InvalidConfig("plate count must be > 0".to_string()));
        }
        if let Some(p) = self.land_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(MeshError::InvalidConfig(format!(
                    "land probability must be within [0, 1] (got {})",
                    p
                )));
            }
        }
        for (name, rate) in [("land", self.land_growth), ("sea", self.sea_growth)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(MeshError::InvalidConfig(format!(
                    "{} growth rate must be positive (got {})",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for deterministic plate map generation
///
/// The same configuration always produces the same mesh and the same plates.
///
/// # Example
///
/// ```rust
/// use plate_mesh::*;
///
/// let config = PlateConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Small)
///     .plate_count(6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.growth.plate_count, 6);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateConfig {
    /// Random seed for point placement and plate seeding
    ///
    /// Point placement uses stream 0 of the seeded generator and plate
    /// seeding stream 1, so changing the plate count leaves the mesh unchanged.
    pub seed: u64,

    /// Map size preset (determines the number of points)
    pub map_size: MapSize,

    /// Point placement strategy
    pub point_layout: PointLayout,

    /// Plate growth parameters
    pub growth: GrowthConfig,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            map_size: MapSize::default(),
            point_layout: PointLayout::default(),
            growth: GrowthConfig::default(),
        }
    }
}

/// Builder for creating PlateConfig with validation
///
/// # Example
///
/// ```rust
/// use plate_mesh::*;
///
/// let config = PlateConfigBuilder::new()
///     .seed(12345)
///     .map_size(MapSize::Medium)
///     .point_layout(PointLayout::Random)
///     .land_probability(0.4)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.growth.land_probability, Some(0.4));
/// ```
#[derive(Debug, Clone)]
pub struct PlateConfigBuilder {
    seed: Option<u64>,
    map_size: MapSize,
    point_layout: PointLayout,
    growth: GrowthConfig,
}

impl PlateConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - map_size: Small (16 × 16)
    /// - point_layout: Grid
    /// - plate_count: 12
    /// - land_probability: drawn from 0.3..0.55
    /// - land/sea growth: 0.707 / 1.414
    /// - unclaimed_slack: 3
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: MapSize::default(),
            point_layout: PointLayout::default(),
            growth: GrowthConfig::default(),
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map size preset
    pub fn map_size(mut self, size: MapSize) -> Self {
        self.map_size = size;
        self
    }

    /// Set the point placement strategy
    pub fn point_layout(mut self, layout: PointLayout) -> Self {
        self.point_layout = layout;
        self
    }

    /// Set the number of plates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` is zero
    pub fn plate_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(MeshError::InvalidConfig("plate count must be > 0".to_string()));
        }
        self.growth.plate_count = count;
        Ok(self)
    }

    /// Set the probability that a plate is land
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `probability` is outside [0, 1]
    pub fn land_probability(mut self, probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(MeshError::InvalidConfig(format!(
                "land probability must be within [0, 1] (got {})",
                probability
            )));
        }
        self.growth.land_probability = Some(probability);
        Ok(self)
    }

    /// Set the per-round budget increments for land and sea plates
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either rate is not a positive finite number
    pub fn growth_rates(mut self, land: f64, sea: f64) -> Result<Self> {
        let growth = GrowthConfig {
            land_growth: land,
            sea_growth: sea,
            ..self.growth
        };
        growth.validate()?;
        self.growth = growth;
        Ok(self)
    }

    /// Set how many points may stay unclaimed when growth stops
    pub fn unclaimed_slack(mut self, slack: usize) -> Self {
        self.growth.unclaimed_slack = slack;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the map has fewer than two points along an axis
    pub fn build(self) -> Result<PlateConfig> {
        let (width, height) = self.map_size.dimensions();
        if width < 2 || height < 2 {
            return Err(MeshError::InvalidConfig(format!(
                "map must be at least 2 x 2 (got {} x {})",
                width, height
            )));
        }
        self.growth.validate()?;

        Ok(PlateConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            map_size: self.map_size,
            point_layout: self.point_layout,
            growth: self.growth,
        })
    }
}

impl Default for PlateConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_size_dimensions() {
        assert_eq!(MapSize::Small.dimensions(), (16, 16));
        assert_eq!(MapSize::Medium.dimensions(), (48, 48));
        assert_eq!(MapSize::Large.dimensions(), (100, 100));
        assert_eq!(MapSize::Large.point_count(), 10_000);
    }

    #[test]
    fn test_map_size_custom() {
        let custom = MapSize::Custom { width: 20, height: 10 };
        assert_eq!(custom.dimensions(), (20, 10));
        assert_eq!(custom.point_count(), 200);
        assert_eq!(custom.name(), "Custom");
    }

    #[test]
    fn test_builder_defaults() {
        let config = PlateConfigBuilder::new().build().unwrap();
        assert_eq!(config.map_size, MapSize::Small);
        assert_eq!(config.point_layout, PointLayout::Grid);
        assert_eq!(config.growth.plate_count, 12);
        assert_eq!(config.growth.land_probability, None);
        assert_eq!(config.growth.land_growth, DEFAULT_LAND_GROWTH);
        assert_eq!(config.growth.sea_growth, DEFAULT_SEA_GROWTH);
        assert_eq!(config.growth.unclaimed_slack, 3);
    }

    #[test]
    fn test_builder_custom() {
        let config = PlateConfigBuilder::new()
            .seed(42)
            .map_size(MapSize::Large)
            .point_layout(PointLayout::Perlin)
            .plate_count(24)
            .unwrap()
            .land_probability(0.55)
            .unwrap()
            .growth_rates(1.0, 3.0)
            .unwrap()
            .unclaimed_slack(0)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.map_size, MapSize::Large);
        assert_eq!(config.point_layout, PointLayout::Perlin);
        assert_eq!(config.growth.plate_count, 24);
        assert_eq!(config.growth.land_probability, Some(0.55));
        assert_eq!(config.growth.land_growth, 1.0);
        assert_eq!(config.growth.sea_growth, 3.0);
        assert_eq!(config.growth.unclaimed_slack, 0);
    }

    #[test]
    fn test_builder_rejects_zero_plates() {
        assert!(PlateConfigBuilder::new().plate_count(0).is_err());
    }

    #[test]
    fn test_builder_rejects_bad_probability() {
        assert!(PlateConfigBuilder::new().land_probability(1.5).is_err());
        assert!(PlateConfigBuilder::new().land_probability(-0.1).is_err());
        assert!(PlateConfigBuilder::new().land_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_builder_rejects_bad_growth() {
        assert!(PlateConfigBuilder::new().growth_rates(0.0, 1.0).is_err());
        assert!(PlateConfigBuilder::new().growth_rates(1.0, -1.0).is_err());
        assert!(PlateConfigBuilder::new().growth_rates(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_builder_rejects_tiny_map() {
        let result = PlateConfigBuilder::new()
            .map_size(MapSize::Custom { width: 1, height: 10 })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_growth_config_validate() {
        assert!(GrowthConfig::default().validate().is_ok());

        let invalid = GrowthConfig {
            plate_count: 0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = PlateConfigBuilder::new()
            .seed(12345)
            .map_size(MapSize::Custom { width: 30, height: 20 })
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: PlateConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
