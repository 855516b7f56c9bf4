//! Weighted multi-source plate growth
//!
//! Every plate starts from one seed point and expands round by round over the
//! point adjacency graph. Each round a plate earns a fixed budget increment
//! (larger for sea plates); while its budget is positive it consumes its whole
//! shell, claiming every unowned neighbor and paying the squared distance to
//! it. Budgets may be overdrawn within a round and recover in later rounds.

use log::{debug, warn};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Plate, PlateMap, PlateType};
use crate::config::{GrowthConfig, PlateConfig, LAND_PROBABILITY_RANGE};
use crate::error::{MeshError, Result};
use crate::generation::generate_points;
use crate::point_map::PointMap;
use crate::triangulation::Triangulation;

/// ChaCha stream used for plate seeding, separate from point placement
const PLATE_STREAM: u64 = 1;

/// Lifecycle of a [`PlateGrower`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    /// Seeds placed, no round run yet
    Initialized,
    /// Rounds are being run
    Growing,
    /// Points are partitioned; triangles not yet attributed
    Partitioned,
    /// Triangles attributed; further steps do nothing
    Attributed,
}

/// Mutable growth front of one plate
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGenState {
    /// Point the plate grew from
    pub seed_point: usize,

    /// Land or sea, selects the budget increment
    pub plate_type: PlateType,

    /// Claimed points in claim order (seed first)
    pub points: Vec<usize>,

    /// Claimed points not yet expanded from
    pub shell: Vec<usize>,

    /// Accumulated growth budget, may be negative
    pub budget: f64,

    /// Attributed triangles (filled once partitioning completes)
    pub triangles: Vec<usize>,

    /// Total unsigned area of the attributed triangles
    pub area: f64,
}

impl PlateGenState {
    fn new(seed_point: usize, plate_type: PlateType) -> Self {
        Self {
            seed_point,
            plate_type,
            points: vec![seed_point],
            shell: vec![seed_point],
            budget: 0.0,
            triangles: Vec::new(),
            area: 0.0,
        }
    }
}

/// Incremental plate growth engine
///
/// Drive it one round at a time with [`step`](Self::step) (e.g. from an
/// animation loop, reading the partial state between steps), or run it to
/// the end with [`finish`](Self::finish).
///
/// When several plates can reach the same point in one round, the plate
/// created first wins. This tie-break is arbitrary and carries no fairness
/// guarantee.
///
/// # Example
///
/// ```
/// use plate_mesh::*;
///
/// let config = PlateConfigBuilder::new()
///     .seed(7)
///     .plate_count(4)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let mut grower = PlateGrower::from_config(&config).unwrap();
/// while grower.step() != GrowthState::Attributed {}
///
/// let plate_map = grower.finish();
/// assert_eq!(plate_map.plate_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PlateGrower {
    point_map: PointMap,
    config: GrowthConfig,
    land_probability: f64,
    plates: Vec<PlateGenState>,
    owners: Vec<Option<usize>>,
    unclaimed: usize,
    state: GrowthState,
    rounds: usize,
    attributions: Vec<(usize, usize)>,
}

impl PlateGrower {
    /// Seed `config.plate_count` plates at distinct random points
    ///
    /// Seeds are drawn uniformly without replacement; each plate is land with
    /// probability `land_probability` (drawn from `LAND_PROBABILITY_RANGE`
    /// when not configured).
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the growth configuration is invalid
    /// - `ExhaustedPoints` if there are fewer points than plates
    pub fn new<R: Rng + ?Sized>(
        point_map: PointMap,
        config: GrowthConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let available = point_map.len();
        if config.plate_count > available {
            return Err(MeshError::ExhaustedPoints {
                requested: config.plate_count,
                available,
            });
        }

        let land_probability = config
            .land_probability
            .unwrap_or_else(|| rng.gen_range(LAND_PROBABILITY_RANGE));

        let seed_points = index::sample(rng, available, config.plate_count).into_vec();
        let seeds: Vec<(usize, PlateType)> = seed_points
            .into_iter()
            .map(|point| {
                let plate_type = if rng.gen_bool(land_probability) {
                    PlateType::Land
                } else {
                    PlateType::Sea
                };
                (point, plate_type)
            })
            .collect();

        let mut grower = Self::with_seeds(point_map, config, seeds)?;
        grower.land_probability = land_probability;
        Ok(grower)
    }

    /// Start growth from explicit seed points and types
    ///
    /// Plates are created in the order given. `config.plate_count` and
    /// `config.land_probability` are ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if no seeds are given, a seed repeats, or a growth rate is invalid
    /// - `PointNotFound` if a seed index is out of range
    pub fn with_seeds(
        point_map: PointMap,
        config: GrowthConfig,
        seeds: Vec<(usize, PlateType)>,
    ) -> Result<Self> {
        GrowthConfig {
            plate_count: seeds.len(),
            land_probability: None,
            ..config
        }
        .validate()?;

        let mut owners = vec![None; point_map.len()];
        let mut plates = Vec::with_capacity(seeds.len());

        for (plate_index, (point, plate_type)) in seeds.into_iter().enumerate() {
            let owner = owners.get_mut(point).ok_or(MeshError::PointNotFound(point))?;
            if owner.is_some() {
                return Err(MeshError::InvalidConfig(format!(
                    "point {} seeds more than one plate",
                    point
                )));
            }
            *owner = Some(plate_index);
            plates.push(PlateGenState::new(point, plate_type));
        }

        let land_count = plates.iter().filter(|p| p.plate_type == PlateType::Land).count();
        let land_probability = config
            .land_probability
            .unwrap_or(land_count as f64 / plates.len() as f64);

        debug!(
            "seeded {} plates ({} land) over {} points",
            plates.len(),
            land_count,
            point_map.len()
        );

        Ok(Self {
            unclaimed: point_map.len() - plates.len(),
            point_map,
            config,
            land_probability,
            plates,
            owners,
            state: GrowthState::Initialized,
            rounds: 0,
            attributions: Vec::new(),
        })
    }

    /// Build the mesh described by `config` and seed its plates
    ///
    /// Points come from stream 0 of a ChaCha generator seeded with
    /// `config.seed`, plate seeds from stream 1.
    pub fn from_config(config: &PlateConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let points = generate_points(config, &mut rng);
        let point_map = PointMap::new(Triangulation::new(points)?);

        let mut plate_rng = ChaCha8Rng::seed_from_u64(config.seed);
        plate_rng.set_stream(PLATE_STREAM);

        Self::new(point_map, config.growth, &mut plate_rng)
    }

    /// Advance the state machine by one step and return the new state
    ///
    /// The first call always runs a growth round and reports `Growing`.
    /// Later calls run a round unless the partition is already complete,
    /// and report `Partitioned` once it is. The next call attributes
    /// triangles, and any call after that does nothing.
    pub fn step(&mut self) -> GrowthState {
        match self.state {
            GrowthState::Initialized => {
                self.grow_round();
                self.state = GrowthState::Growing;
            }
            GrowthState::Growing => {
                if !self.partition_complete() {
                    self.grow_round();
                }
                if self.partition_complete() {
                    self.log_partition();
                    self.state = GrowthState::Partitioned;
                }
            }
            GrowthState::Partitioned => {
                self.attribute_triangles();
                self.state = GrowthState::Attributed;
            }
            GrowthState::Attributed => {}
        }
        self.state
    }

    /// Step until triangles are attributed
    pub fn run_to_completion(&mut self) {
        while self.step() != GrowthState::Attributed {}
    }

    /// Run to completion and freeze the result into a [`PlateMap`]
    pub fn finish(mut self) -> PlateMap {
        self.run_to_completion();

        let plates = self
            .plates
            .into_iter()
            .enumerate()
            .map(|(index, state)| Plate {
                index,
                seed_point: state.seed_point,
                plate_type: state.plate_type,
                points: state.points,
                triangles: state.triangles,
                area: state.area,
            })
            .collect();

        PlateMap::new(self.point_map, plates, self.owners, self.attributions)
    }

    /// One growth round over all plates in creation order
    fn grow_round(&mut self) {
        let Self {
            point_map,
            config,
            plates,
            owners,
            unclaimed,
            ..
        } = self;
        let map_points = point_map.points();

        for (plate_index, plate) in plates.iter_mut().enumerate() {
            plate.budget += plate.plate_type.growth_rate(config);
            if plate.budget <= 0.0 {
                continue;
            }

            for point in std::mem::take(&mut plate.shell) {
                let origin = &map_points[point];
                for &neighbor in &origin.neighbors {
                    if owners[neighbor].is_some() {
                        continue;
                    }
                    owners[neighbor] = Some(plate_index);
                    *unclaimed -= 1;
                    plate.points.push(neighbor);
                    plate.shell.push(neighbor);
                    plate.budget -= origin.position.distance_squared(map_points[neighbor].position);
                }
            }
        }

        self.rounds += 1;
    }

    /// Few enough points remain, or no plate can claim anything again
    fn partition_complete(&self) -> bool {
        self.unclaimed <= self.config.unclaimed_slack
            || self.plates.iter().all(|p| p.shell.is_empty())
    }

    fn log_partition(&self) {
        if self.unclaimed > self.config.unclaimed_slack {
            warn!(
                "plate growth stalled with {} points unreachable from any plate",
                self.unclaimed
            );
        } else {
            debug!(
                "partition complete after {} rounds, {} points unclaimed",
                self.rounds, self.unclaimed
            );
        }
    }

    /// Attribute every triangle to each plate owning at least one of its vertices
    fn attribute_triangles(&mut self) {
        let triangles = self.point_map.triangulation().triangles();

        for (triangle_index, triangle) in triangles.iter().enumerate() {
            let Some(vertices) = triangle.real_vertices() else {
                continue;
            };

            let mut owners: Vec<usize> = vertices.iter().filter_map(|&v| self.owners[v]).collect();
            owners.sort_unstable();
            owners.dedup();

            for plate_index in owners {
                let plate = &mut self.plates[plate_index];
                plate.triangles.push(triangle_index);
                plate.area += triangle.area();
                self.attributions.push((triangle_index, plate_index));
            }
        }

        debug!(
            "attributed {} triangles as {} (triangle, plate) pairs",
            triangles.len(),
            self.attributions.len()
        );
    }

    #[inline]
    pub fn state(&self) -> GrowthState {
        self.state
    }

    /// Growth fronts in creation order
    #[inline]
    pub fn plates(&self) -> &[PlateGenState] {
        &self.plates
    }

    #[inline]
    pub fn point_map(&self) -> &PointMap {
        &self.point_map
    }

    /// Plate owning a point, if claimed
    #[inline]
    pub fn owner_of(&self, point: usize) -> Option<usize> {
        self.owners.get(point).copied().flatten()
    }

    /// Number of points no plate has claimed yet
    #[inline]
    pub fn unclaimed_count(&self) -> usize {
        self.unclaimed
    }

    /// Number of growth rounds run so far
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Probability each plate had of being land
    #[inline]
    pub fn land_probability(&self) -> f64 {
        self.land_probability
    }

    /// (triangle, plate) pairs; empty until the attribution step has run
    #[inline]
    pub fn attributions(&self) -> &[(usize, usize)] {
        &self.attributions
    }
}
