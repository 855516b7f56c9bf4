//! Point set generation
//!
//! Generators produce x-sorted point sets for the triangulation. All of them
//! take an explicit random generator so results are reproducible from a seed
//! and independent of any shared global state.

mod grid;
mod noise;
mod random;

pub use grid::GridPoints;
pub use noise::{sample_noise_1d, sample_noise_fbm, PerlinPoints};
pub use random::RandomPoints;

use glam::DVec2;
use rand::Rng;

use crate::config::{PlateConfig, PointLayout};

/// Source of planar point sets
pub trait PointGenerator {
    /// Generate points sorted by ascending x
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec2>;
}

/// Generate the point set described by a configuration
///
/// The point count follows `map_size`: a grid layout uses width × height
/// cells, the scattered layouts draw the same number of points.
pub fn generate_points<R: Rng + ?Sized>(config: &PlateConfig, rng: &mut R) -> Vec<DVec2> {
    let (width, height) = config.map_size.dimensions();
    match config.point_layout {
        PointLayout::Grid => GridPoints { width, height }.generate(rng),
        PointLayout::Random => RandomPoints { count: width * height }.generate(rng),
        PointLayout::Perlin => PerlinPoints::new(width * height).generate(rng),
    }
}

/// Stable sort by x, as required by the triangulation
pub(crate) fn sort_by_x(points: &mut [DVec2]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
}
