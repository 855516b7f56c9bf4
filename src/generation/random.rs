//! Uniformly scattered points

use glam::DVec2;
use rand::Rng;

use super::{sort_by_x, PointGenerator};

/// `count` points drawn uniformly from [-1, 1]²
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPoints {
    pub count: usize,
}

impl PointGenerator for RandomPoints {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec2> {
        let mut points: Vec<DVec2> = (0..self.count)
            .map(|_| DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        sort_by_x(&mut points);
        points
    }
}
