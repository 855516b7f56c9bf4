//! 1D gradient noise and noise-distributed points
//!
//! A one-dimensional variant of Perlin noise: each integer lattice point
//! carries a random gradient and a random offset value, blended with the
//! quintic fade curve. Layering octaves gives clustered, organic point
//! distributions instead of uniform scatter.

use glam::DVec2;
use rand::Rng;

use super::{sort_by_x, PointGenerator};

/// Octaves used for point coordinates
const POINT_OCTAVES: usize = 4;


/// Integer hash of a lattice coordinate mixed with a seed
#[inline]
fn hash(i: i64, seed: u32) -> u32 {
    let mut h = (i as u32) ^ ((i >> 32) as u32).rotate_left(16) ^ seed.wrapping_mul(0x9E37_79B9);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

/// Map a hash to [0, 1]
#[inline]
fn unit(h: u32) -> f64 {
    h as f64 / u32::MAX as f64
}

/// Quintic smoothstep: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Sample one octave of 1D noise
///
/// Returns a value in [-1.5, 1.5]: a gradient term in [-1, 1] plus a value
/// term in [-0.5, 0.5].
pub fn sample_noise_1d(x: f64, seed: u32) -> f64 {
    let base = x.floor();
    let shift = x - base;
    let i0 = base as i64;
    let i1 = i0 + 1;

    let h0 = hash(i0, seed);
    let h1 = hash(i1, seed);

    let grad_base = (unit(h0) * 2.0 - 1.0) * shift;
    let grad_step = (unit(h1) * 2.0 - 1.0) * (shift - 1.0);
    let value_base = unit(hash(i0, seed ^ 0xA5A5_A5A5)) - 0.5;
    let value_step = unit(hash(i1, seed ^ 0xA5A5_A5A5)) - 0.5;

    let t = fade(shift);
    lerp(grad_base, grad_step, t) + lerp(value_base, value_step, t)
}

/// Layered 1D noise, normalized by the total amplitude
pub fn sample_noise_fbm(
    x: f64,
    seed: u32,
    octaves: usize,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for octave in 0..octaves {
        total += sample_noise_1d(x * frequency, seed.wrapping_add(octave as u32)) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}

/// `count` points whose coordinates follow layered 1D noise
///
/// Each coordinate samples the noise at a random position in `[0, span)`.
/// A short span covers few lattice cells and clusters the points along a
/// handful of bands; a wide span spreads them over many cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerlinPoints {
    pub count: usize,
    pub span: f64,
}

impl PerlinPoints {
    /// Sample span giving strongly clustered points
    pub const DEFAULT_SPAN: f64 = 8.0;

    /// Sample span giving an even spread over the noise range
    pub const WIDE_SPAN: f64 = 40.0;

    pub fn new(count: usize) -> Self {
        Self {
            count,
            span: Self::DEFAULT_SPAN,
        }
    }

    pub fn wide(count: usize) -> Self {
        Self {
            count,
            span: Self::WIDE_SPAN,
        }
    }
}

impl PointGenerator for PerlinPoints {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec2> {
        let x_seed: u32 = rng.gen();
        let y_seed: u32 = rng.gen();

        let mut points: Vec<DVec2> = (0..self.count)
            .map(|_| {
                let x = rng.gen::<f64>() * self.span;
                let y = rng.gen::<f64>() * self.span;
                DVec2::new(
                    sample_noise_fbm(x, x_seed, POINT_OCTAVES, 0.5, 2.0),
                    sample_noise_fbm(y, y_seed, POINT_OCTAVES, 0.5, 2.0),
                )
            })
            .collect();

        sort_by_x(&mut points);
        points
    }
}
