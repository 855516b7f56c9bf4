//! Jittered grid points

use glam::DVec2;
use rand::Rng;

use super::{sort_by_x, PointGenerator};

/// A `width` × `height` grid over [-0.5, 0.5]² with per-cell jitter
///
/// Each interior point is moved by a random fraction of a cell in both axes.
/// The outermost rows and columns are pinned to the border so the mesh always
/// covers the full square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoints {
    pub width: usize,
    pub height: usize,
}

impl GridPoints {
    /// Cell coordinate of `cell` (0-based) along an axis with `cells` cells
    ///
    /// Cell 0 maps to -0.5 and the last cell to 0.5 for any cell count.
    fn coordinate<R: Rng + ?Sized>(cell: usize, cells: usize, rng: &mut R) -> f64 {
        let base = cell as f64 - cells as f64 / 2.0;
        let value = if cell == 0 {
            base
        } else if cell == cells - 1 {
            base + 1.0
        } else {
            base + rng.gen::<f64>()
        };
        value / cells as f64
    }
}

impl PointGenerator for GridPoints {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec2> {
        let mut points = Vec::with_capacity(self.width * self.height);

        for column in 0..self.width {
            for row in 0..self.height {
                let y = Self::coordinate(row, self.height, rng);
                let x = Self::coordinate(column, self.width, rng);
                points.push(DVec2::new(x, y));
            }
        }

        sort_by_x(&mut points);
        points
    }
}
