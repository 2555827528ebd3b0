//! Landscape grids
//!
//! The spread engine sees the landscape only through the [`Landscape`] trait.
//! [`GridLandscape`] is the in-memory implementation, built either by
//! generating clustered non-flammable patches or by importing ASCII grids.

pub mod generation;
pub mod landscape;

pub use generation::LandscapeParameters;
pub use landscape::{GridLandscape, GROUND_COVER_FILE, DEAD_BIOMASS_FILE, LIVE_BIOMASS_FILE};

use crate::core_types::Cell;

/// Rectangular grid of cells addressed by `(x, y)`, `x` eastward and `y` northward
///
/// Cell access outside `0..width × 0..height` is a programming error and panics.
pub trait Landscape {
    /// Number of columns
    fn width(&self) -> usize;

    /// Number of rows
    fn height(&self) -> usize;

    /// Edge length of one square cell (m)
    fn cell_size(&self) -> f32;

    fn cell(&self, x: usize, y: usize) -> &Cell;

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell;

    /// Whether signed coordinates fall inside the grid
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}
