//! Board generators.
//!
//! Three strategies are available:
//! - random edge weights (symmetric or not), with no underlying coordinates
//! - holes on a regular grid, each cell kept by a coin toss
//! - holes as vertices of regular polygons packed into a quad partition of the board

pub mod allocator;
pub mod figure;
pub mod geometric;
pub mod grid;
pub mod random;

pub use allocator::{Acquired, Block, QuadAllocator};
pub use figure::{filler_holes, Figure, MAX_POLY_SIZE, POLY_RADIUS_RATIO};
pub use geometric::GeometricBoardGenerator;
pub use grid::{find_holes_per_side, GridBoardGenerator};
pub use random::RandomBoardGenerator;

use crate::error::Result;
use crate::instance::Board;
use rand::RngCore;

pub trait BoardGenerator {
    /// Produce a board with exactly `num_holes` holes
    fn generate(&self, num_holes: usize, rng: &mut dyn RngCore) -> Result<Board>;
    fn name(&self) -> &str;
}
