use super::allocator::QuadAllocator;
use super::figure::{filler_holes, Figure};
use super::BoardGenerator;
use crate::error::{Error, Result};
use crate::instance::{Board, Point, SIDE};
use crate::metric::Metric;
use rand::RngCore;

/// Boards whose holes are vertices of regular polygons.
///
/// Each polygon gets its own block of a quad partition of the board, so no
/// two figures overlap. Once the partition is full, the oldest block is
/// evicted and split. The last 1 or 2 holes are fixed filler positions.
#[derive(Debug, Clone)]
pub struct GeometricBoardGenerator {
    pub metric: Metric,
}

impl GeometricBoardGenerator {
    pub fn new(metric: Metric) -> Self {
        GeometricBoardGenerator { metric }
    }

    /// Place the figures and return the allocator holding them plus the fillers
    pub fn layout(
        &self,
        num_holes: usize,
        rng: &mut dyn RngCore,
    ) -> Result<(QuadAllocator, Vec<Point>)> {
        if num_holes < 3 {
            return Err(Error::InvalidInstance(format!(
                "geometric boards need at least 3 holes, got {}",
                num_holes
            )));
        }

        let mut allocator = QuadAllocator::new(Point::new(SIDE / 2.0, SIDE / 2.0), SIDE);
        let mut fillers = Vec::new();
        let mut placed = 0usize;

        while placed != num_holes {
            let available = num_holes - placed;
            if available < 3 {
                fillers = filler_holes(available, rng)?;
                placed += available;
                continue;
            }

            let slot = allocator.find_free_block();
            placed -= slot.released;
            let figure = Figure::random(allocator.block(slot.index), num_holes - placed, rng);
            let vertices = figure.vertices();
            placed += vertices.len();
            allocator.fill(slot.index, vertices);
        }

        log::debug!(
            "geometric board with {} holes: {} blocks, {} evictions, {} fillers",
            num_holes,
            allocator.len(),
            allocator.evictions(),
            fillers.len()
        );

        Ok((allocator, fillers))
    }
}

impl BoardGenerator for GeometricBoardGenerator {
    fn generate(&self, num_holes: usize, rng: &mut dyn RngCore) -> Result<Board> {
        let (allocator, fillers) = self.layout(num_holes, rng)?;
        let mut points = allocator.coordinates();
        points.extend(fillers);

        let mut board = Board::from_points(points, self.metric)?;
        board.name = format!("geometric{}", num_holes);
        Ok(board)
    }

    fn name(&self) -> &str {
        "geometric"
    }
}
