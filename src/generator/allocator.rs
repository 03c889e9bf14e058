//! Quad partition of the board into square blocks.
//!
//! Blocks live in a FIFO. A figure takes the first free block; when none is
//! left, the oldest block is evicted (its figure is dropped) and quartered into
//! four free children appended at the back. Each block keeps the holes placed in
//! it, so eviction never depends on the order in which coordinates were pushed.

use crate::instance::Point;
use std::collections::VecDeque;

/// A square region of the board
#[derive(Debug, Clone)]
pub struct Block {
    pub center: Point,
    pub side: f64,
    pub occupied: bool,
    /// Holes placed in this block while occupied
    pub points: Vec<Point>,
}

impl Block {
    fn free(center: Point, side: f64) -> Self {
        Block {
            center,
            side,
            occupied: false,
            points: Vec::new(),
        }
    }

    /// Number of holes placed in this block
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// The four children obtained by halving the side, in the order
    /// bottom-left, bottom-right, top-left, top-right.
    pub fn quarter(&self) -> [Block; 4] {
        let side = self.side / 2.0;
        let offset = side / 2.0;
        let Point { x, y } = self.center;
        [
            Block::free(Point::new(x - offset, y - offset), side),
            Block::free(Point::new(x + offset, y - offset), side),
            Block::free(Point::new(x - offset, y + offset), side),
            Block::free(Point::new(x + offset, y + offset), side),
        ]
    }

    /// Whether `p` lies inside the block (borders included)
    pub fn contains(&self, p: Point) -> bool {
        let half = self.side / 2.0 + 1e-9;
        (p.x - self.center.x).abs() <= half && (p.y - self.center.y).abs() <= half
    }
}

/// Result of a block request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired {
    /// Index of the block, now marked occupied
    pub index: usize,
    /// Holes removed from the board by an eviction (0 if none happened)
    pub released: usize,
}

#[derive(Debug, Clone)]
pub struct QuadAllocator {
    blocks: VecDeque<Block>,
    evictions: usize,
}

impl QuadAllocator {
    /// Partition a square of the given `side` centred on `center` into four blocks
    pub fn new(center: Point, side: f64) -> Self {
        let root = Block::free(center, side);
        QuadAllocator {
            blocks: root.quarter().into_iter().collect(),
            evictions: 0,
        }
    }

    /// Take the first free block, evicting and splitting the oldest one when
    /// the board is full.
    pub fn find_free_block(&mut self) -> Acquired {
        if let Some(index) = self.blocks.iter().position(|b| !b.occupied) {
            self.blocks[index].occupied = true;
            return Acquired { index, released: 0 };
        }

        // Full: there is always at least one block, four after construction.
        let oldest = match self.blocks.pop_front() {
            Some(block) => block,
            None => unreachable!("quad allocator never runs out of blocks"),
        };
        let released = oldest.num_vertices();
        self.blocks.extend(oldest.quarter());
        self.evictions += 1;

        log::debug!(
            "evicted block at ({:.2}, {:.2}) side {:.2}, released {} holes",
            oldest.center.x,
            oldest.center.y,
            oldest.side,
            released
        );

        let index = self.blocks.len() - 4;
        self.blocks[index].occupied = true;
        Acquired { index, released }
    }

    /// Record the holes placed in an occupied block
    pub fn fill(&mut self, index: usize, points: Vec<Point>) {
        let block = &mut self.blocks[index];
        debug_assert!(block.occupied, "filling a free block");
        block.points = points;
    }

    #[inline]
    pub fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn evictions(&self) -> usize {
        self.evictions
    }

    /// Total holes currently held by the blocks
    pub fn placed_vertices(&self) -> usize {
        self.blocks.iter().map(Block::num_vertices).sum()
    }

    /// All holes, oldest block first
    pub fn coordinates(&self) -> Vec<Point> {
        self.blocks.iter().flat_map(|b| b.points.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(c: Point) -> Vec<Point> {
        vec![c, Point::new(c.x + 1.0, c.y), Point::new(c.x, c.y + 1.0)]
    }

    #[test]
    fn test_initial_partition() {
        let alloc = QuadAllocator::new(Point::new(100.0, 100.0), 200.0);
        assert_eq!(alloc.len(), 4);

        let first = alloc.block(0);
        assert_eq!(first.side, 100.0);
        assert_eq!(first.center, Point::new(50.0, 50.0));
        assert_eq!(alloc.block(3).center, Point::new(150.0, 150.0));
        assert!(alloc.blocks().all(|b| !b.occupied));
    }

    #[test]
    fn test_free_blocks_taken_in_order() {
        let mut alloc = QuadAllocator::new(Point::new(100.0, 100.0), 200.0);

        for expected in 0..4 {
            let got = alloc.find_free_block();
            assert_eq!(got, Acquired { index: expected, released: 0 });
        }
        assert_eq!(alloc.evictions(), 0);
    }

    #[test]
    fn test_eviction_splits_oldest_block() {
        let mut alloc = QuadAllocator::new(Point::new(100.0, 100.0), 200.0);
        for _ in 0..4 {
            let got = alloc.find_free_block();
            let center = alloc.block(got.index).center;
            alloc.fill(got.index, triangle_at(center));
        }
        assert_eq!(alloc.placed_vertices(), 12);

        let got = alloc.find_free_block();
        assert_eq!(got.released, 3);
        assert_eq!(got.index, 3);
        assert_eq!(alloc.len(), 7);
        assert_eq!(alloc.evictions(), 1);
        assert_eq!(alloc.placed_vertices(), 9);

        // Children of the evicted block (50, 50, side 100)
        let child = alloc.block(got.index);
        assert!(child.occupied);
        assert_eq!(child.side, 50.0);
        assert_eq!(child.center, Point::new(25.0, 25.0));
        assert!(alloc.blocks().skip(4).all(|b| !b.occupied));
    }

    #[test]
    fn test_coordinates_follow_block_order() {
        let mut alloc = QuadAllocator::new(Point::new(100.0, 100.0), 200.0);
        let a = alloc.find_free_block();
        alloc.fill(a.index, vec![Point::new(1.0, 1.0)]);
        let b = alloc.find_free_block();
        alloc.fill(b.index, vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);

        assert_eq!(
            alloc.coordinates(),
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)]
        );
    }
}
