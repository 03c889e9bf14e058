//! Regular polygons used by the geometric generator.

use super::allocator::Block;
use crate::error::{Error, Result};
use crate::instance::{Point, SIDE};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Largest polygon placed in a block
pub const MAX_POLY_SIZE: usize = 8;
/// Block side / this ratio bounds the polygon radius
pub const POLY_RADIUS_RATIO: f64 = 3.0;

/// A regular polygon inscribed in a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub center: Point,
    pub radius: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub num_vertices: usize,
}

impl Figure {
    pub fn new(center: Point, radius: f64, rotation: f64, num_vertices: usize) -> Self {
        Figure {
            center,
            radius,
            rotation,
            num_vertices,
        }
    }

    /// Draw a random polygon fitting in `block` with at most `available`
    /// vertices (and at least 3). The rotation is a whole number of degrees in
    /// [1, 90] and the radius lies in [side / 6, side / 3].
    pub fn random(block: &Block, available: usize, rng: &mut dyn RngCore) -> Self {
        let max_vertices = available.clamp(3, MAX_POLY_SIZE);
        let num_vertices = rng.gen_range(3..=max_vertices);
        let degrees: u32 = rng.gen_range(1..=90);
        let radius = block.side / POLY_RADIUS_RATIO * rng.gen_range(0.5..=1.0);

        Figure::new(
            block.center,
            radius,
            f64::from(degrees).to_radians(),
            num_vertices,
        )
    }

    /// Vertex `i` sits at angle `2*pi*i/n + rotation`
    pub fn vertices(&self) -> Vec<Point> {
        let n = self.num_vertices as f64;
        (0..self.num_vertices)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / n + self.rotation;
                Point::new(
                    self.radius * angle.cos() + self.center.x,
                    self.radius * angle.sin() + self.center.y,
                )
            })
            .collect()
    }
}

/// Holes added when fewer than 3 remain to be placed. One hole goes to the
/// board centre; two go to opposite quarter points on a diagonal picked at
/// random.
pub fn filler_holes(count: usize, rng: &mut dyn RngCore) -> Result<Vec<Point>> {
    let q1 = SIDE / 4.0;
    let q3 = 3.0 * SIDE / 4.0;

    match count {
        1 => Ok(vec![Point::new(SIDE / 2.0, SIDE / 2.0)]),
        2 => {
            if rng.gen_bool(0.5) {
                Ok(vec![Point::new(q1, q1), Point::new(q3, q3)])
            } else {
                Ok(vec![Point::new(q1, q3), Point::new(q3, q1)])
            }
        }
        other => Err(Error::InvalidInstance(format!(
            "filler holes cover 1 or 2 holes, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::QuadAllocator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_square_vertices() {
        let square = Figure::new(Point::new(10.0, 10.0), 2.0, 0.0, 4);
        let v = square.vertices();

        assert_eq!(v.len(), 4);
        assert!((v[0].x - 12.0).abs() < 1e-10 && (v[0].y - 10.0).abs() < 1e-10);
        assert!((v[1].x - 10.0).abs() < 1e-10 && (v[1].y - 12.0).abs() < 1e-10);
        assert!((v[2].x - 8.0).abs() < 1e-10);
        assert!((v[3].y - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_random_figure_fits_block() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut alloc = QuadAllocator::new(Point::new(100.0, 100.0), 200.0);
        let slot = alloc.find_free_block();
        let block = alloc.block(slot.index).clone();

        for available in [3, 5, 40] {
            let figure = Figure::random(&block, available, &mut rng);
            assert!(figure.num_vertices >= 3);
            assert!(figure.num_vertices <= available.min(MAX_POLY_SIZE));
            assert!(figure.rotation > 0.0 && figure.rotation <= PI / 2.0 + 1e-12);
            assert!(figure.vertices().iter().all(|&p| block.contains(p)));
        }
    }

    #[test]
    fn test_filler_holes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(filler_holes(1, &mut rng).unwrap(), vec![Point::new(100.0, 100.0)]);

        let pair = filler_holes(2, &mut rng).unwrap();
        assert_eq!(pair.len(), 2);
        assert!(pair.contains(&Point::new(50.0, 50.0)) || pair.contains(&Point::new(50.0, 150.0)));

        assert!(matches!(filler_holes(3, &mut rng), Err(Error::InvalidInstance(_))));
    }
}
