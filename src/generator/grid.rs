use super::BoardGenerator;
use crate::error::{Error, Result};
use crate::instance::{Board, Point, SIDE};
use crate::metric::Metric;
use rand::{Rng, RngCore};

/// Smallest spacing allowed between two grid holes
const MIN_INTERVAL: f64 = 0.01;

/// Square grid able to hold roughly `num_holes` holes.
///
/// Returns `(holes_per_side, holes_per_side^2)`. When `num_holes` is not a
/// perfect square the count is rounded to the closest one.
pub fn find_holes_per_side(num_holes: usize) -> (usize, usize) {
    let holes_per_side = (num_holes as f64).sqrt().round() as usize;
    let achievable = holes_per_side * holes_per_side;
    if achievable != num_holes {
        log::warn!(
            "cannot create a grid with {} holes, rounding to the closest square ({})",
            num_holes,
            achievable
        );
    }
    (holes_per_side, achievable)
}

/// Coin-toss grid boards.
///
/// Cells are laid out on a grid sized for twice the requested holes and each
/// cell is punched with probability 0.5. Draws that do not give exactly the
/// requested count are thrown away and the whole grid is tossed again.
#[derive(Debug, Clone)]
pub struct GridBoardGenerator {
    pub metric: Metric,
}

impl GridBoardGenerator {
    pub fn new(metric: Metric) -> Self {
        GridBoardGenerator { metric }
    }
}

impl BoardGenerator for GridBoardGenerator {
    fn generate(&self, num_holes: usize, rng: &mut dyn RngCore) -> Result<Board> {
        if num_holes < 1 {
            return Err(Error::InvalidInstance(
                "a board needs at least one hole".to_string(),
            ));
        }

        let (holes_per_side, achievable) = find_holes_per_side(2 * num_holes);
        let interval = SIDE / holes_per_side as f64;
        if interval < MIN_INTERVAL {
            return Err(Error::InvalidInstance(format!(
                "too many holes ({}): grid spacing would be {:.4}",
                num_holes, interval
            )));
        }
        if achievable < num_holes {
            return Err(Error::InvalidInstance(format!(
                "a {}x{} grid cannot hold {} holes",
                holes_per_side, holes_per_side, num_holes
            )));
        }

        let mut points = Vec::with_capacity(achievable);
        let mut attempts = 0usize;
        while points.len() != num_holes {
            points.clear();
            attempts += 1;
            for i in 0..holes_per_side {
                for j in 0..holes_per_side {
                    if rng.gen::<f64>() > 0.5 {
                        points.push(Point::new(
                            j as f64 * interval + interval / 2.0,
                            i as f64 * interval + interval / 2.0,
                        ));
                    }
                }
            }
        }

        log::debug!(
            "grid board with {} holes after {} tosses ({}x{} cells)",
            num_holes,
            attempts,
            holes_per_side,
            holes_per_side
        );

        let mut board = Board::from_points(points, self.metric)?;
        board.name = format!("grid{}", num_holes);
        Ok(board)
    }

    fn name(&self) -> &str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_find_holes_per_side() {
        assert_eq!(find_holes_per_side(9), (3, 9));
        assert_eq!(find_holes_per_side(10), (3, 9));
        assert_eq!(find_holes_per_side(24), (5, 25));
        assert_eq!(find_holes_per_side(2), (1, 1));
    }

    #[test]
    fn test_grid_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let board = GridBoardGenerator::new(Metric::Manhattan)
            .generate(12, &mut rng)
            .unwrap();

        assert_eq!(board.dimension(), 12);
        assert!(board.is_symmetric());

        // 24 -> 5x5 grid, spacing 40, cell centres at 20 + 40k
        for p in &board.points {
            for c in [p.x, p.y] {
                let k = (c - 20.0) / 40.0;
                assert!((k - k.round()).abs() < 1e-9);
                assert!((0.0..=4.0).contains(&k.round()));
            }
        }
        // Cells are visited row by row
        for w in board.points.windows(2) {
            assert!(w[0].y < w[1].y || (w[0].y == w[1].y && w[0].x < w[1].x));
        }
    }

    #[test]
    fn test_grid_rejects_empty_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            GridBoardGenerator::new(Metric::Euclidean).generate(0, &mut rng),
            Err(Error::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_grid_rejects_dense_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // sqrt(2 * 300_000_000) rounds to 24495 per side, spacing < 0.01
        assert!(matches!(
            GridBoardGenerator::new(Metric::Euclidean).generate(300_000_000, &mut rng),
            Err(Error::InvalidInstance(_))
        ));
    }
}
