use super::BoardGenerator;
use crate::error::{Error, Result};
use crate::instance::Board;
use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

/// Boards with random travel times drawn uniformly in [1, upper_bound].
///
/// The diagonal stays at zero. In the symmetric variant only the upper
/// triangle is drawn and mirrored.
#[derive(Debug, Clone)]
pub struct RandomBoardGenerator {
    pub upper_bound: f64,
    pub symmetric: bool,
}

impl RandomBoardGenerator {
    pub fn asymmetric(upper_bound: f64) -> Self {
        RandomBoardGenerator {
            upper_bound,
            symmetric: false,
        }
    }

    pub fn symmetric(upper_bound: f64) -> Self {
        RandomBoardGenerator {
            upper_bound,
            symmetric: true,
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&self, num_holes: usize, rng: &mut dyn RngCore) -> Result<Board> {
        if num_holes < 1 {
            return Err(Error::InvalidInstance(
                "a board needs at least one hole".to_string(),
            ));
        }
        if self.upper_bound.is_nan() || self.upper_bound < 1.0 {
            return Err(Error::InvalidInstance(format!(
                "upper bound {} is below 1",
                self.upper_bound
            )));
        }

        let weights = Uniform::new_inclusive(1.0, self.upper_bound);
        let n = num_holes;
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i == j || (self.symmetric && j < i) {
                    continue;
                }
                let w = weights.sample(rng);
                matrix[i][j] = w;
                if self.symmetric {
                    matrix[j][i] = w;
                }
            }
        }

        let mut board = Board::from_matrix(matrix)?;
        board.name = format!("{}{}", self.name(), n);
        Ok(board)
    }

    fn name(&self) -> &str {
        if self.symmetric {
            "random-symmetric"
        } else {
            "random-asymmetric"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_symmetric_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = RandomBoardGenerator::symmetric(10.0)
            .generate(6, &mut rng)
            .unwrap();

        assert!(board.is_symmetric());
        assert!(!board.has_coordinates());
        for i in 0..6 {
            assert_eq!(board.distance(i, i), 0.0);
            for j in 0..6 {
                if i != j {
                    let w = board.distance(i, j);
                    assert!((1.0..=10.0).contains(&w));
                }
            }
        }
    }

    #[test]
    fn test_asymmetric_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let board = RandomBoardGenerator::asymmetric(1000.0)
            .generate(8, &mut rng)
            .unwrap();

        assert_eq!(board.dimension(), 8);
        assert!(!board.is_symmetric());
    }

    #[test]
    fn test_single_hole() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let board = RandomBoardGenerator::asymmetric(5.0)
            .generate(1, &mut rng)
            .unwrap();
        assert_eq!(board.distance_matrix, vec![vec![0.0]]);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(matches!(
            RandomBoardGenerator::symmetric(10.0).generate(0, &mut rng),
            Err(Error::InvalidInstance(_))
        ));
        assert!(matches!(
            RandomBoardGenerator::asymmetric(0.5).generate(4, &mut rng),
            Err(Error::InvalidInstance(_))
        ));
    }
}
