//! Module for representing generated boards.
//!
//! A board is a set of holes on a 200x200 square together with the matrix of
//! travel times between them. Random-weight boards have no coordinates, only
//! the matrix.

use crate::error::{Error, Result};
use crate::generator::{
    BoardGenerator, GeometricBoardGenerator, GridBoardGenerator, RandomBoardGenerator,
};
use crate::metric::{distance_matrix, Metric};
use crate::persistence;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Side of the (square) board
pub const SIDE: f64 = 200.0;
/// Largest possible euclidean distance on the board
pub const MAX_DIAG: f64 = SIDE * std::f64::consts::SQRT_2;

/// A hole on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Strategy used to produce a board
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BoardKind {
    /// Random weights, (a->b) != (b->a)
    RandomAsymmetric,
    /// Random weights, mirrored
    RandomSymmetric,
    /// Holes on a grid, each cell kept with p = 0.5
    Grid,
    /// Holes as vertices of non-overlapping regular polygons
    Geometric,
}

/// A generated (or loaded) instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Name of the board
    pub name: String,
    /// How the board was produced, if known
    pub kind: Option<BoardKind>,
    /// Hole coordinates (empty for random-weight boards)
    pub points: Vec<Point>,
    /// Metric used to compute the matrix from `points`
    pub metric: Option<Metric>,
    /// Travel times between holes
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Board {
    /// Build a board from coordinates, computing the matrix with `metric`
    pub fn from_points(points: Vec<Point>, metric: Metric) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InvalidInstance("board has no holes".to_string()));
        }
        let distance_matrix = distance_matrix(&points, metric);

        Ok(Board {
            name: format!("board{}", points.len()),
            kind: None,
            points,
            metric: Some(metric),
            distance_matrix,
        })
    }

    /// Wrap an existing matrix (e.g. loaded from a `.dat` file)
    pub fn from_matrix(distance_matrix: Vec<Vec<f64>>) -> Result<Self> {
        let n = distance_matrix.len();
        if n == 0 {
            return Err(Error::InvalidInstance("board has no holes".to_string()));
        }
        if let Some(row) = distance_matrix.iter().position(|row| row.len() != n) {
            return Err(Error::InvalidInstance(format!(
                "row {} has {} entries, expected {}",
                row,
                distance_matrix[row].len(),
                n
            )));
        }

        Ok(Board {
            name: format!("tsp{}", n),
            kind: None,
            points: Vec::new(),
            metric: None,
            distance_matrix,
        })
    }

    /// Generate a board of the given kind with exactly `num_holes` holes
    pub fn generate(
        kind: BoardKind,
        num_holes: usize,
        metric: Metric,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        let mut board = match kind {
            BoardKind::RandomAsymmetric => {
                RandomBoardGenerator::asymmetric(MAX_DIAG).generate(num_holes, rng)?
            }
            BoardKind::RandomSymmetric => {
                RandomBoardGenerator::symmetric(MAX_DIAG).generate(num_holes, rng)?
            }
            BoardKind::Grid => GridBoardGenerator::new(metric).generate(num_holes, rng)?,
            BoardKind::Geometric => GeometricBoardGenerator::new(metric).generate(num_holes, rng)?,
        };
        board.kind = Some(kind);
        Ok(board)
    }

    /// Number of holes
    #[inline]
    pub fn dimension(&self) -> usize {
        self.distance_matrix.len()
    }

    /// Get the travel time between two holes
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    pub fn has_coordinates(&self) -> bool {
        self.points.len() == self.dimension()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.dimension();
        (0..n).all(|i| (i + 1..n).all(|j| self.distance_matrix[i][j] == self.distance_matrix[j][i]))
    }

    /// Closed tour length (includes the edge back to the first hole)
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        tour_length(&self.distance_matrix, tour)
    }

    /// Write `tsp{N}.dat` and, when coordinates exist, `coordinates_{N}.csv`
    /// into `dir`. Returns the paths written.
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::persistence(dir, e))?;

        let n = self.dimension();
        let mut written = Vec::with_capacity(2);

        let dat = dir.join(persistence::matrix_file_name(n));
        persistence::save_matrix_dat(&dat, &self.distance_matrix)?;
        written.push(dat);

        if self.has_coordinates() {
            let csv = dir.join(persistence::coordinates_file_name(n));
            persistence::save_coordinates_csv(&csv, &self.points)?;
            written.push(csv);
        }

        Ok(written)
    }

    /// Get statistics about the board
    pub fn statistics(&self) -> BoardStatistics {
        let n = self.dimension();
        let mut distances: Vec<f64> = Vec::with_capacity(n * n.saturating_sub(1));
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    distances.push(self.distance(i, j));
                }
            }
        }
        let (avg_distance, min_distance, max_distance) = if distances.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                distances.iter().sum::<f64>() / distances.len() as f64,
                distances.iter().cloned().fold(f64::INFINITY, f64::min),
                distances.iter().cloned().fold(0.0, f64::max),
            )
        };

        BoardStatistics {
            name: self.name.clone(),
            kind: self.kind,
            dimension: n,
            symmetric: self.is_symmetric(),
            has_coordinates: self.has_coordinates(),
            avg_distance,
            min_distance,
            max_distance,
        }
    }
}

/// Closed tour length over a raw matrix
pub fn tour_length(matrix: &[Vec<f64>], tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }

    let open: f64 = tour.windows(2).map(|w| matrix[w[0]][w[1]]).sum();
    open + matrix[tour[tour.len() - 1]][tour[0]]
}

/// Statistics about a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardStatistics {
    pub name: String,
    pub kind: Option<BoardKind>,
    pub dimension: usize,
    pub symmetric: bool,
    pub has_coordinates: bool,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for BoardStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board: {}", self.name)?;
        if let Some(kind) = self.kind {
            writeln!(f, "  Kind: {:?}", kind)?;
        }
        writeln!(f, "  Holes: {}", self.dimension)?;
        writeln!(f, "  Symmetric: {}", self.symmetric)?;
        writeln!(f, "  Coordinates: {}", self.has_coordinates)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Min distance: {:.2}", self.min_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tour_length_closes_the_cycle() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
        ];
        let board = Board::from_points(points, Metric::Euclidean).unwrap();

        assert!((board.tour_length(&[0, 1, 2]) - 12.0).abs() < 1e-10);
        assert_eq!(board.tour_length(&[1]), 0.0);
    }

    #[test]
    fn test_from_matrix_rejects_ragged_rows() {
        let ragged = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(matches!(Board::from_matrix(ragged), Err(Error::InvalidInstance(_))));
        assert!(matches!(Board::from_matrix(Vec::new()), Err(Error::InvalidInstance(_))));
    }

    #[test]
    fn test_generate_dispatch() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for kind in [
            BoardKind::RandomAsymmetric,
            BoardKind::RandomSymmetric,
            BoardKind::Grid,
            BoardKind::Geometric,
        ] {
            let board = Board::generate(kind, 12, Metric::Euclidean, &mut rng).unwrap();
            assert_eq!(board.dimension(), 12);
            assert_eq!(board.kind, Some(kind));
            for i in 0..12 {
                assert_eq!(board.distance(i, i), 0.0);
            }
        }
    }

    #[test]
    fn test_statistics() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0)];
        let stats = Board::from_points(points, Metric::Manhattan).unwrap().statistics();

        assert_eq!(stats.dimension, 2);
        assert!(stats.symmetric);
        assert!(stats.has_coordinates);
        assert!((stats.avg_distance - 2.0).abs() < 1e-10);
        assert!(stats.to_string().contains("Holes: 2"));
    }
}
