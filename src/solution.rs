//! Tours and their evaluation.
//!
//! A tour is a permutation of the hole indices; the closing edge back to the
//! first hole is implicit.

use crate::instance::{tour_length, Board};
use serde::{Deserialize, Serialize};

/// A tour found by one of the solvers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Visiting order of the holes
    pub tour: Vec<usize>,
    /// Closed tour length
    pub cost: f64,
    /// Whether the tour is a permutation of all holes
    pub feasible: bool,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: u64,
    /// Number of iterations (if applicable)
    pub iterations: Option<usize>,
    /// Ant tours thrown away because the ant got stuck
    pub discarded_tours: usize,
}

impl Solution {
    /// Create a new empty solution
    pub fn new() -> Self {
        Solution {
            tour: Vec::new(),
            cost: f64::INFINITY,
            feasible: false,
            algorithm: String::new(),
            computation_time: 0.0,
            elapsed_ms: 0,
            iterations: None,
            discarded_tours: 0,
        }
    }

    /// Evaluate a tour on a board
    pub fn from_tour(board: &Board, tour: Vec<usize>, algorithm: &str) -> Self {
        Self::from_matrix(&board.distance_matrix, tour, algorithm)
    }

    /// Evaluate a tour on a raw travel-time matrix
    pub fn from_matrix(matrix: &[Vec<f64>], tour: Vec<usize>, algorithm: &str) -> Self {
        let feasible = validate_tour(&tour, matrix.len());
        let cost = if feasible {
            tour_length(matrix, &tour)
        } else {
            f64::INFINITY
        };

        Solution {
            tour,
            cost,
            feasible,
            algorithm: algorithm.to_string(),
            ..Self::new()
        }
    }

    /// Check that every hole is visited exactly once
    pub fn is_complete(&self, num_holes: usize) -> bool {
        validate_tour(&self.tour, num_holes)
    }

    /// Position of a hole in the tour
    pub fn position(&self, node: usize) -> Option<usize> {
        self.tour.iter().position(|&n| n == node)
    }

    /// Hole visited after `node`, wrapping around
    pub fn successor(&self, node: usize) -> Option<usize> {
        self.position(node)
            .map(|pos| self.tour[(pos + 1) % self.tour.len()])
    }

    /// Edges of the closed tour in visiting order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.tour.len();
        (0..n).filter(move |_| n > 1).map(move |k| (self.tour[k], self.tour[(k + 1) % n]))
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `tour` is a permutation of `0..num_holes`
pub fn validate_tour(tour: &[usize], num_holes: usize) -> bool {
    if tour.len() != num_holes {
        return false;
    }
    let mut seen = vec![false; num_holes];
    for &node in tour {
        if node >= num_holes || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Cost: {:.2}", self.cost)?;
        writeln!(f, "  Feasible: {}", self.feasible)?;
        writeln!(f, "  Time: {} ms", self.elapsed_ms)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {}", iter)?;
        }
        if self.discarded_tours > 0 {
            writeln!(f, "  Discarded tours: {}", self.discarded_tours)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}
