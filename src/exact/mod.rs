//! Exact solvers used as reference oracles.
//!
//! An oracle takes a travel-time matrix and returns the length of an optimal
//! closed tour together with the time it needed. Results of the colony are
//! compared against it to report a quality gap.

mod held_karp;

pub use held_karp::HeldKarpOracle;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Output of an exact solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactResult {
    /// Length of an optimal closed tour
    pub optimal_length: f64,
    /// Solve time in milliseconds
    pub solve_time_ms: u64,
    /// An optimal tour, when the solver reports one
    pub tour: Option<Vec<usize>>,
}

pub trait ExactOracle {
    fn solve(&self, distances: &[Vec<f64>]) -> Result<ExactResult>;
    fn name(&self) -> &str;
}
