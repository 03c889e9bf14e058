//! Ant Colony System for the TSP.
//!
//! Ants build tours with the pseudo-random-proportional rule, decay the trail
//! of every edge they walk (local update), and after each iteration the best
//! tour so far is reinforced (global update).

use super::ant::{Ant, AntContext};
use super::pheromone::PheromoneField;
use crate::error::{Error, Result};
use crate::instance::{Board, Point};
use crate::metric::{distance_matrix, Metric};
use crate::solution::Solution;
use parking_lot::Mutex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Heuristic value used for zero-length edges
const ZERO_DISTANCE_HEURISTIC: f64 = 1e6;

/// ACS configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcsConfig {
    /// Number of ants
    pub num_ants: usize,
    /// Number of iterations
    pub iterations: usize,
    /// Pheromone importance (alpha)
    pub alpha: f64,
    /// Heuristic importance (beta)
    pub beta: f64,
    /// Local evaporation rate
    pub local_evaporation: f64,
    /// Global evaporation rate
    pub global_evaporation: f64,
    /// Initial pheromone level (T0)
    pub initial_pheromone: f64,
    /// Exploitation probability
    pub q0: f64,
    /// Metric used when the colony is built from coordinates
    pub metric: Metric,
    /// Run the ants of an iteration in parallel
    pub concurrent: bool,
    /// Random seed
    pub seed: u64,
    /// Also reinforce the edge closing the best tour in the global update
    pub reinforce_closing_edge: bool,
}

impl Default for AcsConfig {
    fn default() -> Self {
        AcsConfig {
            num_ants: 40,
            iterations: 800,
            alpha: 1.0,
            beta: 4.0,
            local_evaporation: 0.8,
            global_evaporation: 0.1,
            initial_pheromone: 0.1,
            q0: 0.95,
            metric: Metric::Euclidean,
            concurrent: true,
            seed: 42,
            reinforce_closing_edge: false,
        }
    }
}

impl AcsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(Error::InvalidConfig("at least one ant is required".to_string()));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("local_evaporation", self.local_evaporation),
            ("global_evaporation", self.global_evaporation),
            ("q0", self.q0),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "initial pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::persistence(path, e))?;
        let config: AcsConfig = serde_json::from_str(&text).map_err(|e| {
            Error::parse(path, e.line(), e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Best tour found so far, shared by the ants of a run
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    pub length: f64,
    pub tour: Vec<usize>,
}

impl BestSolution {
    pub fn new() -> Self {
        BestSolution {
            length: f64::INFINITY,
            tour: Vec::new(),
        }
    }

    /// Keep `tour` if it is strictly shorter. Returns whether it was kept.
    pub fn offer(&mut self, length: f64, tour: &[usize]) -> bool {
        if length < self.length {
            self.length = length;
            self.tour.clear();
            self.tour.extend_from_slice(tour);
            true
        } else {
            false
        }
    }

    pub fn is_set(&self) -> bool {
        !self.tour.is_empty()
    }
}

impl Default for BestSolution {
    fn default() -> Self {
        Self::new()
    }
}

/// eta^beta for every edge, with eta = 1 / d. The diagonal is left at 0.
pub fn heuristic_matrix(distances: &[Vec<f64>], beta: f64) -> Vec<Vec<f64>> {
    let n = distances.len();
    let mut heuristic = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                let dist = distances[i][j];
                let eta = if dist > 0.0 { 1.0 / dist } else { ZERO_DISTANCE_HEURISTIC };
                heuristic[i][j] = eta.powf(beta);
            }
        }
    }
    heuristic
}

/// Ant Colony System solver
pub struct AntColonySystem {
    config: AcsConfig,
    distances: Vec<Vec<f64>>,
    heuristic: Vec<Vec<f64>>,
    pheromone: PheromoneField,
    best: Mutex<BestSolution>,
    ants: Vec<Ant>,
    history: Vec<f64>,
    discarded_tours: usize,
    rng: ChaCha8Rng,
}

impl AntColonySystem {
    /// Build a colony over a square travel-time matrix
    pub fn new(distances: Vec<Vec<f64>>, config: AcsConfig) -> Result<Self> {
        config.validate()?;
        let n = distances.len();
        if n == 0 {
            return Err(Error::InvalidInstance("board has no holes".to_string()));
        }
        if distances.iter().any(|row| row.len() != n) {
            return Err(Error::InvalidInstance(
                "travel-time matrix is not square".to_string(),
            ));
        }

        let heuristic = heuristic_matrix(&distances, config.beta);
        let pheromone = PheromoneField::new(n, config.initial_pheromone);
        let ants = (0..config.num_ants).map(|id| Ant::new(id, n)).collect();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Ok(AntColonySystem {
            config,
            distances,
            heuristic,
            pheromone,
            best: Mutex::new(BestSolution::new()),
            ants,
            history: Vec::new(),
            discarded_tours: 0,
            rng,
        })
    }

    pub fn from_board(board: &Board, config: AcsConfig) -> Result<Self> {
        Self::new(board.distance_matrix.clone(), config)
    }

    /// Build a colony from coordinates, using the configured metric
    pub fn from_points(points: &[Point], config: AcsConfig) -> Result<Self> {
        let distances = distance_matrix(points, config.metric);
        Self::new(distances, config)
    }

    pub fn config(&self) -> &AcsConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.distances.len()
    }

    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// Best length after each completed iteration
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn best(&self) -> BestSolution {
        self.best.lock().clone()
    }

    /// Send every ant out once, then apply the global update
    fn iterate(&mut self) {
        let outcomes = self.dispatch();
        self.settle(outcomes);
    }

    /// Let every ant build a tour. Successful ants have already offered their
    /// tour to the shared best when this returns.
    fn dispatch(&mut self) -> Vec<Result<f64>> {
        let n = self.distances.len();
        let plan: Vec<(usize, u64)> = (0..self.ants.len())
            .map(|_| (self.rng.gen_range(0..n), self.rng.gen::<u64>()))
            .collect();

        let ctx = AntContext {
            distances: &self.distances,
            heuristic: &self.heuristic,
            pheromone: &self.pheromone,
            best: &self.best,
            config: &self.config,
        };
        let run_ant = |ant: &mut Ant, &(start, seed): &(usize, u64)| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            ant.execute(start, &ctx, &mut rng)
        };

        if self.config.concurrent {
            self.ants
                .par_iter_mut()
                .zip(plan.par_iter())
                .map(|(ant, job)| run_ant(ant, job))
                .collect()
        } else {
            self.ants
                .iter_mut()
                .zip(plan.iter())
                .map(|(ant, job)| run_ant(ant, job))
                .collect()
        }
    }

    /// Count failed ants, reinforce the best tour and get the ants ready for
    /// the next iteration
    fn settle(&mut self, outcomes: Vec<Result<f64>>) {
        for err in outcomes.into_iter().filter_map(|r| r.err()) {
            log::warn!("discarding tour: {}", err);
            self.discarded_tours += 1;
        }

        let best = self.best.get_mut();
        self.pheromone.global_update(
            &best.tour,
            best.length,
            self.config.global_evaporation,
            self.config.reinforce_closing_edge,
        );
        self.history.push(best.length);

        for ant in &mut self.ants {
            ant.reset();
        }
    }

    /// Run the configured number of iterations
    pub fn run(&mut self) -> Solution {
        log::info!(
            "ACS: {} holes, {} ants, {} iterations, alpha={} beta={} rho_local={} rho_global={} t0={} q0={} concurrent={}",
            self.dimension(),
            self.config.num_ants,
            self.config.iterations,
            self.config.alpha,
            self.config.beta,
            self.config.local_evaporation,
            self.config.global_evaporation,
            self.config.initial_pheromone,
            self.config.q0,
            self.config.concurrent
        );

        let start = Instant::now();
        for _ in 0..self.config.iterations {
            self.iterate();
        }
        let elapsed = start.elapsed();

        log::trace!("pheromone trails:\n{}", self.pheromone);

        let best = self.best();
        let mut solution = if best.is_set() {
            Solution::from_matrix(&self.distances, best.tour, "ACS")
        } else {
            Solution {
                algorithm: "ACS".to_string(),
                ..Solution::new()
            }
        };
        solution.computation_time = elapsed.as_secs_f64();
        solution.elapsed_ms = elapsed.as_millis() as u64;
        solution.iterations = Some(self.history.len());
        solution.discarded_tours = self.discarded_tours;

        log::info!(
            "ACS: best length {:.4} after {} iterations in {} ms",
            solution.cost,
            self.history.len(),
            solution.elapsed_ms
        );

        solution
    }

    /// Start a fresh trial with the same configuration. The random stream keeps
    /// going, so consecutive trials are independent.
    pub fn reset(&mut self) {
        self.pheromone.reset(self.config.initial_pheromone);
        *self.best.get_mut() = BestSolution::new();
        for ant in &mut self.ants {
            ant.reset();
        }
        self.history.clear();
        self.discarded_tours = 0;
    }
}
