//! ACS TSP Solver Library
//!
//! Synthetic drilling boards and an Ant Colony System solver for the
//! travelling salesman problem over them.
//!
//! # Features
//!
//! - Board generators: random weights (symmetric or not), grid holes and
//!   non-overlapping regular polygons
//! - Flat-file persistence of matrices (`.dat`) and coordinates (`.csv`)
//! - A multi-threaded Ant Colony System with a shared pheromone field
//! - An exact Held-Karp oracle for small boards
//! - Benchmarking and SVG visualization tools
//!
//! # Example
//!
//! ```no_run
//! use acs_tsp_solver::instance::{Board, BoardKind};
//! use acs_tsp_solver::heuristics::{AcsConfig, AntColonySystem};
//! use acs_tsp_solver::metric::Metric;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let board = Board::generate(BoardKind::Geometric, 30, Metric::Euclidean, &mut rng).unwrap();
//!
//! let mut colony = AntColonySystem::from_board(&board, AcsConfig::default()).unwrap();
//! let solution = colony.run();
//!
//! println!("Tour length: {:.2}", solution.cost);
//! ```

pub mod error;
pub mod metric;
pub mod instance;
pub mod generator;
pub mod persistence;
pub mod solution;
pub mod heuristics;
pub mod exact;
pub mod benchmark;
pub mod visualization;

pub use error::{Error, Result};
pub use heuristics::{AcsConfig, AntColonySystem};
pub use instance::{Board, BoardKind, Point};
pub use metric::Metric;
pub use solution::Solution;
