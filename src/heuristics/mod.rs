//! Ant Colony System engine.
//!
//! - `pheromone`: the shared trail matrix
//! - `ant`: tour construction by one agent
//! - `aco`: the colony coordinating ants over iterations

pub mod aco;
pub mod ant;
pub mod pheromone;

pub use aco::*;
pub use ant::{Ant, AntContext, AntState};
pub use pheromone::PheromoneField;
