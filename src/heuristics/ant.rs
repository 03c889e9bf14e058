//! Tour construction by a single ant.

use super::aco::{AcsConfig, BestSolution};
use super::pheromone::PheromoneField;
use crate::error::{Error, Result};
use crate::instance::tour_length;
use crate::solution::validate_tour;
use parking_lot::Mutex;
use rand::Rng;

/// Read-only view of the colony handed to each ant.
///
/// The pheromone field and the best solution are shared by all ants of an
/// iteration; both can be updated through this view.
#[derive(Clone, Copy)]
pub struct AntContext<'a> {
    pub distances: &'a [Vec<f64>],
    /// eta^beta for every edge, eta = 1 / d
    pub heuristic: &'a [Vec<f64>],
    pub pheromone: &'a PheromoneField,
    pub best: &'a Mutex<BestSolution>,
    pub config: &'a AcsConfig,
}

impl AntContext<'_> {
    /// tau^alpha * eta^beta
    #[inline]
    fn weight(&self, i: usize, j: usize) -> f64 {
        self.pheromone.get(i, j).powf(self.config.alpha) * self.heuristic[i][j]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntState {
    Idle,
    Constructing,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct Ant {
    pub id: usize,
    state: AntState,
    visited: Vec<bool>,
    tour: Vec<usize>,
    length: f64,
    /// Step at which the ant reports a deadlock, for exercising recovery
    #[cfg(test)]
    pub(crate) fail_at_step: Option<usize>,
}

impl Ant {
    pub fn new(id: usize, num_holes: usize) -> Self {
        Ant {
            id,
            state: AntState::Idle,
            visited: vec![false; num_holes],
            tour: Vec::with_capacity(num_holes),
            length: f64::INFINITY,
            #[cfg(test)]
            fail_at_step: None,
        }
    }

    pub fn state(&self) -> AntState {
        self.state
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Back to `Idle` with an empty tour
    pub fn reset(&mut self) {
        self.state = AntState::Idle;
        self.visited.iter_mut().for_each(|v| *v = false);
        self.tour.clear();
        self.length = f64::INFINITY;
    }

    /// Build a full tour from `start`, updating trails after every move and
    /// offering the result to the shared best solution. Returns the tour length.
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        start: usize,
        ctx: &AntContext<'_>,
        rng: &mut R,
    ) -> Result<f64> {
        let n = self.visited.len();
        self.reset();
        self.state = AntState::Constructing;
        self.visited[start] = true;
        self.tour.push(start);

        let rho = ctx.config.local_evaporation;
        let t0 = ctx.config.initial_pheromone;

        for step in 1..n {
            let current = self.tour[step - 1];
            let r: f64 = rng.gen();
            let next = if r <= ctx.config.q0 {
                self.exploit(current, ctx)
            } else {
                self.explore(current, ctx, rng)
            };

            #[cfg(test)]
            let next = if self.fail_at_step == Some(step) { None } else { next };

            let next = match next {
                Some(j) => j,
                None => {
                    self.state = AntState::Failed;
                    return Err(Error::DeadlockedAgent { ant: self.id, step });
                }
            };

            self.visited[next] = true;
            self.tour.push(next);
            ctx.pheromone.local_update(current, next, rho, t0);
        }

        if !validate_tour(&self.tour, n) {
            self.state = AntState::Failed;
            return Err(Error::InvalidRoute { ant: self.id });
        }

        self.length = tour_length(ctx.distances, &self.tour);
        self.state = AntState::Done;

        if ctx.best.lock().offer(self.length, &self.tour) {
            log::trace!("ant {} improved the best tour: {:.4}", self.id, self.length);
        }

        Ok(self.length)
    }

    /// Unvisited hole with the largest weight. The first one wins ties, and
    /// also wins when every weight is zero.
    pub fn exploit(&self, current: usize, ctx: &AntContext<'_>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for j in self.unvisited(current) {
            let w = ctx.weight(current, j);
            match best {
                Some((_, best_w)) if w <= best_w => {}
                _ => best = Some((j, w)),
            }
        }
        best.map(|(j, _)| j)
    }

    /// Roulette-wheel draw over the unvisited holes in index order, weighted
    /// by tau^alpha * eta^beta. Falls back to a uniform draw when the weights
    /// cannot be normalized.
    pub fn explore<R: Rng + ?Sized>(
        &self,
        current: usize,
        ctx: &AntContext<'_>,
        rng: &mut R,
    ) -> Option<usize> {
        let candidates: Vec<(usize, f64)> = self
            .unvisited(current)
            .map(|j| (j, ctx.weight(current, j)))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let total: f64 = candidates.iter().map(|&(_, w)| w).sum();
        if !total.is_finite() || total <= 0.0 {
            let k = rng.gen_range(0..candidates.len());
            return Some(candidates[k].0);
        }

        let pick = rng.gen::<f64>() * total;
        let mut cumulative = 0.0;
        for &(j, w) in &candidates {
            cumulative += w;
            if cumulative >= pick {
                return Some(j);
            }
        }

        candidates.last().map(|&(j, _)| j)
    }

    fn unvisited(&self, current: usize) -> impl Iterator<Item = usize> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter(move |&(j, &v)| !v && j != current)
            .map(|(j, _)| j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::aco::heuristic_matrix;
    use crate::instance::Point;
    use crate::metric::{distance_matrix, Metric};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        distances: Vec<Vec<f64>>,
        heuristic: Vec<Vec<f64>>,
        pheromone: PheromoneField,
        best: Mutex<BestSolution>,
        config: AcsConfig,
    }

    impl Fixture {
        fn new(config: AcsConfig) -> Self {
            // Holes on a line at x = 0, 1, 3, 6
            let points: Vec<Point> = [0.0, 1.0, 3.0, 6.0]
                .iter()
                .map(|&x| Point::new(x, 0.0))
                .collect();
            let distances = distance_matrix(&points, Metric::Euclidean);
            let heuristic = heuristic_matrix(&distances, config.beta);
            Fixture {
                pheromone: PheromoneField::new(4, config.initial_pheromone),
                distances,
                heuristic,
                best: Mutex::new(BestSolution::new()),
                config,
            }
        }

        fn ctx(&self) -> AntContext<'_> {
            AntContext {
                distances: &self.distances,
                heuristic: &self.heuristic,
                pheromone: &self.pheromone,
                best: &self.best,
                config: &self.config,
            }
        }
    }

    #[test]
    fn test_greedy_ant_follows_nearest_neighbour() {
        let fixture = Fixture::new(AcsConfig {
            q0: 1.0,
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ant = Ant::new(0, 4);

        let length = ant.execute(0, &fixture.ctx(), &mut rng).unwrap();

        assert_eq!(ant.tour(), &[0, 1, 2, 3]);
        assert_eq!(ant.state(), AntState::Done);
        assert!((length - 12.0).abs() < 1e-10);

        let best = fixture.best.lock();
        assert_eq!(best.tour, vec![0, 1, 2, 3]);
        assert!((best.length - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_explored_tours_are_permutations() {
        let fixture = Fixture::new(AcsConfig {
            q0: 0.0,
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut ant = Ant::new(3, 4);

        for start in 0..4 {
            ant.execute(start, &fixture.ctx(), &mut rng).unwrap();
            assert_eq!(ant.tour()[0], start);
            assert!(validate_tour(ant.tour(), 4));
        }
    }

    #[test]
    fn test_local_update_applied_on_moves() {
        let mut fixture = Fixture::new(AcsConfig {
            q0: 1.0,
            local_evaporation: 0.5,
            initial_pheromone: 0.2,
            ..Default::default()
        });
        fixture.pheromone = PheromoneField::new(4, 1.0);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ant = Ant::new(0, 4);
        ant.execute(3, &fixture.ctx(), &mut rng).unwrap();

        // 0.5 * 1.0 + 0.5 * 0.2 on every edge walked, in both directions
        assert_eq!(ant.tour(), &[3, 2, 1, 0]);
        for (i, j) in [(3, 2), (2, 1), (1, 0)] {
            assert!((fixture.pheromone.get(i, j) - 0.6).abs() < 1e-12);
            assert!((fixture.pheromone.get(j, i) - 0.6).abs() < 1e-12);
        }
        // The closing edge is not walked step by step
        assert_eq!(fixture.pheromone.get(0, 3), 1.0);
    }

    #[test]
    fn test_no_candidate_left() {
        let fixture = Fixture::new(AcsConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ant = Ant::new(0, 4);
        ant.execute(0, &fixture.ctx(), &mut rng).unwrap();

        assert_eq!(ant.exploit(0, &fixture.ctx()), None);
        assert_eq!(ant.explore(0, &fixture.ctx(), &mut rng), None);

        ant.reset();
        assert_eq!(ant.state(), AntState::Idle);
        assert!(ant.tour().is_empty());
        assert_eq!(ant.exploit(0, &fixture.ctx()), Some(1));
    }

    #[test]
    fn test_deadlocked_ant_leaves_best_untouched() {
        let fixture = Fixture::new(AcsConfig {
            q0: 1.0,
            ..Default::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ant = Ant::new(5, 4);
        ant.fail_at_step = Some(2);

        let result = ant.execute(0, &fixture.ctx(), &mut rng);

        assert!(matches!(result, Err(Error::DeadlockedAgent { ant: 5, step: 2 })));
        assert_eq!(ant.state(), AntState::Failed);
        assert_eq!(ant.tour(), &[0, 1]);
        assert!(!fixture.best.lock().is_set());
    }

    #[test]
    fn test_exploit_with_zero_weights_takes_first_unvisited() {
        let fixture = Fixture::new(AcsConfig::default());
        let heuristic = vec![vec![0.0; 4]; 4];
        let ctx = AntContext {
            heuristic: &heuristic,
            ..fixture.ctx()
        };
        let ant = Ant::new(0, 4);
        assert_eq!(ant.exploit(2, &ctx), Some(0));
    }
}
