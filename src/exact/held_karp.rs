//! Held-Karp dynamic program over subsets of holes.
//!
//! Runs in O(2^n n^2) time and O(2^n n) memory, so it is capped to small boards.
//! Works on asymmetric matrices as well.

use super::{ExactOracle, ExactResult};
use crate::error::{Error, Result};
use std::time::Instant;

const NO_PARENT: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct HeldKarpOracle {
    /// Largest board accepted
    pub max_holes: usize,
}

impl HeldKarpOracle {
    pub const DEFAULT_MAX_HOLES: usize = 16;
    /// Hard ceiling on `max_holes`; the tables grow as 2^n * n
    pub const MAX_SUPPORTED_HOLES: usize = 20;

    /// `max_holes` is clamped to `MAX_SUPPORTED_HOLES`
    pub fn new(max_holes: usize) -> Self {
        HeldKarpOracle {
            max_holes: max_holes.min(Self::MAX_SUPPORTED_HOLES),
        }
    }

    /// Largest board this oracle will solve
    pub fn limit(&self) -> usize {
        self.max_holes.min(Self::MAX_SUPPORTED_HOLES)
    }

    fn optimal_tour(distances: &[Vec<f64>]) -> (f64, Vec<usize>) {
        let n = distances.len();
        if n == 1 {
            return (0.0, vec![0]);
        }

        // Hole 0 is the fixed start; the subset covers holes 1..n, bit k <-> hole k + 1
        let m = n - 1;
        let size = 1usize << m;
        let mut cost = vec![f64::INFINITY; size * m];
        let mut parent = vec![NO_PARENT; size * m];

        for k in 0..m {
            cost[(1 << k) * m + k] = distances[0][k + 1];
        }

        for mask in 1..size {
            for last in 0..m {
                if mask & (1 << last) == 0 {
                    continue;
                }
                let current = cost[mask * m + last];
                if !current.is_finite() {
                    continue;
                }
                for next in 0..m {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let extended = mask | (1 << next);
                    let candidate = current + distances[last + 1][next + 1];
                    if candidate < cost[extended * m + next] {
                        cost[extended * m + next] = candidate;
                        parent[extended * m + next] = last;
                    }
                }
            }
        }

        let full = size - 1;
        let mut best_length = f64::INFINITY;
        let mut best_last = 0;
        for last in 0..m {
            let length = cost[full * m + last] + distances[last + 1][0];
            if length < best_length {
                best_length = length;
                best_last = last;
            }
        }

        let mut tour = Vec::with_capacity(n);
        let mut mask = full;
        let mut last = best_last;
        while last != NO_PARENT {
            tour.push(last + 1);
            let previous = parent[mask * m + last];
            mask &= !(1 << last);
            last = previous;
        }
        tour.push(0);
        tour.reverse();

        (best_length, tour)
    }
}

impl Default for HeldKarpOracle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_HOLES)
    }
}

impl ExactOracle for HeldKarpOracle {
    fn solve(&self, distances: &[Vec<f64>]) -> Result<ExactResult> {
        let n = distances.len();
        if n == 0 {
            return Err(Error::InvalidInstance("board has no holes".to_string()));
        }
        if n > self.limit() {
            return Err(Error::OracleUnavailable(format!(
                "{} holes exceed the limit of {} for {}",
                n,
                self.limit(),
                self.name()
            )));
        }

        let start = Instant::now();
        let (optimal_length, tour) = Self::optimal_tour(distances);
        let solve_time_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "{}: optimal length {:.4} on {} holes in {} ms",
            self.name(),
            optimal_length,
            n,
            solve_time_ms
        );

        Ok(ExactResult {
            optimal_length,
            solve_time_ms,
            tour: Some(tour),
        })
    }

    fn name(&self) -> &str {
        "held-karp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{tour_length, Point};
    use crate::metric::{distance_matrix, Metric};
    use crate::solution::validate_tour;

    fn brute_force(distances: &[Vec<f64>]) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, d: &[Vec<f64>], best: &mut f64) {
            if k == rest.len() {
                let mut tour = vec![0];
                tour.extend_from_slice(rest);
                *best = best.min(tour_length(d, &tour));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, d, best);
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..distances.len()).collect();
        let mut best = f64::INFINITY;
        permute(&mut rest, 0, distances, &mut best);
        best
    }

    #[test]
    fn test_square() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        let d = distance_matrix(&points, Metric::Euclidean);
        let result = HeldKarpOracle::default().solve(&d).unwrap();

        assert!((result.optimal_length - 40.0).abs() < 1e-9);
        let tour = result.tour.unwrap();
        assert!(validate_tour(&tour, 4));
        assert!((tour_length(&d, &tour) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_brute_force_on_asymmetric_matrix() {
        let d = vec![
            vec![0.0, 3.0, 9.0, 4.0, 7.0],
            vec![5.0, 0.0, 2.0, 8.0, 6.0],
            vec![1.0, 7.0, 0.0, 3.0, 9.0],
            vec![6.0, 2.0, 8.0, 0.0, 1.0],
            vec![2.0, 9.0, 4.0, 5.0, 0.0],
        ];
        let result = HeldKarpOracle::default().solve(&d).unwrap();

        assert!((result.optimal_length - brute_force(&d)).abs() < 1e-9);
        let tour = result.tour.unwrap();
        assert!((tour_length(&d, &tour) - result.optimal_length).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_boards() {
        let oracle = HeldKarpOracle::default();
        assert_eq!(oracle.solve(&[vec![0.0]]).unwrap().optimal_length, 0.0);

        let two = oracle.solve(&[vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();
        assert_eq!(two.optimal_length, 5.0);
        assert_eq!(two.tour, Some(vec![0, 1]));
    }

    #[test]
    fn test_size_limit() {
        let d = vec![vec![1.0; 5]; 5];
        assert!(matches!(
            HeldKarpOracle::new(4).solve(&d),
            Err(Error::OracleUnavailable(_))
        ));
        assert!(matches!(
            HeldKarpOracle::default().solve(&[]),
            Err(Error::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(HeldKarpOracle::new(100).max_holes, HeldKarpOracle::MAX_SUPPORTED_HOLES);

        // The field is public, so the ceiling also holds when it is set directly
        let oracle = HeldKarpOracle { max_holes: 100 };
        assert_eq!(oracle.limit(), HeldKarpOracle::MAX_SUPPORTED_HOLES);
        let d = vec![vec![1.0; 70]; 70];
        assert!(matches!(oracle.solve(&d), Err(Error::OracleUnavailable(_))));
    }
}
