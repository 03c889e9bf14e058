//! Shared pheromone trails.
//!
//! Trails are stored as `f64` bit patterns in `AtomicU64` cells so that ants
//! running in parallel can apply local updates through a shared reference.
//! Each local update is a compare-and-swap loop on one cell: concurrent
//! updates of the same edge are serialized and none is lost. The global
//! update needs `&mut self` and therefore only runs once all ants are done.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct PheromoneField {
    n: usize,
    trails: Vec<AtomicU64>,
}

impl PheromoneField {
    /// Every off-diagonal trail starts at `initial`; the diagonal stays at 0.
    pub fn new(n: usize, initial: f64) -> Self {
        let trails = (0..n * n)
            .map(|k| {
                let value = if k / n == k % n { 0.0 } else { initial };
                AtomicU64::new(value.to_bits())
            })
            .collect();
        PheromoneField { n, trails }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        f64::from_bits(self.trails[i * self.n + j].load(Ordering::Relaxed))
    }

    fn update<F: Fn(f64) -> f64>(&self, i: usize, j: usize, f: F) {
        let cell = &self.trails[i * self.n + j];
        // The closure never returns None, so the update always succeeds
        let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
            Some(f(f64::from_bits(bits)).to_bits())
        });
    }

    /// Pull the trail of edge (i, j), in both directions, towards `initial`:
    /// `tau = (1 - rho) * tau + rho * initial`.
    pub fn local_update(&self, i: usize, j: usize, rho: f64, initial: f64) {
        let decay = |tau: f64| (1.0 - rho) * tau + rho * initial;
        self.update(i, j, decay);
        self.update(j, i, decay);
    }

    /// Evaporate every trail and reinforce the best tour.
    ///
    /// Every ordered pair (i, j), i != j, decays once by `(1 - rho)`. Each
    /// consecutive pair of `best_tour` then receives `rho / best_length` in
    /// both directions. The closing edge (last -> first) is reinforced only
    /// when `reinforce_closing_edge` is set.
    pub fn global_update(
        &mut self,
        best_tour: &[usize],
        best_length: f64,
        rho: f64,
        reinforce_closing_edge: bool,
    ) {
        let n = self.n;
        for (k, cell) in self.trails.iter_mut().enumerate() {
            if k / n != k % n {
                let tau = f64::from_bits(*cell.get_mut());
                *cell.get_mut() = ((1.0 - rho) * tau).to_bits();
            }
        }

        if best_tour.len() < 2 || !best_length.is_finite() || best_length <= 0.0 {
            return;
        }

        let deposit = rho / best_length;
        for w in best_tour.windows(2) {
            self.deposit(w[0], w[1], deposit);
        }
        if reinforce_closing_edge {
            self.deposit(best_tour[best_tour.len() - 1], best_tour[0], deposit);
        }
    }

    fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        let n = self.n;
        for k in [i * n + j, j * n + i] {
            let cell = self.trails[k].get_mut();
            *cell = (f64::from_bits(*cell) + amount).to_bits();
        }
    }

    /// Set every off-diagonal trail back to `initial`
    pub fn reset(&mut self, initial: f64) {
        let n = self.n;
        for (k, cell) in self.trails.iter_mut().enumerate() {
            let value = if k / n == k % n { 0.0 } else { initial };
            *cell.get_mut() = value.to_bits();
        }
    }

    /// Copy of the trails as a matrix
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

impl fmt::Display for PheromoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   |")?;
        for j in 0..self.n {
            write!(f, "{:>8}", j)?;
        }
        writeln!(f)?;
        for i in 0..self.n {
            write!(f, "{:>3}|", i)?;
            for j in 0..self.n {
                if i == j {
                    write!(f, "{:>8}", "~")?;
                } else {
                    write!(f, "{:>8.3}", self.get(i, j))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_initial_trails() {
        let field = PheromoneField::new(3, 0.1);
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(0, 2), 0.1);
        assert_eq!(field.get(2, 1), 0.1);
    }

    #[test]
    fn test_local_update_both_directions() {
        let field = PheromoneField::new(3, 0.1);
        field.local_update(0, 1, 0.5, 0.1);
        assert!((field.get(0, 1) - 0.1).abs() < 1e-12);

        let field = PheromoneField::new(3, 1.0);
        field.local_update(0, 1, 0.5, 0.2);
        assert!((field.get(0, 1) - 0.6).abs() < 1e-12);
        assert!((field.get(1, 0) - 0.6).abs() < 1e-12);
        assert_eq!(field.get(0, 2), 1.0);
    }

    #[test]
    fn test_global_update_skips_closing_edge() {
        let mut field = PheromoneField::new(4, 1.0);
        field.global_update(&[0, 1, 2, 3], 10.0, 0.1, false);

        // 0.9 * 1.0 + 0.1 / 10
        assert!((field.get(0, 1) - 0.91).abs() < 1e-12);
        assert!((field.get(1, 0) - 0.91).abs() < 1e-12);
        assert!((field.get(2, 3) - 0.91).abs() < 1e-12);
        // Closing edge and non-tour edges only decay
        assert!((field.get(3, 0) - 0.9).abs() < 1e-12);
        assert!((field.get(0, 2) - 0.9).abs() < 1e-12);
        assert_eq!(field.get(1, 1), 0.0);
    }

    #[test]
    fn test_global_update_closing_edge_option() {
        let mut field = PheromoneField::new(4, 1.0);
        field.global_update(&[0, 1, 2, 3], 10.0, 0.1, true);

        assert!((field.get(3, 0) - 0.91).abs() < 1e-12);
        assert!((field.get(0, 3) - 0.91).abs() < 1e-12);
    }

    #[test]
    fn test_concurrent_local_updates() {
        let field = Arc::new(PheromoneField::new(2, 1.0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let field = Arc::clone(&field);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        field.local_update(0, 1, 1e-4, 0.0);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // Same number of updates applied one after the other
        let sequential = PheromoneField::new(2, 1.0);
        for _ in 0..4000 {
            sequential.local_update(0, 1, 1e-4, 0.0);
        }
        assert_eq!(field.get(0, 1), sequential.get(0, 1));
        assert_eq!(field.get(1, 0), sequential.get(1, 0));
        assert!(field.get(0, 1) < 1.0);
    }

    #[test]
    fn test_reset_and_display() {
        let mut field = PheromoneField::new(3, 0.5);
        field.global_update(&[0, 1, 2], 3.0, 0.5, false);
        field.reset(0.5);
        assert!(field.snapshot().iter().flatten().all(|&v| v == 0.5 || v == 0.0));

        let text = field.to_string();
        assert!(text.contains("~"));
        assert!(text.contains("0.500"));
    }
}
