//! Experiment runner.
//!
//! Generates boards of increasing size, solves each one several times with
//! the colony and optionally once with an exact oracle, then aggregates
//! timings and the quality gap per board size.

use crate::error::{Error, Result};
use crate::exact::{ExactOracle, HeldKarpOracle};
use crate::heuristics::aco::{AcsConfig, AntColonySystem};
use crate::instance::{Board, BoardKind};
use crate::metric::Metric;
use crate::solution::Solution;

use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Values below this threshold are reported as 0
const ZERO_THRESHOLD: f64 = 1e-5;

/// Relative gap between an approximate and a reference value, in percent,
/// measured against their mean.
pub fn percent_difference(approx: f64, best: f64) -> f64 {
    (approx - best) / ((approx + best) / 2.0) * 100.0
}

/// Flush tiny (and negative) values to 0
pub fn is_zero(value: f64) -> f64 {
    if value < ZERO_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Largest board size
    pub max_holes: usize,
    /// Number of board sizes, evenly spaced up to `max_holes`
    pub num_intervals: usize,
    /// Boards generated per size
    pub problems_per_size: usize,
    /// Colony runs per board
    pub num_tests: usize,
    pub kind: BoardKind,
    pub metric: Metric,
    /// Solve each board with the exact oracle too
    pub run_exact: bool,
    /// Seed for board generation
    pub seed: u64,
    /// Show a progress bar
    pub show_progress: bool,
    pub acs: AcsConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            max_holes: 12,
            num_intervals: 3,
            problems_per_size: 3,
            num_tests: 5,
            kind: BoardKind::RandomSymmetric,
            metric: Metric::Euclidean,
            run_exact: true,
            seed: 42,
            show_progress: true,
            acs: AcsConfig::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Board sizes `(i + 1) * max_holes / num_intervals` for `i < num_intervals`
    pub fn sizes(&self) -> Result<Vec<usize>> {
        if self.num_intervals == 0 || self.num_intervals >= self.max_holes {
            return Err(Error::InvalidConfig(format!(
                "number of intervals ({}) must be positive and smaller than the maximum number of holes ({})",
                self.num_intervals, self.max_holes
            )));
        }
        Ok((0..self.num_intervals)
            .map(|i| (i + 1) * self.max_holes / self.num_intervals)
            .collect())
    }
}

/// One colony run on one board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    pub num_holes: usize,
    pub problem: usize,
    pub trial: usize,
    pub acs_length: f64,
    pub acs_time_ms: u64,
    pub discarded_tours: usize,
    pub exact_length: Option<f64>,
    pub exact_time_ms: Option<u64>,
}

/// Colony and oracle figures for one board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemStatistics {
    pub num_holes: usize,
    pub problem: usize,
    pub mean_time_ms: f64,
    pub stdev_time_ms: f64,
    pub max_time_ms: f64,
    pub min_time_ms: f64,
    pub mean_length: f64,
    pub stdev_length: f64,
    pub max_length: f64,
    pub min_length: f64,
    pub exact_length: Option<f64>,
    pub exact_time_ms: Option<f64>,
}

/// Aggregate over all boards of one size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeStatistics {
    pub num_holes: usize,
    pub mean_error: Option<f64>,
    pub stdev_error: Option<f64>,
    pub max_error: Option<f64>,
    pub min_error: Option<f64>,
    pub mean_stdev_length: f64,
    pub mean_time_exact_ms: Option<f64>,
    pub stdev_time_exact_ms: Option<f64>,
    pub max_time_exact_ms: Option<f64>,
    pub min_time_exact_ms: Option<f64>,
    pub mean_time_acs_ms: f64,
    pub stdev_time_acs_ms: f64,
    pub max_time_acs_ms: f64,
    pub min_time_acs_ms: f64,
}

/// (mean, population stdev, max, min), or zeros for an empty slice
fn summarize(values: &[f64]) -> (f64, f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let mean = values.iter().mean();
    let stdev = values.iter().population_std_dev();
    let max = values
        .iter()
        .copied()
        .map(OrderedFloat)
        .fold(OrderedFloat(f64::NEG_INFINITY), std::cmp::max)
        .0;
    let min = values
        .iter()
        .copied()
        .map(OrderedFloat)
        .fold(OrderedFloat(f64::INFINITY), std::cmp::min)
        .0;
    (mean, stdev, max, min)
}

/// Mean, population standard deviation, max and min of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub stdev: f64,
    pub max: f64,
    pub min: f64,
}

impl Summary {
    /// All zeros for an empty sample
    pub fn of(values: &[f64]) -> Self {
        let (mean, stdev, max, min) = summarize(values);
        Summary { mean, stdev, max, min }
    }
}

/// Repeated solves of a single board
#[derive(Debug, Clone)]
pub struct TrialPool {
    pub trials: usize,
    pub acs_time_ms: Summary,
    pub acs_length: Summary,
    pub exact_time_ms: Option<Summary>,
    pub exact_length: Option<f64>,
    /// Gap of the mean colony length to the optimum, in percent
    pub gap: Option<f64>,
    /// Shortest tour over all trials
    pub best: Solution,
}

/// Solve `board` `trials` times with the colony (reset between trials) and,
/// when an oracle is given, as many times with the oracle. An oracle that
/// cannot handle the board is skipped with a warning.
pub fn solve_trials(
    board: &Board,
    config: AcsConfig,
    trials: usize,
    oracle: Option<&dyn ExactOracle>,
) -> Result<TrialPool> {
    if trials == 0 {
        return Err(Error::InvalidConfig("at least one trial is required".to_string()));
    }

    let mut acs = AntColonySystem::from_board(board, config)?;
    let mut oracle = oracle;
    let mut times = Vec::with_capacity(trials);
    let mut lengths = Vec::with_capacity(trials);
    let mut exact_times = Vec::new();
    let mut exact_length = None;
    let mut best: Option<Solution> = None;

    for trial in 0..trials {
        if trial > 0 {
            acs.reset();
        }
        let solution = acs.run();
        times.push(solution.elapsed_ms as f64);
        lengths.push(solution.cost);
        if best.as_ref().map_or(true, |b| solution.cost < b.cost) {
            best = Some(solution);
        }

        if let Some(solver) = oracle {
            match solver.solve(&board.distance_matrix) {
                Ok(result) => {
                    exact_times.push(result.solve_time_ms as f64);
                    exact_length = Some(result.optimal_length);
                }
                Err(e) => {
                    log::warn!("{} skipped on {} holes: {}", solver.name(), board.dimension(), e);
                    oracle = None;
                }
            }
        }
    }

    let acs_length = Summary::of(&lengths);
    Ok(TrialPool {
        trials,
        acs_time_ms: Summary::of(&times),
        acs_length,
        exact_time_ms: (!exact_times.is_empty()).then(|| Summary::of(&exact_times)),
        exact_length,
        gap: exact_length.map(|exact| is_zero(percent_difference(acs_length.mean, exact))),
        best: best.unwrap_or_default(),
    })
}

impl std::fmt::Display for TrialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seconds = |s: &Summary| {
            format!(
                "mean {:.4}s, stdev {:.4}s, max {:.4}s, min {:.4}s",
                s.mean / 1000.0,
                s.stdev / 1000.0,
                s.max / 1000.0,
                s.min / 1000.0
            )
        };

        writeln!(f, "Trials: {}", self.trials)?;
        writeln!(f, "ACS time     : {}", seconds(&self.acs_time_ms))?;
        writeln!(
            f,
            "ACS objective: mean {:.4}, stdev {:.4}, max {:.4}, min {:.4}",
            self.acs_length.mean,
            is_zero(self.acs_length.stdev),
            self.acs_length.max,
            self.acs_length.min
        )?;
        if let Some(exact) = &self.exact_time_ms {
            writeln!(f, "Exact time   : {}", seconds(exact))?;
        }
        if let (Some(length), Some(gap)) = (self.exact_length, self.gap) {
            writeln!(f, "Exact objective: {:.4}", length)?;
            writeln!(f, "Gap of the mean objective: {:.4}%", gap)?;
        }
        Ok(())
    }
}

fn summarize_optional(values: &[f64]) -> (Option<f64>, Option<f64>, Option<f64>, Option<f64>) {
    if values.is_empty() {
        return (None, None, None, None);
    }
    let (mean, stdev, max, min) = summarize(values);
    (Some(mean), Some(stdev), Some(max), Some(min))
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    oracle: Box<dyn ExactOracle + Send + Sync>,
    results: Vec<TrialResult>,
    problems: Vec<ProblemStatistics>,
    statistics: Vec<SizeStatistics>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_oracle(config, Box::new(HeldKarpOracle::default()))
    }

    pub fn with_oracle(config: BenchmarkConfig, oracle: Box<dyn ExactOracle + Send + Sync>) -> Self {
        Benchmark {
            config,
            oracle,
            results: Vec::new(),
            problems: Vec::new(),
            statistics: Vec::new(),
        }
    }

    /// Generate all boards and solve them
    pub fn run(&mut self) -> Result<&[SizeStatistics]> {
        self.config.acs.validate()?;
        let sizes = self.config.sizes()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        log::info!(
            "benchmark: sizes {:?}, {} boards per size, {} tests per board, {:?} boards",
            sizes,
            self.config.problems_per_size,
            self.config.num_tests,
            self.config.kind
        );

        let total = (sizes.len() * self.config.problems_per_size) as u64;
        let progress = if self.config.show_progress {
            let bar = ProgressBar::new(total);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40} {pos}/{len} boards [{elapsed_precise}] {msg}")
            {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        self.results.clear();
        self.problems.clear();
        self.statistics.clear();

        for &num_holes in &sizes {
            progress.set_message(format!("{} holes", num_holes));
            let mut size_problems = Vec::with_capacity(self.config.problems_per_size);

            for problem in 0..self.config.problems_per_size {
                let board = Board::generate(self.config.kind, num_holes, self.config.metric, &mut rng)?;
                size_problems.push(self.solve_board(&board, problem)?);
                progress.inc(1);
            }

            self.statistics.push(Self::aggregate(num_holes, &size_problems));
            self.problems.extend(size_problems);
        }

        progress.finish_and_clear();
        Ok(self.statistics.as_slice())
    }

    /// Run the colony `num_tests` times (and the oracle once) on one board
    pub fn solve_board(&mut self, board: &Board, problem: usize) -> Result<ProblemStatistics> {
        let num_holes = board.dimension();

        let exact = if self.config.run_exact {
            match self.oracle.solve(&board.distance_matrix) {
                Ok(result) => Some(result),
                Err(e) => {
                    log::warn!("{} skipped on {} holes: {}", self.oracle.name(), num_holes, e);
                    None
                }
            }
        } else {
            None
        };

        let acs_config = AcsConfig {
            seed: self.config.acs.seed.wrapping_add(problem as u64),
            ..self.config.acs.clone()
        };
        let mut acs = AntColonySystem::from_board(board, acs_config)?;

        let mut times = Vec::with_capacity(self.config.num_tests);
        let mut lengths = Vec::with_capacity(self.config.num_tests);
        for trial in 0..self.config.num_tests {
            if trial > 0 {
                acs.reset();
            }
            let solution = acs.run();
            times.push(solution.elapsed_ms as f64);
            lengths.push(solution.cost);

            self.results.push(TrialResult {
                num_holes,
                problem,
                trial,
                acs_length: solution.cost,
                acs_time_ms: solution.elapsed_ms,
                discarded_tours: solution.discarded_tours,
                exact_length: exact.as_ref().map(|e| e.optimal_length),
                exact_time_ms: exact.as_ref().map(|e| e.solve_time_ms),
            });
        }

        let (mean_time_ms, stdev_time_ms, max_time_ms, min_time_ms) = summarize(&times);
        let (mean_length, stdev_length, max_length, min_length) = summarize(&lengths);

        Ok(ProblemStatistics {
            num_holes,
            problem,
            mean_time_ms,
            stdev_time_ms,
            max_time_ms,
            min_time_ms,
            mean_length,
            stdev_length,
            max_length,
            min_length,
            exact_length: exact.as_ref().map(|e| e.optimal_length),
            exact_time_ms: exact.as_ref().map(|e| e.solve_time_ms as f64),
        })
    }

    /// Combine the boards of one size
    pub fn aggregate(num_holes: usize, problems: &[ProblemStatistics]) -> SizeStatistics {
        let acs_times: Vec<f64> = problems.iter().map(|p| p.mean_time_ms).collect();
        let (mean_time_acs_ms, stdev_time_acs_ms, _, _) = summarize(&acs_times);
        let max_time_acs_ms = summarize(&problems.iter().map(|p| p.max_time_ms).collect::<Vec<_>>()).2;
        let min_time_acs_ms = summarize(&problems.iter().map(|p| p.min_time_ms).collect::<Vec<_>>()).3;

        let exact_times: Vec<f64> = problems.iter().filter_map(|p| p.exact_time_ms).collect();
        let (mean_time_exact_ms, stdev_time_exact_ms, max_time_exact_ms, min_time_exact_ms) =
            summarize_optional(&exact_times);

        let errors: Vec<f64> = problems
            .iter()
            .filter_map(|p| p.exact_length.map(|exact| percent_difference(p.mean_length, exact)))
            .collect();
        let (mean_error, stdev_error, max_error, min_error) = summarize_optional(&errors);

        let stdev_lengths: Vec<f64> = problems.iter().map(|p| p.stdev_length).collect();
        let mean_stdev_length = summarize(&stdev_lengths).0;

        SizeStatistics {
            num_holes,
            mean_error,
            stdev_error,
            max_error,
            min_error,
            mean_stdev_length,
            mean_time_exact_ms,
            stdev_time_exact_ms,
            max_time_exact_ms,
            min_time_exact_ms,
            mean_time_acs_ms,
            stdev_time_acs_ms,
            max_time_acs_ms,
            min_time_acs_ms,
        }
    }

    /// Export every colony run to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::persistence(path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush().map_err(|e| Error::persistence(path, e))?;
        Ok(())
    }

    /// Export per-size statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::persistence(path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in &self.statistics {
            writer.serialize(stat)?;
        }

        writer.flush().map_err(|e| Error::persistence(path, e))?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("          ACS Benchmark Report\n");
        report.push_str("========================================\n");
        report.push_str(&format!(
            "Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!(
            "Boards: {:?}, {} per size, {} tests each, {} ants x {} iterations\n\n",
            self.config.kind,
            self.config.problems_per_size,
            self.config.num_tests,
            self.config.acs.num_ants,
            self.config.acs.iterations
        ));

        let percent = |v: Option<f64>| {
            v.map(|x| format!("{:.4}%", is_zero(x)))
                .unwrap_or_else(|| "-".to_string())
        };
        let seconds = |v: Option<f64>| {
            v.map(|x| format!("{:.4}s", x / 1000.0))
                .unwrap_or_else(|| "-".to_string())
        };

        for stat in &self.statistics {
            report.push_str(&"-".repeat(40));
            report.push('\n');
            report.push_str(&format!("Number of holes: {}\n", stat.num_holes));
            report.push_str("-- Solution quality --\n");
            report.push_str(&format!("  Mean error   : {}\n", percent(stat.mean_error)));
            report.push_str(&format!("  Error stdev  : {}\n", percent(stat.stdev_error)));
            report.push_str(&format!("  Max error    : {}\n", percent(stat.max_error)));
            report.push_str(&format!("  Min error    : {}\n", percent(stat.min_error)));
            report.push_str(&format!(
                "  Mean stdev of the ACS objective: {:.4}\n",
                is_zero(stat.mean_stdev_length)
            ));
            report.push_str(&format!("-- Exact solver ({}) time --\n", self.oracle.name()));
            report.push_str(&format!("  Mean time    : {}\n", seconds(stat.mean_time_exact_ms)));
            report.push_str(&format!("  Time stdev   : {}\n", seconds(stat.stdev_time_exact_ms)));
            report.push_str(&format!("  Max time     : {}\n", seconds(stat.max_time_exact_ms)));
            report.push_str(&format!("  Min time     : {}\n", seconds(stat.min_time_exact_ms)));
            report.push_str("-- ACS time --\n");
            report.push_str(&format!("  Mean time    : {:.4}s\n", stat.mean_time_acs_ms / 1000.0));
            report.push_str(&format!("  Time stdev   : {:.4}s\n", stat.stdev_time_acs_ms / 1000.0));
            report.push_str(&format!("  Max time     : {:.4}s\n", stat.max_time_acs_ms / 1000.0));
            report.push_str(&format!("  Min time     : {:.4}s\n", stat.min_time_acs_ms / 1000.0));
        }

        report
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    pub fn problems(&self) -> &[ProblemStatistics] {
        &self.problems
    }

    pub fn statistics(&self) -> &[SizeStatistics] {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::validate_tour;

    fn quick_config() -> BenchmarkConfig {
        BenchmarkConfig {
            max_holes: 8,
            num_intervals: 2,
            problems_per_size: 2,
            num_tests: 3,
            show_progress: false,
            acs: AcsConfig {
                num_ants: 5,
                iterations: 20,
                concurrent: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_percent_difference() {
        assert_eq!(percent_difference(10.0, 10.0), 0.0);
        assert!((percent_difference(11.0, 9.0) - 20.0).abs() < 1e-10);
        assert_eq!(is_zero(3e-6), 0.0);
        assert_eq!(is_zero(-2.0), 0.0);
        assert_eq!(is_zero(0.5), 0.5);
    }

    #[test]
    fn test_sizes() {
        let config = BenchmarkConfig {
            max_holes: 10,
            num_intervals: 4,
            ..Default::default()
        };
        assert_eq!(config.sizes().unwrap(), vec![2, 5, 7, 10]);

        let bad = BenchmarkConfig {
            max_holes: 4,
            num_intervals: 4,
            ..Default::default()
        };
        assert!(matches!(bad.sizes(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_solve_trials_with_oracle() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let board = Board::generate(BoardKind::RandomSymmetric, 6, Metric::Euclidean, &mut rng).unwrap();
        let config = AcsConfig {
            num_ants: 5,
            iterations: 15,
            concurrent: false,
            ..Default::default()
        };
        let oracle = HeldKarpOracle::default();

        let pool = solve_trials(&board, config, 3, Some(&oracle)).unwrap();

        assert_eq!(pool.trials, 3);
        let exact = pool.exact_length.unwrap();
        assert!(pool.acs_length.min >= exact - 1e-9);
        assert!(pool.acs_length.min <= pool.acs_length.mean + 1e-9);
        assert!(pool.acs_length.mean <= pool.acs_length.max + 1e-9);
        assert_eq!(pool.best.cost, pool.acs_length.min);
        assert!(validate_tour(&pool.best.tour, 6));
        assert!(pool.gap.unwrap() >= 0.0);
        assert!(pool.exact_time_ms.is_some());
        assert!(pool.to_string().contains("Gap of the mean objective"));
    }

    #[test]
    fn test_solve_trials_without_usable_oracle() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let board = Board::generate(BoardKind::RandomAsymmetric, 6, Metric::Euclidean, &mut rng).unwrap();
        let config = AcsConfig {
            num_ants: 3,
            iterations: 5,
            concurrent: false,
            ..Default::default()
        };

        let small = HeldKarpOracle::new(4);
        let pool = solve_trials(&board, config.clone(), 2, Some(&small)).unwrap();
        assert_eq!(pool.exact_length, None);
        assert_eq!(pool.gap, None);
        assert!(pool.exact_time_ms.is_none());

        let pool = solve_trials(&board, config.clone(), 1, None).unwrap();
        assert_eq!(pool.acs_length.stdev, 0.0);
        assert_eq!(pool.acs_length.mean, pool.best.cost);

        assert!(matches!(
            solve_trials(&board, config, 0, None),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_summarize() {
        let (mean, stdev, max, min) = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((stdev - 2.0).abs() < 1e-12);
        assert_eq!(max, 9.0);
        assert_eq!(min, 2.0);
        assert_eq!(summarize(&[]), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_full_run() {
        let mut bench = Benchmark::new(quick_config());
        let stats = bench.run().unwrap().to_vec();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].num_holes, 4);
        assert_eq!(stats[1].num_holes, 8);
        assert_eq!(bench.results().len(), 2 * 2 * 3);
        assert_eq!(bench.problems().len(), 4);

        for stat in &stats {
            // The colony never beats the optimum
            let min_error = stat.min_error.unwrap();
            assert!(min_error > -1e-9);
            assert!(stat.mean_time_exact_ms.is_some());
        }
        for problem in bench.problems() {
            assert!(problem.min_length >= problem.exact_length.unwrap() - 1e-9);
        }

        let report = bench.generate_report();
        assert!(report.contains("Number of holes: 4"));
        assert!(report.contains("held-karp"));
    }

    #[test]
    fn test_csv_export() {
        let config = BenchmarkConfig {
            run_exact: false,
            ..quick_config()
        };
        let mut bench = Benchmark::new(config);
        bench.run().unwrap();
        assert!(bench.statistics().iter().all(|s| s.mean_error.is_none()));

        let dir = std::env::temp_dir().join(format!("acs-benchmark-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let runs = dir.join("runs.csv");
        let stats = dir.join("statistics.csv");
        bench.export_to_csv(&runs).unwrap();
        bench.export_statistics_csv(&stats).unwrap();

        let text = std::fs::read_to_string(&runs).unwrap();
        assert!(text.starts_with("num_holes,problem,trial,acs_length"));
        assert_eq!(text.lines().count(), 1 + 12);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
