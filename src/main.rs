//! ACS TSP Solver - Command Line Interface
//!
//! Generates drilling boards, solves them with the Ant Colony System and
//! benchmarks the colony against an exact oracle.

use acs_tsp_solver::benchmark::{solve_trials, Benchmark, BenchmarkConfig};
use acs_tsp_solver::error::{Error, Result};
use acs_tsp_solver::exact::{ExactOracle, HeldKarpOracle};
use acs_tsp_solver::generator::{BoardGenerator, RandomBoardGenerator};
use acs_tsp_solver::heuristics::AcsConfig;
use acs_tsp_solver::instance::{Board, BoardKind};
use acs_tsp_solver::metric::Metric;
use acs_tsp_solver::persistence;
use acs_tsp_solver::visualization::Visualizer;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "acs-tsp-solver")]
#[command(version = "1.0")]
#[command(about = "Ant Colony System solver for synthetic drilling boards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board and write it to disk
    Generate {
        /// Board type
        #[arg(short, long, value_enum, default_value = "geometric")]
        kind: Kind,

        /// Number of holes
        #[arg(short = 'n', long, default_value = "30")]
        holes: usize,

        /// Distance metric for boards with coordinates
        #[arg(short, long, value_enum, default_value = "euclidean")]
        metric: MetricArg,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Directory receiving tsp{N}.dat and coordinates_{N}.csv
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Largest travel time of random boards
        #[arg(long)]
        upper_bound: Option<f64>,
    },

    /// Solve a board with the Ant Colony System
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Metric used with --coords
        #[arg(short, long, value_enum, default_value = "euclidean")]
        metric: MetricArg,

        #[command(flatten)]
        acs: AcsArgs,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also solve with the exact oracle and report the gap
        #[arg(long)]
        exact: bool,

        /// Number of repeated solves; statistics are reported over all of them
        #[arg(long, default_value = "1")]
        trials: usize,

        /// Write an SVG drawing next to the input (coordinate boards only)
        #[arg(long)]
        visualize: bool,

        /// Print board statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the colony on generated boards of increasing size
    Benchmark {
        /// Largest board size
        #[arg(long, default_value = "12")]
        max_holes: usize,

        /// Number of board sizes
        #[arg(short, long, default_value = "3")]
        intervals: usize,

        /// Boards per size
        #[arg(short, long, default_value = "3")]
        problems_per_size: usize,

        /// Colony runs per board
        #[arg(short, long, default_value = "5")]
        tests: usize,

        /// Board type
        #[arg(short, long, value_enum, default_value = "random-symmetric")]
        kind: Kind,

        /// Distance metric for boards with coordinates
        #[arg(short, long, value_enum, default_value = "euclidean")]
        metric: MetricArg,

        /// Compare against the exact oracle
        #[arg(long)]
        exact: bool,

        /// Seed for board generation
        #[arg(long, default_value = "42")]
        board_seed: u64,

        #[command(flatten)]
        acs: AcsArgs,

        /// Output directory
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Travel-time matrix in .dat format
    #[arg(long)]
    matrix: Option<PathBuf>,

    /// Hole coordinates in .csv format
    #[arg(long)]
    coords: Option<PathBuf>,
}

/// Colony parameters; each flag overrides the value from --config
#[derive(Args)]
struct AcsArgs {
    /// JSON file with an ACS configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ants
    #[arg(long)]
    ants: Option<usize>,

    /// Number of iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Pheromone exponent
    #[arg(long)]
    alpha: Option<f64>,

    /// Heuristic exponent
    #[arg(long)]
    beta: Option<f64>,

    /// Local evaporation rate
    #[arg(long)]
    local_evaporation: Option<f64>,

    /// Global evaporation rate
    #[arg(long)]
    global_evaporation: Option<f64>,

    /// Initial pheromone T0
    #[arg(long)]
    initial_pheromone: Option<f64>,

    /// Exploitation probability
    #[arg(long)]
    q0: Option<f64>,

    /// Colony seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run the ants one after the other
    #[arg(long)]
    sequential: bool,

    /// Deposit pheromone on the edge closing the best tour as well
    #[arg(long)]
    reinforce_closing_edge: bool,
}

impl AcsArgs {
    fn resolve(&self) -> Result<AcsConfig> {
        let mut config = match &self.config {
            Some(path) => AcsConfig::from_json_file(path)?,
            None => AcsConfig::default(),
        };

        if let Some(v) = self.ants {
            config.num_ants = v;
        }
        if let Some(v) = self.iterations {
            config.iterations = v;
        }
        if let Some(v) = self.alpha {
            config.alpha = v;
        }
        if let Some(v) = self.beta {
            config.beta = v;
        }
        if let Some(v) = self.local_evaporation {
            config.local_evaporation = v;
        }
        if let Some(v) = self.global_evaporation {
            config.global_evaporation = v;
        }
        if let Some(v) = self.initial_pheromone {
            config.initial_pheromone = v;
        }
        if let Some(v) = self.q0 {
            config.q0 = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if self.sequential {
            config.concurrent = false;
        }
        if self.reinforce_closing_edge {
            config.reinforce_closing_edge = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Kind {
    /// Random travel times, (a->b) != (b->a)
    RandomAsymmetric,
    /// Random travel times, mirrored
    RandomSymmetric,
    /// Holes on a grid
    Grid,
    /// Holes on regular polygons
    Geometric,
}

impl From<Kind> for BoardKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::RandomAsymmetric => BoardKind::RandomAsymmetric,
            Kind::RandomSymmetric => BoardKind::RandomSymmetric,
            Kind::Grid => BoardKind::Grid,
            Kind::Geometric => BoardKind::Geometric,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum MetricArg {
    Manhattan,
    Euclidean,
}

impl From<MetricArg> for Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Manhattan => Metric::Manhattan,
            MetricArg::Euclidean => Metric::Euclidean,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Generate { kind, holes, metric, seed, output_dir, upper_bound } => {
            generate_board(kind, holes, metric.into(), seed, &output_dir, upper_bound)
        }

        Commands::Solve { input, metric, acs, output, exact, trials, visualize, verbose } => {
            solve_board(&input, metric.into(), &acs, output, exact, trials, visualize, verbose)
        }

        Commands::Benchmark {
            max_holes,
            intervals,
            problems_per_size,
            tests,
            kind,
            metric,
            exact,
            board_seed,
            acs,
            output,
        } => acs.resolve().and_then(|acs| {
            let config = BenchmarkConfig {
                max_holes,
                num_intervals: intervals,
                problems_per_size,
                num_tests: tests,
                kind: kind.into(),
                metric: metric.into(),
                run_exact: exact,
                seed: board_seed,
                acs,
                ..Default::default()
            };
            run_benchmark(config, &output)
        }),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate_board(
    kind: Kind,
    holes: usize,
    metric: Metric,
    seed: u64,
    output_dir: &Path,
    upper_bound: Option<f64>,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let board = match (kind, upper_bound) {
        (Kind::RandomAsymmetric, Some(ub)) => {
            let mut board = RandomBoardGenerator::asymmetric(ub).generate(holes, &mut rng)?;
            board.kind = Some(BoardKind::RandomAsymmetric);
            board
        }
        (Kind::RandomSymmetric, Some(ub)) => {
            let mut board = RandomBoardGenerator::symmetric(ub).generate(holes, &mut rng)?;
            board.kind = Some(BoardKind::RandomSymmetric);
            board
        }
        (_, Some(_)) => {
            log::warn!("--upper-bound only applies to random boards, ignoring it");
            Board::generate(kind.into(), holes, metric, &mut rng)?
        }
        (_, None) => Board::generate(kind.into(), holes, metric, &mut rng)?,
    };

    println!("{}", board.statistics());

    for path in board.save_to_dir(output_dir)? {
        println!("Wrote {:?}", path);
    }
    Ok(())
}

fn load_board(input: &InputArgs, metric: Metric) -> Result<(Board, PathBuf)> {
    match (&input.matrix, &input.coords) {
        (Some(path), _) => {
            println!("Loading matrix from {:?}...", path);
            let board = Board::from_matrix(persistence::load_matrix_dat(path)?)?;
            Ok((board, path.clone()))
        }
        (None, Some(path)) => {
            println!("Loading coordinates from {:?}...", path);
            let board = Board::from_points(persistence::load_coordinates_csv(path)?, metric)?;
            Ok((board, path.clone()))
        }
        (None, None) => Err(Error::InvalidInstance(
            "either --matrix or --coords is required".to_string(),
        )),
    }
}

fn solve_board(
    input: &InputArgs,
    metric: Metric,
    acs: &AcsArgs,
    output: Option<PathBuf>,
    exact: bool,
    trials: usize,
    visualize: bool,
    verbose: bool,
) -> Result<()> {
    let (board, path) = load_board(input, metric)?;
    let mut config = acs.resolve()?;
    config.metric = metric;

    if verbose {
        println!("{}", board.statistics());
        println!("Configuration: {:?}", config);
    }

    println!(
        "Solving {} holes with {} ants x {} iterations, {} trial(s)...",
        board.dimension(),
        config.num_ants,
        config.iterations,
        trials
    );
    let oracle = HeldKarpOracle::default();
    let pool = solve_trials(
        &board,
        config,
        trials,
        exact.then_some(&oracle as &dyn ExactOracle),
    )?;
    let solution = pool.best.clone();

    println!("\n{}", solution);
    println!("{}", pool);
    if exact && pool.exact_length.is_none() {
        println!("Exact solver ({}) unavailable for {} holes", oracle.name(), board.dimension());
    }

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(&out_path, json).map_err(|e| Error::persistence(&out_path, e))?;
        println!("Solution saved to {:?}", out_path);
    }

    if visualize {
        let svg_path = path.with_extension("svg");
        Visualizer::new().save_svg(&board, &solution, &svg_path)?;
        println!("Visualization saved to {:?}", svg_path);
    }

    Ok(())
}

fn run_benchmark(config: BenchmarkConfig, output: &Path) -> Result<()> {
    std::fs::create_dir_all(output).map_err(|e| Error::persistence(output, e))?;

    let mut benchmark = Benchmark::new(config);
    benchmark.run()?;

    let results_path = output.join("results.csv");
    benchmark.export_to_csv(&results_path)?;
    println!("Results exported to {:?}", results_path);

    let stats_path = output.join("statistics.csv");
    benchmark.export_statistics_csv(&stats_path)?;
    println!("Statistics exported to {:?}", stats_path);

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    std::fs::write(&report_path, &report).map_err(|e| Error::persistence(&report_path, e))?;
    println!("Report saved to {:?}", report_path);

    Ok(())
}
