//! `cycleforge` command line runner.
//!
//! ```text
//! cycleforge run --instance TSPA.csv --config solver.toml --start 3 --export best.csv
//! cycleforge bench --instance TSPA.csv --runs 200
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cycleforge::{
    read_instance, run_experiment, run_solver_with_config, ProblemData, SolverConfig, Tour,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cycleforge", author, version, about, long_about = None)]
struct Cli {
    /// Suppress console logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve an instance once from a single start node
    Run(RunArgs),
    /// Solve repeatedly from rotating start nodes and summarize
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct InstanceArgs {
    /// Instance file with one `x;y;cost` line per node
    #[arg(short, long)]
    instance: PathBuf,

    /// Solver configuration (.toml, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Writes the best tour as a semicolon separated table
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    common: InstanceArgs,

    /// Node the search starts from
    #[arg(short, long, default_value_t = 0)]
    start: usize,
}

#[derive(Args, Debug)]
struct BenchArgs {
    #[command(flatten)]
    common: InstanceArgs,

    /// Number of runs; run `i` starts from node `i % total_nodes`
    #[arg(short, long, default_value_t = 200)]
    runs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.quiet {
        cycleforge::console::init();
    }

    match cli.command {
        Command::Run(args) => run(args),
        Command::Bench(args) => bench(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let (data, config) = prepare(&args.common)?;
    if args.start >= data.total_nodes() {
        bail!(
            "start node {} is out of range for {} nodes",
            args.start,
            data.total_nodes()
        );
    }

    let tour = run_solver_with_config(&data, &config, args.start)?;
    println!("{tour}");

    if let Some(path) = &args.common.export {
        export(&tour, &data, path)?;
    }
    Ok(())
}

fn bench(args: BenchArgs) -> Result<()> {
    let (data, config) = prepare(&args.common)?;
    let summary = run_experiment(&data, &config, args.runs)?;
    println!("{summary}");

    if let Some(path) = &args.common.export {
        export(&summary.best, &data, path)?;
    }
    Ok(())
}

fn prepare(args: &InstanceArgs) -> Result<(ProblemData, SolverConfig)> {
    let data = read_instance(&args.instance)
        .with_context(|| format!("reading instance {}", args.instance.display()))?;
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SolverConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_random_seed(seed);
    }

    info!(
        "instance {}: {} nodes, selecting {}",
        data.name(),
        data.total_nodes(),
        data.selection_size()
    );
    Ok((data, config))
}

fn load_config(path: &Path) -> Result<SolverConfig> {
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => SolverConfig::from_yaml_file(path),
        _ => SolverConfig::from_toml_file(path),
    }
    .with_context(|| format!("loading config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(config)
}

fn export(tour: &Tour, data: &ProblemData, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tour.write_table(data, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    info!("tour written to {}", path.display());
    Ok(())
}
