//! histmix - fit a Normal + Exponential mixture to a histogram file
//!
//! Usage:
//!   histmix data.txt                       # mu=.. sigma=.. lambda=.. mix=.. divergence=..
//!   histmix data.txt --seed 7 --json       # full report as JSON
//!   histmix data.txt --on-failure abort    # any failed restart fails the run
//!
//! Exit codes: 0 on success, 1 on any fitting or input error, 2 on usage errors.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use histogram_mixture::{
    mixture::{
        core::options::{DEFAULT_RESTARTS, FailurePolicy, FitOptions},
        models::search::fit_histogram_file,
    },
    optimization::em_driver::{DEFAULT_MAX_ITER, DEFAULT_TOL_DIVERGENCE, EmTolerances},
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "histmix")]
#[command(about = "Fit a Normal + Exponential mixture to a histogram by multi-restart EM")]
#[command(version)]
struct Cli {
    /// Histogram file of whitespace-separated `bin weight` pairs
    file: PathBuf,

    /// Number of independent EM restarts
    #[arg(long, default_value_t = DEFAULT_RESTARTS)]
    restarts: usize,

    /// Iteration cap per restart
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Convergence tolerance on the change in KL divergence
    #[arg(long, default_value_t = DEFAULT_TOL_DIVERGENCE)]
    tol: f64,

    /// Base seed for the restart generators (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run restarts on the current thread only
    #[arg(long)]
    sequential: bool,

    /// What to do when a restart fails numerically: skip or abort
    #[arg(long, default_value = "skip")]
    on_failure: String,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv per-iteration EM state with obs_slog)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let tols = EmTolerances::new(cli.tol, cli.max_iter)?;
    let policy: FailurePolicy = cli.on_failure.parse()?;
    let trace_iterations = cli.verbose >= 3;
    let opts =
        FitOptions::new(tols, cli.restarts, cli.seed, !cli.sequential, policy, trace_iterations)?;

    let fit = fit_histogram_file(&cli.file, &opts)
        .with_context(|| format!("fitting {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
    } else {
        println!("{}", fit.summary_line());
    }
    Ok(())
}

/// Install a stderr `fmt` subscriber; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
