//! eventrec command line
//!
//! Trains on the built-in sample user and prints the top recommendations.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eventrec::{sample, Pipeline, RecError, RecommenderConfig, Report};

#[derive(Debug, Parser)]
#[command(name = "eventrec")]
#[command(about = "Recommend events for a user from their search history")]
#[command(version)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Training epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Number of events to recommend
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// SGD learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for weight initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Re-randomize the classifier after training, before scoring
    #[arg(long)]
    reinitialize: bool,

    /// Print each recommendation's score
    #[arg(long)]
    scores: bool,

    /// Write the trained model snapshot as JSON
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<RecommenderConfig, RecError> {
        let mut config = match &self.config {
            Some(path) => RecommenderConfig::load_from_file(path)?,
            None => RecommenderConfig::default(),
        };
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reinitialize {
            config.reinitialize_before_scoring = true;
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), RecError> {
    let config = cli.resolve_config()?;
    let items = sample::catalog();
    let user = sample::user(&items);

    let run = Pipeline::new(config.clone()).run(&user, &items)?;
    print!(
        "{}",
        Report::new(config.top_n, &run.recommendations).with_scores(cli.scores)
    );

    if let Some(path) = &cli.export {
        let json = run.snapshot()?.to_json()?;
        fs::write(path, json)
            .map_err(|e| RecError::internal(format!("failed to write {}: {e}", path.display())))?;
        info!(path = %path.display(), "model snapshot exported");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
