//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sort_bench_core::{ExperimentConfig, ProgressObserver, RunSummary, SchedulerBuilder};
use sort_bench_report::{format_table, summarize, CsvFileSink};
use sort_bench_strategies::default_strategies;

use crate::progress::{BarProgress, ConsoleProgress};

#[derive(Parser, Debug)]
#[command(name = "sort-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a benchmark experiment
    Run(RunArgs),
    /// Validate a configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print per-size averages of a finished report
    Summarize {
        /// Path to a report written by `run`
        #[arg(short, long)]
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file, created or truncated
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Dataset sizes, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<usize>>,

    /// Trials per size
    #[arg(long)]
    pub repetitions: Option<usize>,

    /// Milliseconds between progress polls
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Maximum trials running at once
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Cancel outstanding trials after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Show a progress bar instead of progress lines
    #[arg(long)]
    pub bar: bool,
}

impl RunArgs {
    /// Resolve the experiment config: file values first, then flags
    pub fn experiment_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ExperimentConfig::default(),
        };

        if let Some(sizes) = &self.sizes {
            config.sizes = sizes.clone();
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        if self.max_concurrency.is_some() {
            config.max_concurrency = self.max_concurrency;
        }

        config.validate().context("Invalid experiment configuration")?;
        Ok(config)
    }
}

impl Cli {
    /// Dispatch the parsed command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run(args) => {
                let summary = run(&args).await?;
                report_summary(&summary);
                println!("goodbye!");
                Ok(())
            }
            Commands::Validate { config } => {
                let config = load_config(&config)?;
                config.validate().context("Invalid experiment configuration")?;
                println!(
                    "Configuration is valid: {} sizes x {} repetitions = {} trials",
                    config.sizes.len(),
                    config.repetitions,
                    config.total_trials()
                );
                if self.verbose {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
                Ok(())
            }
            Commands::Summarize { input, json } => {
                let summaries = summarize(&input)
                    .with_context(|| format!("Failed to summarize report: {}", input.display()))?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&summaries)?);
                } else {
                    print!("{}", format_table(&summaries));
                }
                Ok(())
            }
        }
    }
}

/// Run one experiment and write its report
///
/// Fails only on setup problems. Trial and teardown failures end up in the
/// returned summary.
pub async fn run(args: &RunArgs) -> Result<RunSummary> {
    let config = args.experiment_config()?;
    let total = config.total_trials();

    let sink = CsvFileSink::create(&args.output).with_context(|| {
        format!("Failed to create report file: {}", args.output.display())
    })?;

    tracing::info!(
        output = %sink.path().display(),
        trials = total,
        "Writing report"
    );

    let scheduler = SchedulerBuilder::new()
        .config(config)
        .strategies(default_strategies())
        .sink(Arc::new(sink))
        .build()?;

    let mut observer: Box<dyn ProgressObserver> = if args.bar {
        Box::new(BarProgress::new(total)?)
    } else {
        Box::new(ConsoleProgress)
    };

    let summary = match args.timeout_secs {
        Some(secs) => {
            scheduler
                .run_with_timeout(Duration::from_secs(secs), observer.as_mut())
                .await?
        }
        None => scheduler.run_with_signal_handling(observer.as_mut()).await?,
    };

    Ok(summary)
}

fn load_config(path: &Path) -> Result<ExperimentConfig> {
    ExperimentConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}

fn report_summary(summary: &RunSummary) {
    if summary.write_failures > 0 || summary.failed > 0 || summary.panicked > 0 {
        tracing::warn!(
            lost = summary.lost_records(),
            write_failures = summary.write_failures,
            failed = summary.failed,
            panicked = summary.panicked,
            "Some trial records were not written"
        );
    }
    if summary.cancelled > 0 {
        tracing::warn!(cancelled = summary.cancelled, "Run was cancelled early");
    }
    if let Some(error) = &summary.teardown_error {
        tracing::warn!(%error, "Report may be incomplete");
    }
}
