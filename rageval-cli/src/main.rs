//! rageval CLI — score generated answers against reference answers.
//!
//! Provides single-pair scoring, JSONL batch scoring and a configuration dump.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// rageval: lexical metrics for RAG answers
#[derive(Parser, Debug)]
#[command(name = "rageval", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Also write JSON logs to this directory (rotated daily)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Score one candidate against one or more references
    Score {
        /// Generated answer
        #[arg(long)]
        candidate: String,
        /// Reference answer (repeat for multiple references)
        #[arg(short, long = "reference", required = true)]
        references: Vec<String>,
        /// Override the highest BLEU n-gram order
        #[arg(long)]
        max_n: Option<usize>,
        /// Disable BLEU smoothing
        #[arg(long)]
        no_smooth: bool,
    },
    /// Score a JSON Lines file of {"candidate", "references"} records
    Batch {
        /// Input file, one QA pair per line
        input: PathBuf,
        /// Print every metric instead of the stored subset
        #[arg(long)]
        full: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(log_filter(cli.verbose, cli.quiet)));

    // Optional JSON file layer for structured logging
    let (json_layer, _guard) = match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "rageval.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = rageval_metrics::load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    commands::handle_command(cli.command, config).await
}
