//! Subcommand handlers.

use crate::Commands;
use rageval_metrics::calculator::read_qa_pairs;
use rageval_metrics::{MetricsCalculator, MetricsConfig, ScoreOptions, score_texts};
use serde::Serialize;

pub(crate) async fn handle_command(command: Commands, config: MetricsConfig) -> anyhow::Result<()> {
    match command {
        Commands::Score {
            candidate,
            references,
            max_n,
            no_smooth,
        } => {
            let options = score_options(&config, max_n, no_smooth);
            let scores = score_texts(&candidate, &references, &options)?;
            println!("{}", serde_json::to_string_pretty(&scores)?);
            Ok(())
        }
        Commands::Batch { input, full } => {
            let pairs = read_qa_pairs(&input).await?;
            tracing::info!(pairs = pairs.len(), input = %input.display(), "scoring batch");
            let calculator = MetricsCalculator::from_config(&config);
            if full {
                let results = calculator.batch_score_parallel(pairs).await?;
                print_json_lines(&results)
            } else {
                let results = calculator.batch_evaluate_parallel(pairs).await?;
                print_json_lines(&results)
            }
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Configured options with command-line overrides applied.
fn score_options(config: &MetricsConfig, max_n: Option<usize>, no_smooth: bool) -> ScoreOptions {
    let mut options = config.score_options();
    if let Some(max_n) = max_n {
        options.max_n = max_n;
    }
    if no_smooth {
        options.smooth = false;
    }
    options
}

fn print_json_lines<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}
