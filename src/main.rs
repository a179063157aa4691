//! Onboarding pipeline runner
//!
//! `onboarding run` processes one queue event document, `onboarding poll`
//! long-polls the source queue and runs the pipeline per received batch.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use customer_onboarding::config::Config;
use customer_onboarding::core::models::QueueEvent;
use customer_onboarding::core::pipeline::{OnboardingPipeline, PollOptions, poll};
use customer_onboarding::core::providers::build_clients;
use customer_onboarding::utils::logging::{LogFormat, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Customer onboarding pipeline
#[derive(Parser, Debug)]
#[command(name = "onboarding")]
#[command(version = VERSION)]
#[command(about = "Create billing accounts for queued customers and record them")]
struct Cli {
    /// YAML configuration file; environment variables override its values
    #[arg(long, short = 'c', global = true, env = "ONBOARDING_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process one queue event document
    Run {
        /// Path to the event JSON, or `-` for stdin
        #[arg(long, short = 'e')]
        event: String,
    },
    /// Long-poll the source queue and process every batch received
    Poll {
        /// Stop after this many receive calls
        #[arg(long)]
        max_batches: Option<usize>,

        /// Messages per receive, at most 10
        #[arg(long, default_value_t = 10)]
        max_messages: usize,

        /// Long-poll wait in seconds, at most 20
        #[arg(long, default_value_t = 20)]
        wait_secs: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; explicit variables still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Onboarding failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    let providers = build_clients(&config)
        .await
        .context("Failed to initialize clients")?;
    let pipeline = OnboardingPipeline::new(providers.clients, config.pipeline.clone());

    match cli.command {
        Command::Run { event } => {
            let payload = read_event(&event).await?;
            let event = QueueEvent::from_json(&payload)?;

            match pipeline.run(event.records).await {
                Ok(summary) => {
                    if !summary.is_clean() {
                        warn!(
                            failures = summary.failure_count(),
                            "Run finished with failures"
                        );
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!(error = %e, "Run aborted");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Poll {
            max_batches,
            max_messages,
            wait_secs,
        } => {
            let options = PollOptions {
                max_messages,
                wait: Duration::from_secs(wait_secs),
                max_polls: max_batches,
            };

            tokio::select! {
                stats = poll(&pipeline, providers.source.as_ref(), &options) => {
                    let stats = stats?;
                    info!(aborted_runs = stats.aborted_runs, "Poller stopped");
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl-C, stopping poller");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn read_event(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut payload = String::new();
        tokio::io::stdin()
            .read_to_string(&mut payload)
            .await
            .context("Failed to read event from stdin")?;
        Ok(payload)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read event file {}", source))
    }
}
