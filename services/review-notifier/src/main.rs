//! Review notifier CLI
//!
//! Command-line interface for the homework review status poller.

use std::path::PathBuf;

use clap::Parser;
use review_notifier::{load_config, Config};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "review-notifier")]
#[command(about = "Homework review status poller with Telegram notifications")]
#[command(version)]
#[command(
    after_help = "Logs are written to stdout only. Rotation and retention are left to the \
                  process supervisor (systemd-journald, docker logs, logrotate)."
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    interval_seconds: Option<u64>,

    /// Unix timestamp for the first request's from_date (overrides config file)
    #[arg(long)]
    from_date: Option<i64>,

    /// Log level, ignored when RUST_LOG is set
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, interval_seconds={:?}, from_date={:?}, log_level={:?}",
        args.config,
        args.interval_seconds,
        args.from_date,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if let Some(interval_seconds) = args.interval_seconds {
        config.polling.interval_seconds = interval_seconds;
    }
    if let Some(from_date) = args.from_date {
        config.polling.initial_from_date = Some(from_date);
    }

    tracing::info!("Starting review notifier");
    tracing::info!("API endpoint: {}", config.api.endpoint);
    tracing::info!("Chat id: {}", config.telegram.chat_id);

    review_notifier::run(config).await?;

    Ok(())
}
