//! Next-action labeller for Todoist.
//!
//! Polls the account on a fixed delay and keeps the tracking label on
//! exactly the currently actionable tasks.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::fs::OpenOptions;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

use nextaction::cli::Cli;
use nextaction::config::Config;
use nextaction::engine::Engine;
use nextaction::error::StoreError;
use nextaction::reconcile;
use nextaction::todoist::TodoistApi;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let config = Config::from_cli(&cli)?;

    info!("Starting nextaction v{}", env!("CARGO_PKG_VERSION"));
    if config.cache_path.is_none() {
        debug!("sync cache disabled");
    }

    let mut api = TodoistApi::new(config.api_token.clone(), config.cache_path.clone())?;

    // First sync, so the tracking label can be resolved before the loop
    // starts. An unknown label is a configuration error, not retryable.
    api.sync().await?;
    let label_id = api
        .resolve_label(&config.label_name)
        .ok_or_else(|| StoreError::LabelMissing(config.label_name.clone()))?;
    debug!(label = %config.label_name, label_id, "tracking label resolved");

    let engine = Engine::new(config.classifier(), config.visibility_filter(), label_id);

    loop {
        if let Err(e) = run_cycle(&mut api, &engine).await {
            error!(error = %e, "refresh cycle failed");
        }

        if config.onetime {
            break;
        }

        debug!(seconds = config.delay.as_secs(), "sleeping");
        tokio::time::sleep(config.delay).await;
    }

    Ok(())
}

/// One refresh cycle: sync, propagate, commit whatever changed.
///
/// Any error aborts the cycle without touching stored state; the next cycle
/// starts over from a fresh sync and re-derives any still-needed changes.
async fn run_cycle(api: &mut TodoistApi, engine: &Engine) -> Result<()> {
    api.sync().await?;

    let mut snapshot = api.snapshot();
    engine.run(&mut snapshot, Utc::now());

    let updates = reconcile::pending_updates(&snapshot);
    if updates.is_empty() {
        debug!("no changes queued, skipping commit");
        return Ok(());
    }

    info!(changes = updates.len(), "committing queued changes");
    api.commit(&updates).await?;
    Ok(())
}
