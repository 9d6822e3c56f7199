//! Labbridge binary.
//!
//! Starts the periodic export scan and one tap listener per configured
//! endpoint, then waits for Ctrl-C. Shutdown is cooperative: the token
//! is triggered and every task is awaited before exit.

use anyhow::{Context, Result};
use clap::Parser;
use labbridge::config::{self, Args};
use labbridge::scan::ScanDispatcher;
use labbridge::shutdown::ShutdownToken;
use labbridge::tap::TapListener;
use labbridge::upload::Uploader;
use labbridge_logging::LogConfig;
use std::fs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = labbridge_logging::init_logging(LogConfig {
        app_name: "labbridge",
        verbose: args.verbose,
    })?;

    let config = config::resolve(&args)?;
    fs::create_dir_all(&config.scan.scan_dir).with_context(|| {
        format!(
            "Failed to create scan directory: {}",
            config.scan.scan_dir.display()
        )
    })?;

    tracing::info!(
        scan_dir = %config.scan.scan_dir.display(),
        machine_id = %config.identity.machine_id,
        taps = config.taps.len(),
        "Starting labbridge"
    );

    let shutdown = ShutdownToken::new();

    let uploader = Uploader::new()?;
    let dispatcher = ScanDispatcher::new(config.scan, config.identity, uploader);
    let scan_handle = tokio::spawn(dispatcher.run(shutdown.clone()));

    let taps: Vec<TapListener> = config
        .taps
        .into_iter()
        .map(|tap| TapListener::spawn(tap, shutdown.clone()))
        .collect();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    tracing::info!("Stop requested, shutting down");
    shutdown.trigger();

    if let Err(err) = scan_handle.await {
        tracing::warn!(error = %err, "Scan task failed");
    }
    for tap in taps {
        tap.join().await;
    }

    tracing::info!("Main exiting");
    Ok(())
}
