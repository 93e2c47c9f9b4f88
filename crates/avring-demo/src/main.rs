//! avring-demo - latest-frame ring demonstration
//!
//! Publishes numbered frames from one writer thread into an `avring` ring
//! and fans them out to several readers. Readers alternate between channel
//! and callback sinks and report how many frames they saw and how many they
//! skipped because the writer lapped them.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod output;
mod run;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use avring::RingConfig;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::DemoError;
use crate::run::RunSettings;

#[derive(Parser)]
#[command(name = "avring-demo")]
#[command(about = "Drive a latest-frame ring with one writer and several readers")]
#[command(version)]
struct Cli {
    /// Number of ring slots (overrides the config file)
    #[arg(long)]
    slots: Option<usize>,

    /// Number of reader threads
    #[arg(long, default_value_t = 4)]
    readers: usize,

    /// Number of frames the writer publishes
    #[arg(long, default_value_t = 100_000)]
    frames: u64,

    /// Reader poll interval in microseconds, 0 yields (overrides the config file)
    #[arg(long = "poll-us")]
    poll_us: Option<u64>,

    /// Pause between published frames in microseconds
    #[arg(long = "frame-interval-us", default_value_t = 0)]
    frame_interval_us: u64,

    /// Time readers get to catch up after the last frame, in milliseconds
    #[arg(long = "drain-ms", default_value_t = 50)]
    drain_ms: u64,

    /// Ring configuration file (JSON)
    #[arg(long, env = "AVRING_CONFIG")]
    config: Option<PathBuf>,

    /// Output in JSON format for machine parsing
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn ring_config(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(DemoError::from)
                    .with_context(|| format!("reading {}", path.display()))?;
                RingConfig::from_json_str(&text).map_err(DemoError::from)?
            }
            None => RingConfig::default(),
        };
        if let Some(slots) = self.slots {
            config.slots = slots;
        }
        if let Some(poll_us) = self.poll_us {
            config.poll_interval_us = poll_us;
        }
        config.validate().map_err(DemoError::from)?;
        Ok(config)
    }

    fn settings(&self) -> Result<RunSettings> {
        Ok(RunSettings {
            ring: self.ring_config()?,
            readers: self.readers,
            frames: self.frames,
            frame_interval: Duration::from_micros(self.frame_interval_us),
            drain: Duration::from_millis(self.drain_ms),
        })
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("avring_demo={log_level},avring={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = cli
        .settings()
        .and_then(|settings| run::run(&settings).map_err(anyhow::Error::from));

    match result {
        Ok(report) => output::print_report(&report, cli.json),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<DemoError>().map_or(1, DemoError::exit_code);
            std::process::exit(exit_code);
        }
    }
}
