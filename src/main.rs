//! Skycast - hourly and 5-day period forecasts from raw provider feeds
//!
//! Reads already-fetched current-conditions and forecast documents, runs the
//! aggregation engine and prints the report as text or JSON.

use std::process::ExitCode;

use chrono::{Local, Offset, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skycast::cli::{Cli, OutputFormat, RunConfig, ZoneSetting};
use skycast::data::{CurrentFeed, ForecastFeed};
use skycast::forecast::{build_report, ForecastInput};
use skycast::render::render_report;

/// Sets up stderr logging, honouring RUST_LOG when it is set.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the feeds, aggregates and prints the report
fn run(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let forecast = ForecastFeed::load(&config.forecast_path)?;
    tracing::info!(
        samples = forecast.samples.len(),
        city = ?forecast.city,
        "loaded forecast feed"
    );

    let current = config
        .current_path
        .as_deref()
        .map(CurrentFeed::load)
        .transpose()?;
    if let Some(current) = &current {
        tracing::info!(captured_at = %current.reading.timestamp, "loaded current conditions");
    }

    let city = current
        .as_ref()
        .and_then(|feed| feed.city.clone())
        .or_else(|| forecast.city.clone());
    let feed_offset = forecast
        .utc_offset
        .or_else(|| current.as_ref().and_then(|feed| feed.utc_offset))
        .unwrap_or_else(|| Utc.fix());

    let input = match current {
        Some(current) => ForecastInput::new(current.reading, forecast.samples),
        None => ForecastInput::without_current(Utc::now(), forecast.samples),
    };

    let report = match config.zone {
        ZoneSetting::Feed => build_report(&input, &feed_offset),
        ZoneSetting::Local => build_report(&input, &Local),
        ZoneSetting::Fixed(offset) => build_report(&input, &offset),
    }
    .with_city(city);

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_report(&report)),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    init_tracing(config.log_filter);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "aggregation failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
