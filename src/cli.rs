//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap and resolves them
//! into a validated [`RunConfig`], including the time zone used for local
//! hours and days.

use std::path::PathBuf;

use chrono::FixedOffset;
use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::data::feed::STDIN_SOURCE;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The zone argument is neither a keyword nor a valid offset
    #[error("Invalid zone: '{0}'. Use 'feed', 'local', 'utc' or an offset like +03:00")]
    InvalidZone(String),

    /// Both feeds were pointed at standard input
    #[error("Only one feed can be read from standard input")]
    StdinTwice,
}

/// Skycast - hourly and 5-day period forecasts from raw provider feeds
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Hourly and 5-day period forecasts from raw provider feeds")]
#[command(version)]
pub struct Cli {
    /// Forecast feed document (`-` reads standard input)
    #[arg(long, value_name = "PATH")]
    pub forecast: PathBuf,

    /// Current-conditions document, placed into today's periods
    #[arg(long, value_name = "PATH")]
    pub current: Option<PathBuf>,

    /// Time zone for local hours and days
    ///
    /// Examples:
    ///   skycast --forecast f.json --zone feed     # Offset reported by the provider
    ///   skycast --forecast f.json --zone local    # This machine's zone
    ///   skycast --forecast f.json --zone +03:00   # Fixed offset
    #[arg(long, value_name = "ZONE", default_value = "feed")]
    pub zone: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Which time zone local hours and days are computed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSetting {
    /// The fixed offset the provider reports for the city
    #[default]
    Feed,
    /// The host's local zone
    Local,
    /// An explicit fixed offset
    Fixed(FixedOffset),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Forecast document path
    pub forecast_path: PathBuf,
    /// Current-conditions document path, if given
    pub current_path: Option<PathBuf>,
    /// Zone for wall-clock math
    pub zone: ZoneSetting,
    /// Output format
    pub format: OutputFormat,
    /// Default log filter when RUST_LOG is unset
    pub log_filter: &'static str,
}

/// Parses a zone argument.
///
/// # Arguments
/// * `s` - `feed`, `local`, `utc`/`Z`, or an offset (`+03:00`, `-0700`, `+5`)
///
/// # Returns
/// * `Ok(ZoneSetting)` if the string is recognized
/// * `Err(CliError::InvalidZone)` otherwise
pub fn parse_zone_arg(s: &str) -> Result<ZoneSetting, CliError> {
    let trimmed = s.trim();
    match trimmed.to_lowercase().as_str() {
        "feed" => Ok(ZoneSetting::Feed),
        "local" => Ok(ZoneSetting::Local),
        _ => parse_fixed_offset(trimmed)
            .map(ZoneSetting::Fixed)
            .ok_or_else(|| CliError::InvalidZone(s.to_string())),
    }
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None if rest.len() <= 2 => (rest, "00"),
        None => return None,
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with resolved settings
    /// * `Err(CliError)` if the zone is invalid or both feeds read stdin
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let zone = parse_zone_arg(&cli.zone)?;

        let reads_stdin = |path: &PathBuf| path.as_os_str() == STDIN_SOURCE;
        if reads_stdin(&cli.forecast) && cli.current.as_ref().is_some_and(reads_stdin) {
            return Err(CliError::StdinTwice);
        }

        Ok(RunConfig {
            forecast_path: cli.forecast.clone(),
            current_path: cli.current.clone(),
            zone,
            format: cli.format,
            log_filter: if cli.verbose { "debug" } else { "warn" },
        })
    }
}
