//! Core input models for Skycast
//!
//! This module contains the raw sample types the aggregation engine consumes,
//! plus the decoder for the provider's JSON feeds.

pub mod feed;

pub use feed::{CurrentFeed, FeedError, ForecastFeed};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reading from the provider, either a forecast slot or the current conditions.
///
/// Values are in metric units as delivered by the provider. No conversion
/// happens inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// When the reading applies (forecast slot start, or capture time for "now")
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Condition group
    pub condition: Condition,
    /// Free-text description from the provider
    pub description: String,
}

/// Condition groups used as the icon code of every output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    #[default]
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Map a provider condition group name to a Condition.
    ///
    /// `Drizzle` is folded into `Rain`. Atmosphere groups (Mist, Fog, Haze, ...)
    /// and anything unrecognized fall back to the default, `Clouds`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" | "Drizzle" => Condition::Rain,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            other => {
                tracing::debug!(code = other, "unrecognized condition, using default");
                Condition::default()
            }
        }
    }

    /// Canonical code, as emitted in the `icon` field
    pub fn code(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
        }
    }

    /// Terminal symbol for text output
    pub fn symbol(&self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::Clouds => "☁️",
            Condition::Rain => "🌧️",
            Condition::Snow => "❄️",
            Condition::Thunderstorm => "⛈️",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
