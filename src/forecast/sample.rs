//! Output record shared by the hourly and daily views.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::data::{Condition, RawSample};

/// A raw sample projected for display: rounded values and a local `HH:MM` label.
///
/// Never mutated once built. A better candidate replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSample {
    /// Local wall-clock time, `HH:MM`
    pub time: String,
    /// Temperature in Celsius, rounded
    pub temperature: i32,
    /// Feels-like temperature in Celsius, rounded
    pub feels_like: i32,
    /// Condition code
    pub icon: Condition,
    /// Provider description
    pub description: String,
    /// Relative humidity percentage, rounded
    pub humidity: u8,
    /// Wind speed in m/s, rounded to one decimal
    pub wind_speed: f64,
    /// Pressure in hPa, rounded
    pub pressure: u32,
}

impl PeriodSample {
    /// Project `sample` using its wall-clock time in `tz`.
    pub fn project<Tz: TimeZone>(sample: &RawSample, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::project_at(sample, &sample.timestamp.with_timezone(tz))
    }

    /// Project `sample` with an already-localized timestamp.
    pub(crate) fn project_at<Tz: TimeZone>(sample: &RawSample, local: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            time: local.format("%H:%M").to_string(),
            temperature: round_half_up(sample.temperature) as i32,
            feels_like: round_half_up(sample.feels_like) as i32,
            icon: sample.condition,
            description: sample.description.clone(),
            humidity: round_half_up(sample.humidity).clamp(0.0, 100.0) as u8,
            wind_speed: round_half_up(sample.wind_speed * 10.0) / 10.0,
            pressure: round_half_up(sample.pressure).max(0.0) as u32,
        }
    }
}

/// Round to the nearest integer, with exact halves going up (-2.5 becomes -2).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
