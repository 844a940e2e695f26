//! Forecast aggregation engine
//!
//! Turns a current-conditions reading and a 3-hour forecast feed into a
//! rolling hourly view and a 5-day view split into morning, day, evening and
//! night. All wall-clock math happens in a caller-supplied time zone.

pub mod daily;
pub mod hourly;
pub mod normalize;
pub mod period;
pub mod sample;

pub use daily::{bucket_days, day_label, DayBucket, DayBuckets};
pub use hourly::{hourly_forecast, HOURLY_SLOTS};
pub use normalize::{compact_days, DailyForecast, DAILY_DAYS};
pub use period::Period;
pub use sample::{round_half_up, PeriodSample};

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::data::RawSample;

/// Everything one aggregation pass needs
#[derive(Debug, Clone)]
pub struct ForecastInput {
    /// Instant that defines "today"
    pub captured_at: DateTime<Utc>,
    /// The "now" reading, if one was captured
    pub current: Option<RawSample>,
    /// Forecast samples in feed order
    pub samples: Vec<RawSample>,
}

impl ForecastInput {
    /// Input anchored at the current reading's capture time
    pub fn new(current: RawSample, samples: Vec<RawSample>) -> Self {
        Self {
            captured_at: current.timestamp,
            current: Some(current),
            samples,
        }
    }

    /// Input with no current reading; `captured_at` still defines "today"
    pub fn without_current(captured_at: DateTime<Utc>, samples: Vec<RawSample>) -> Self {
        Self {
            captured_at,
            current: None,
            samples,
        }
    }
}

/// Both derived views, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    /// City name reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Projection of the current reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PeriodSample>,
    /// Next 24 hours, one record per leading forecast slot
    pub hourly_forecast: Vec<PeriodSample>,
    /// Up to five days, four periods each
    pub daily_forecast: Vec<DailyForecast>,
}

impl ForecastReport {
    /// Attach a city name
    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = city;
        self
    }
}

/// Run both views over `input`, reading local time in `tz`
pub fn build_report<Tz: TimeZone>(input: &ForecastInput, tz: &Tz) -> ForecastReport
where
    Tz::Offset: std::fmt::Display,
{
    let current = input.current.as_ref();

    let hourly = hourly_forecast(&input.samples, tz);
    let buckets = bucket_days(input.captured_at, current, &input.samples, tz);
    tracing::debug!(
        samples = input.samples.len(),
        days = buckets.len(),
        "bucketed forecast samples"
    );
    let daily = compact_days(buckets);

    ForecastReport {
        city: None,
        current: current.map(|reading| PeriodSample::project(reading, tz)),
        hourly_forecast: hourly,
        daily_forecast: daily,
    }
}
