//! Rolling next-24-hour view.

use chrono::TimeZone;

use super::PeriodSample;
use crate::data::RawSample;

/// Number of leading forecast slots in the hourly view (8 x 3h = 24h)
pub const HOURLY_SLOTS: usize = 8;

/// Project the first [`HOURLY_SLOTS`] samples, in feed order.
///
/// No filtering or deduplication: the leading samples win even if they
/// repeat a timestamp.
pub fn hourly_forecast<Tz: TimeZone>(samples: &[RawSample], tz: &Tz) -> Vec<PeriodSample>
where
    Tz::Offset: std::fmt::Display,
{
    samples
        .iter()
        .take(HOURLY_SLOTS)
        .map(|sample| PeriodSample::project(sample, tz))
        .collect()
}
