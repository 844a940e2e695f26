//! Day normalizer: fill empty periods from their neighbours and emit the first days.

use serde::Serialize;

use super::{DayBuckets, PeriodSample};

/// Number of days in the daily view
pub const DAILY_DAYS: usize = 5;

/// Public view of one day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Localized day label
    pub date_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning: Option<PeriodSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<PeriodSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evening: Option<PeriodSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night: Option<PeriodSample>,
}

impl DailyForecast {
    /// Build a day view from its label and slots in period order, propagating
    /// neighbours into empty slots.
    pub(crate) fn from_slots(date_string: String, slots: [Option<PeriodSample>; 4]) -> Self {
        let [morning, day, evening, night] = slots;
        let mut forecast = Self {
            date_string,
            morning,
            day,
            evening,
            night,
        };
        forecast.propagate();
        forecast
    }

    /// One ordered pass: morning <- day; day <- morning | evening;
    /// evening <- day | night; night <- evening.
    fn propagate(&mut self) {
        if self.morning.is_none() {
            self.morning = self.day.clone();
        }
        if self.day.is_none() {
            self.day = self.morning.clone().or_else(|| self.evening.clone());
        }
        if self.evening.is_none() {
            self.evening = self.day.clone().or_else(|| self.night.clone());
        }
        if self.night.is_none() {
            self.night = self.evening.clone();
        }
    }
}

/// Sort buckets by date, normalize each, and keep the first [`DAILY_DAYS`].
pub fn compact_days(buckets: DayBuckets) -> Vec<DailyForecast> {
    let mut days: Vec<_> = buckets.into_values().collect();
    days.sort_by_key(|bucket| bucket.date);

    days.into_iter()
        .take(DAILY_DAYS)
        .map(|bucket| {
            let label = bucket.label.clone();
            DailyForecast::from_slots(label, bucket.into_slots())
        })
        .collect()
}
