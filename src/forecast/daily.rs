//! Daily bucketing: group samples by local day and pick one per period.
//!
//! Each local calendar day gets a [`DayBucket`] with four period slots. A
//! sample lands in its home period when it is closer to the period's target
//! hour than the current occupant (ties keep the occupant). Independently, a
//! sample also fills any still-empty slot whose widened window contains its
//! hour, so short-horizon days still get coverage.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};

use super::{Period, PeriodSample};
use crate::data::RawSample;

/// Day buckets keyed by local calendar date
pub type DayBuckets = HashMap<NaiveDate, DayBucket>;

/// A slot occupant with the local hour it was taken from
#[derive(Debug, Clone, PartialEq)]
struct Slot {
    sample: PeriodSample,
    source_hour: u32,
}

/// Accumulator for one local calendar day
#[derive(Debug, Clone)]
pub struct DayBucket {
    /// Local calendar date
    pub date: NaiveDate,
    /// Display label, e.g. "Monday, 15 July"
    pub label: String,
    slots: [Option<Slot>; 4],
}

impl DayBucket {
    /// Creates a bucket with all four slots empty
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            label: day_label(date),
            slots: Default::default(),
        }
    }

    /// Current occupant of `period`
    pub fn get(&self, period: Period) -> Option<&PeriodSample> {
        self.slots[period.index()].as_ref().map(|slot| &slot.sample)
    }

    /// Local hour the occupant of `period` came from
    pub fn source_hour(&self, period: Period) -> Option<u32> {
        self.slots[period.index()].as_ref().map(|slot| slot.source_hour)
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Occupy `period` unconditionally.
    fn seed(&mut self, period: Period, sample: PeriodSample, source_hour: u32) {
        self.slots[period.index()] = Some(Slot {
            sample,
            source_hour,
        });
    }

    /// Nearest-to-target rule. Returns true if the candidate took the slot.
    fn offer(&mut self, period: Period, sample: &PeriodSample, hour: u32) -> bool {
        let closer = match &self.slots[period.index()] {
            None => true,
            Some(existing) => period.distance(hour) < period.distance(existing.source_hour),
        };
        if closer {
            self.seed(period, sample.clone(), hour);
        }
        closer
    }

    /// Widened-window rule: fill `period` only if it is still empty.
    fn fill_gap(&mut self, period: Period, sample: &PeriodSample, hour: u32) -> bool {
        if self.slots[period.index()].is_some() || !period.in_fallback_window(hour) {
            return false;
        }
        self.seed(period, sample.clone(), hour);
        true
    }

    /// Drops the source-hour bookkeeping, leaving the four slots in period order
    pub(crate) fn into_slots(self) -> [Option<PeriodSample>; 4] {
        self.slots.map(|slot| slot.map(|slot| slot.sample))
    }
}

/// Display label for a local date
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A, %-d %B").to_string()
}

/// Partition the current reading and the forecast samples into local days.
///
/// Today's bucket always exists, even when the feed starts tomorrow. It is
/// anchored at the current reading's own timestamp, or at `today` when there
/// is no reading. The reading is placed in its home period of that bucket
/// before any forecast sample is looked at.
pub fn bucket_days<Tz: TimeZone>(
    today: DateTime<Utc>,
    current: Option<&RawSample>,
    samples: &[RawSample],
    tz: &Tz,
) -> DayBuckets
where
    Tz::Offset: std::fmt::Display,
{
    let mut buckets = DayBuckets::new();

    let anchor = current.map_or(today, |reading| reading.timestamp);
    let today_local = anchor.with_timezone(tz);
    let today_bucket = buckets
        .entry(today_local.date_naive())
        .or_insert_with(|| DayBucket::new(today_local.date_naive()));

    if let Some(current) = current {
        let hour = today_local.hour();
        let period = Period::for_hour(hour);
        tracing::debug!(hour, period = period.label(), "seeding today with current reading");
        today_bucket.seed(period, PeriodSample::project_at(current, &today_local), hour);
    }

    for sample in samples {
        let local = sample.timestamp.with_timezone(tz);
        let date = local.date_naive();
        let hour = local.hour();
        let projected = PeriodSample::project_at(sample, &local);

        let bucket = buckets.entry(date).or_insert_with(|| DayBucket::new(date));

        let home = Period::for_hour(hour);
        let had_occupant = bucket.get(home).is_some();
        if bucket.offer(home, &projected, hour) && had_occupant {
            tracing::debug!(%date, hour, period = home.label(), "replaced with closer sample");
        }

        for period in Period::ALL {
            if bucket.fill_gap(period, &projected, hour) {
                tracing::debug!(%date, hour, period = period.label(), "filled gap from widened window");
            }
        }

        tracing::trace!(%date, hour, period = home.label(), "bucketed sample");
    }

    buckets
}
