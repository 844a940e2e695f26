//! Day periods and their hour windows.

use serde::Serialize;

/// One of the four fixed six-hour windows of a local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 06:00-12:00
    Morning,
    /// 12:00-18:00
    Day,
    /// 18:00-24:00
    Evening,
    /// 00:00-06:00
    Night,
}

impl Period {
    /// All periods in display order.
    pub const ALL: [Period; 4] = [Period::Morning, Period::Day, Period::Evening, Period::Night];

    /// Home period of a local hour (0-23), using half-open ranges.
    pub fn for_hour(hour: u32) -> Period {
        match hour {
            6..=11 => Period::Morning,
            12..=17 => Period::Day,
            18..=23 => Period::Evening,
            _ => Period::Night,
        }
    }

    /// Representative hour that candidates are measured against.
    pub fn target_hour(&self) -> u32 {
        match self {
            Period::Morning => 9,
            Period::Day => 15,
            Period::Evening => 21,
            Period::Night => 3,
        }
    }

    /// Whether `hour` lies in the widened gap-fill window of this period.
    ///
    /// The windows overlap the neighbouring periods by an hour or so, so that
    /// a 3-hour grid still lands at least one sample in each of them.
    pub fn in_fallback_window(&self, hour: u32) -> bool {
        match self {
            Period::Morning => (5..13).contains(&hour),
            Period::Day => (11..19).contains(&hour),
            Period::Evening => (17..23).contains(&hour),
            Period::Night => hour < 6 || hour >= 23,
        }
    }

    /// Distance of `hour` from this period's target hour.
    pub fn distance(&self, hour: u32) -> u32 {
        hour.abs_diff(self.target_hour())
    }

    /// Slot index inside a day bucket.
    pub(crate) fn index(&self) -> usize {
        match self {
            Period::Morning => 0,
            Period::Day => 1,
            Period::Evening => 2,
            Period::Night => 3,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Day => "Day",
            Period::Evening => "Evening",
            Period::Night => "Night",
        }
    }
}
