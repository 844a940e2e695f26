//! Plain-text rendering of a forecast report for the terminal.

use crate::forecast::{DailyForecast, ForecastReport, Period, PeriodSample};

/// Placeholder printed for a period with no sample
const NO_DATA: &str = "no data";

/// Renders the whole report: header, hourly table, then one block per day.
pub fn render_report(report: &ForecastReport) -> String {
    let mut out = String::new();

    out.push_str(report.city.as_deref().unwrap_or("Forecast"));
    out.push('\n');

    if let Some(current) = &report.current {
        out.push_str(&format!("Now {}\n", sample_line(current)));
    }

    if !report.hourly_forecast.is_empty() {
        out.push_str("\nNext 24 hours\n");
        for entry in &report.hourly_forecast {
            out.push_str(&format!("  {}  {}\n", entry.time, sample_line(entry)));
        }
    }

    for day in &report.daily_forecast {
        out.push('\n');
        out.push_str(&render_day(day));
    }

    out
}

/// Renders one day as a label followed by its four periods
pub fn render_day(day: &DailyForecast) -> String {
    let mut out = format!("{}\n", day.date_string);

    for period in Period::ALL {
        let slot = match period {
            Period::Morning => day.morning.as_ref(),
            Period::Day => day.day.as_ref(),
            Period::Evening => day.evening.as_ref(),
            Period::Night => day.night.as_ref(),
        };
        let line = match slot {
            Some(sample) => format!("{}  {}", sample.time, sample_line(sample)),
            None => NO_DATA.to_string(),
        };
        out.push_str(&format!("  {:<8} {}\n", period.label(), line));
    }

    out
}

fn sample_line(sample: &PeriodSample) -> String {
    format!(
        "{:>4}°C (feels {}°C) {} {}, wind {:.1} m/s, humidity {}%, {} hPa",
        sample.temperature,
        sample.feels_like,
        sample.icon.symbol(),
        sample.description,
        sample.wind_speed,
        sample.humidity,
        sample.pressure
    )
}
