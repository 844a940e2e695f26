//! Provider feed decoder
//!
//! This module parses the provider's already-fetched current-conditions and
//! 3-hour forecast JSON documents into our RawSample structures.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use thiserror::Error;

use super::{Condition, RawSample};

/// Path value that means "read from standard input"
pub const STDIN_SOURCE: &str = "-";

/// Errors that can occur when decoding a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// Reading the feed source failed
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON document
    #[error("Failed to parse JSON document: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The provider answered with an error document instead of data
    #[error("Provider returned error {code}: {message}")]
    Provider { code: String, message: String },

    /// Missing expected field in document
    #[error("Missing expected field in document: {0}")]
    MissingField(String),

    /// Epoch timestamp outside the representable range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// UTC offset outside +/- 24 hours
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),
}

/// Decoded current-conditions document
#[derive(Debug, Clone)]
pub struct CurrentFeed {
    /// City name reported by the provider
    pub city: Option<String>,
    /// UTC offset of the city, if reported
    pub utc_offset: Option<FixedOffset>,
    /// The "now" reading
    pub reading: RawSample,
}

/// Decoded forecast document
#[derive(Debug, Clone)]
pub struct ForecastFeed {
    /// City name reported by the provider
    pub city: Option<String>,
    /// UTC offset of the city, if reported
    pub utc_offset: Option<FixedOffset>,
    /// Forecast samples in feed order
    pub samples: Vec<RawSample>,
}

impl CurrentFeed {
    /// Parse a current-conditions JSON document
    ///
    /// # Returns
    /// * `Ok(CurrentFeed)` - The decoded reading
    /// * `Err(FeedError)` - If the document is malformed or is a provider error
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        check_status(text)?;
        let document: CurrentDocument = serde_json::from_str(text)?;

        Ok(Self {
            city: document.name,
            utc_offset: document.timezone.map(parse_offset).transpose()?,
            reading: document.sample.into_raw()?,
        })
    }

    /// Read and parse a current-conditions document from a file, or stdin for `-`
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        Self::from_json(&read_source(path)?)
    }
}

impl ForecastFeed {
    /// Parse a forecast JSON document
    ///
    /// # Returns
    /// * `Ok(ForecastFeed)` - Samples in the order the provider listed them
    /// * `Err(FeedError)` - If the document is malformed or is a provider error
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        check_status(text)?;
        let document: ForecastDocument = serde_json::from_str(text)?;
        let city = document.city.unwrap_or_default();

        let samples = document
            .list
            .into_iter()
            .map(ProviderSample::into_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            city: city.name,
            utc_offset: city.timezone.map(parse_offset).transpose()?,
            samples,
        })
    }

    /// Read and parse a forecast document from a file, or stdin for `-`
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        Self::from_json(&read_source(path)?)
    }
}

/// Read a whole feed document from `path`, treating `-` as standard input
pub fn read_source(path: &Path) -> Result<String, FeedError> {
    if path.as_os_str() == STDIN_SOURCE {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Reject provider error documents (`cod` other than 200)
fn check_status(text: &str) -> Result<(), FeedError> {
    let status: ProviderStatus = serde_json::from_str(text)?;

    let code = match status.cod {
        None => return Ok(()),
        Some(serde_json::Value::String(code)) => code,
        Some(other) => other.to_string(),
    };

    if code == "200" {
        return Ok(());
    }

    let message = match status.message {
        Some(serde_json::Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Err(FeedError::Provider { code, message })
}

fn parse_offset(seconds: i32) -> Result<FixedOffset, FeedError> {
    FixedOffset::east_opt(seconds).ok_or(FeedError::InvalidOffset(seconds))
}

/// Status envelope shared by every provider document
#[derive(Debug, Deserialize)]
struct ProviderStatus {
    #[serde(default)]
    cod: Option<serde_json::Value>,
    // The forecast endpoint reports a numeric `message` on success
    #[serde(default)]
    message: Option<serde_json::Value>,
}

/// Current-conditions document from the provider
#[derive(Debug, Deserialize)]
struct CurrentDocument {
    #[serde(flatten)]
    sample: ProviderSample,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    timezone: Option<i32>,
}

/// Forecast document from the provider
#[derive(Debug, Deserialize)]
struct ForecastDocument {
    list: Vec<ProviderSample>,
    #[serde(default)]
    city: Option<CityBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct CityBlock {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    timezone: Option<i32>,
}

/// One reading as the provider lays it out
#[derive(Debug, Deserialize)]
struct ProviderSample {
    dt: i64,
    main: MainBlock,
    weather: Vec<WeatherBlock>,
    #[serde(default)]
    wind: Option<WindBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
}

impl ProviderSample {
    fn into_raw(self) -> Result<RawSample, FeedError> {
        let timestamp =
            DateTime::from_timestamp(self.dt, 0).ok_or(FeedError::InvalidTimestamp(self.dt))?;

        // Only the primary condition is used
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::MissingField("weather".to_string()))?;

        Ok(RawSample {
            timestamp,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.map_or(0.0, |wind| wind.speed),
            pressure: self.main.pressure,
            condition: Condition::from_code(&weather.main),
            description: weather.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    /// Sample valid current-conditions document
    const VALID_CURRENT: &str = r#"{
        "coord": {"lon": 37.62, "lat": 55.75},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {
            "temp": 14.62,
            "feels_like": 13.91,
            "temp_min": 13.0,
            "temp_max": 15.9,
            "pressure": 1017,
            "humidity": 71
        },
        "visibility": 10000,
        "wind": {"speed": 3.46, "deg": 240},
        "clouds": {"all": 75},
        "dt": 1721044800,
        "sys": {"country": "RU", "sunrise": 1720999800, "sunset": 1721060400},
        "timezone": 10800,
        "id": 524901,
        "name": "Moscow",
        "cod": 200
    }"#;

    /// Sample valid forecast document with three slots
    const VALID_FORECAST: &str = r#"{
        "cod": "200",
        "message": 0,
        "cnt": 3,
        "list": [
            {
                "dt": 1721055600,
                "main": {"temp": 16.4, "feels_like": 15.8, "pressure": 1016, "humidity": 64},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "wind": {"speed": 4.12, "deg": 250},
                "dt_txt": "2024-07-15 15:00:00"
            },
            {
                "dt": 1721066400,
                "main": {"temp": 13.9, "feels_like": 13.2, "pressure": 1017, "humidity": 78},
                "weather": [{"id": 701, "main": "Mist", "description": "mist", "icon": "50n"}],
                "wind": {"speed": 2.0, "deg": 230},
                "dt_txt": "2024-07-15 18:00:00"
            },
            {
                "dt": 1721077200,
                "main": {"temp": 12.1, "feels_like": 11.6, "pressure": 1018, "humidity": 85},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                "dt_txt": "2024-07-15 21:00:00"
            }
        ],
        "city": {"id": 524901, "name": "Moscow", "country": "RU", "timezone": 10800}
    }"#;

    #[test]
    fn test_parse_valid_current() {
        let feed = CurrentFeed::from_json(VALID_CURRENT).expect("Failed to parse current feed");

        assert_eq!(feed.city.as_deref(), Some("Moscow"));
        assert_eq!(feed.utc_offset, FixedOffset::east_opt(10800));

        let reading = feed.reading;
        assert_eq!(reading.timestamp, Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap());
        assert!((reading.temperature - 14.62).abs() < 0.001);
        assert!((reading.feels_like - 13.91).abs() < 0.001);
        assert!((reading.humidity - 71.0).abs() < 0.001);
        assert!((reading.pressure - 1017.0).abs() < 0.001);
        assert!((reading.wind_speed - 3.46).abs() < 0.001);
        assert_eq!(reading.condition, Condition::Clouds);
        assert_eq!(reading.description, "broken clouds");
    }

    #[test]
    fn test_parse_valid_forecast() {
        let feed = ForecastFeed::from_json(VALID_FORECAST).expect("Failed to parse forecast feed");

        assert_eq!(feed.city.as_deref(), Some("Moscow"));
        assert_eq!(feed.utc_offset, FixedOffset::east_opt(10800));
        assert_eq!(feed.samples.len(), 3);

        let first = &feed.samples[0];
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2024, 7, 15, 15, 0, 0).unwrap());
        assert_eq!(first.condition, Condition::Rain);
        assert_eq!(first.description, "light rain");
        assert!((first.wind_speed - 4.12).abs() < 0.001);

        // Atmosphere groups fall back to the default condition
        assert_eq!(feed.samples[1].condition, Condition::Clouds);

        // Missing wind block reads as calm
        assert!(feed.samples[2].wind_speed.abs() < 0.001);
    }

    #[test]
    fn test_forecast_keeps_feed_order() {
        let feed = ForecastFeed::from_json(VALID_FORECAST).expect("Failed to parse forecast feed");

        for pair in feed.samples.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn test_forecast_without_city_block() {
        let document = r#"{
            "list": [{
                "dt": 1721055600,
                "main": {"temp": 16.4, "feels_like": 15.8, "pressure": 1016, "humidity": 64},
                "weather": [{"main": "Snow", "description": "light snow"}]
            }]
        }"#;

        let feed = ForecastFeed::from_json(document).expect("Failed to parse forecast feed");

        assert!(feed.city.is_none());
        assert!(feed.utc_offset.is_none());
        assert_eq!(feed.samples[0].condition, Condition::Snow);
    }

    #[test]
    fn test_provider_error_with_string_code() {
        let document = r#"{"cod": "404", "message": "city not found"}"#;

        match ForecastFeed::from_json(document) {
            Err(FeedError::Provider { code, message }) => {
                assert_eq!(code, "404");
                assert_eq!(message, "city not found");
            }
            other => panic!("Expected Provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_error_with_numeric_code() {
        let document = r#"{"cod": 401, "message": "Invalid API key"}"#;

        match CurrentFeed::from_json(document) {
            Err(FeedError::Provider { code, message }) => {
                assert_eq!(code, "401");
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("Expected Provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = ForecastFeed::from_json("{ invalid json }");
        assert!(matches!(result, Err(FeedError::ParseError(_))));
    }

    #[test]
    fn test_parse_missing_list() {
        let result = ForecastFeed::from_json(r#"{"cod": "200", "city": {"name": "Oslo"}}"#);
        assert!(matches!(result, Err(FeedError::ParseError(_))));
    }

    #[test]
    fn test_parse_empty_weather_array() {
        let document = r#"{
            "dt": 1721044800,
            "main": {"temp": 14.0, "feels_like": 13.0, "pressure": 1017, "humidity": 71},
            "weather": [],
            "wind": {"speed": 1.0}
        }"#;

        match CurrentFeed::from_json(document) {
            Err(FeedError::MissingField(field)) => assert_eq!(field, "weather"),
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_out_of_range_timestamp() {
        let document = r#"{
            "dt": 9223372036854775807,
            "main": {"temp": 14.0, "feels_like": 13.0, "pressure": 1017, "humidity": 71},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        }"#;

        let result = CurrentFeed::from_json(document);
        assert!(matches!(result, Err(FeedError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_parse_invalid_offset() {
        let document = r#"{
            "dt": 1721044800,
            "timezone": 999999,
            "main": {"temp": 14.0, "feels_like": 13.0, "pressure": 1017, "humidity": 71},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        }"#;

        let result = CurrentFeed::from_json(document);
        assert!(matches!(result, Err(FeedError::InvalidOffset(999999))));
    }

    #[test]
    fn test_load_reads_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("forecast.json");
        std::fs::write(&path, VALID_FORECAST).expect("Failed to write fixture");

        let feed = ForecastFeed::load(&path).expect("Failed to load forecast feed");

        assert_eq!(feed.samples.len(), 3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("absent.json");

        let result = CurrentFeed::load(&path);
        assert!(matches!(result, Err(FeedError::Io(_))));
    }
}
