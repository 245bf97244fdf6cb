//! Raw forecast feed types and normalization into [`Observation`]s.
//!
//! The feed mirrors the OpenWeather 5-day/3-hour forecast payload. Every
//! per-entry field is optional at the wire level; normalization decides which
//! absences are fatal (temperature, humidity, pressure, timestamp) and which
//! get a default (wind speed, condition).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::model::Observation;

/// Condition label used when the provider omits the weather block.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Raw 5-day forecast feed as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastFeed {
    #[serde(default)]
    pub list: Vec<FeedEntry>,
    pub city: Option<FeedCity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedCity {
    pub name: String,
    pub country: String,
    /// UTC offset of the city, in seconds.
    pub timezone: Option<i32>,
}

/// One timestamped sample in the raw feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    /// Unix timestamp of the sample.
    pub dt: Option<i64>,
    pub main: Option<FeedMain>,
    pub wind: Option<FeedWind>,
    #[serde(default)]
    pub weather: Vec<FeedCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedMain {
    pub temp: Option<f64>,
    pub humidity: Option<u8>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedWind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedCondition {
    pub main: String,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed observation at feed index {index}: {reason}")]
    MalformedObservation { index: usize, reason: String },
}

/// How to treat malformed feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Any malformed entry fails the whole parse. A silently dropped sample
    /// would corrupt that day's averages undetected, so this is the default.
    #[default]
    Strict,
    /// Malformed entries are skipped and counted; valid entries still parse.
    BestEffort,
}

/// Result of parsing a feed.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    /// Normalized observations, in feed order.
    pub observations: Vec<Observation>,
    /// Entries dropped as malformed; always 0 in strict mode.
    pub skipped: usize,
}

/// Normalize a raw feed into typed observations, preserving feed order.
///
/// An empty feed yields an empty observation list, not an error.
pub fn parse_feed(feed: &ForecastFeed, mode: ParseMode) -> Result<ParsedFeed, ParseError> {
    let mut parsed = ParsedFeed::default();

    for (index, entry) in feed.list.iter().enumerate() {
        match normalize_entry(index, entry) {
            Ok(observation) => parsed.observations.push(observation),
            Err(err) => match mode {
                ParseMode::Strict => return Err(err),
                ParseMode::BestEffort => parsed.skipped += 1,
            },
        }
    }

    Ok(parsed)
}

fn normalize_entry(index: usize, entry: &FeedEntry) -> Result<Observation, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedObservation {
        index,
        reason: reason.to_string(),
    };

    let dt = entry.dt.ok_or_else(|| malformed("missing timestamp"))?;
    let timestamp: DateTime<Utc> =
        DateTime::from_timestamp(dt, 0).ok_or_else(|| malformed("timestamp out of range"))?;

    let main = entry
        .main
        .as_ref()
        .ok_or_else(|| malformed("missing main measurement block"))?;
    let temperature_c = main.temp.ok_or_else(|| malformed("missing temperature"))?;
    let humidity_pct = main.humidity.ok_or_else(|| malformed("missing humidity"))?;
    let pressure_hpa = main.pressure.ok_or_else(|| malformed("missing pressure"))?;

    // Optional fields default instead of erroring; their absence is normal
    // provider behavior, not corruption.
    let wind_speed_mps = entry.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0);
    let condition = entry
        .weather
        .first()
        .map(|w| w.main.clone())
        .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

    Ok(Observation {
        timestamp,
        temperature_c,
        humidity_pct,
        pressure_hpa,
        wind_speed_mps,
        condition,
    })
}
