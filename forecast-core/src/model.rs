use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One provider sample at a specific instant, normalized from the raw feed.
///
/// Immutable once constructed; owned by the parse step that produced it and
/// moved by value into the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub condition: String,
}

/// The reduction of one calendar day's observations.
///
/// Serializes with the camelCase field names (`minTemp`, `avgWindSpeed`, ...)
/// that existing consumers of the forecast JSON expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub avg_wind_speed: f64,
    pub condition: String,
}
