//! Daily aggregation: bucket observations by local calendar date and reduce
//! each bucket to one [`DailySummary`].

use std::collections::{BTreeMap, HashMap};

use chrono::{FixedOffset, NaiveDate};

use crate::feed::UNKNOWN_CONDITION;
use crate::model::{DailySummary, Observation};

/// Default number of daily summaries to return.
pub const DEFAULT_HORIZON_DAYS: usize = 5;

/// Group observations by calendar date in `zone`, reduce each day, and return
/// at most `horizon` summaries in ascending date order.
///
/// Days are created lazily, so every summary covers at least one observation
/// and `min_temp <= max_temp` always holds. An empty input yields an empty
/// output. Fewer than `horizon` distinct dates is not an error; all of them
/// are returned.
pub fn aggregate_forecast(
    observations: Vec<Observation>,
    horizon: usize,
    zone: FixedOffset,
) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Observation>> = BTreeMap::new();
    for observation in observations {
        let date = observation.timestamp.with_timezone(&zone).date_naive();
        buckets.entry(date).or_default().push(observation);
    }

    // BTreeMap iterates keys in ascending order; the horizon takes the
    // earliest dates.
    buckets
        .into_iter()
        .take(horizon)
        .map(|(date, bucket)| reduce_day(date, &bucket))
        .collect()
}

fn reduce_day(date: NaiveDate, bucket: &[Observation]) -> DailySummary {
    let count = bucket.len() as f64;

    let mut min_temp = f64::INFINITY;
    let mut max_temp = f64::NEG_INFINITY;
    let mut humidity_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut wind_sum = 0.0;

    for observation in bucket {
        min_temp = min_temp.min(observation.temperature_c);
        max_temp = max_temp.max(observation.temperature_c);
        humidity_sum += f64::from(observation.humidity_pct);
        pressure_sum += observation.pressure_hpa;
        wind_sum += observation.wind_speed_mps;
    }

    DailySummary {
        date,
        min_temp,
        max_temp,
        avg_humidity: humidity_sum / count,
        avg_pressure: pressure_sum / count,
        avg_wind_speed: wind_sum / count,
        condition: dominant_condition(bucket),
    }
}

/// Most frequent condition label in the bucket.
///
/// Ties go to the label that appears first in feed order, so the same input
/// always produces the same winner regardless of map iteration order.
fn dominant_condition(bucket: &[Observation]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for observation in bucket {
        *counts.entry(observation.condition.as_str()).or_insert(0) += 1;
    }

    let best = counts.values().copied().max().unwrap_or(0);

    bucket
        .iter()
        .map(|observation| observation.condition.as_str())
        .find(|label| counts[label] == best)
        .unwrap_or(UNKNOWN_CONDITION)
        .to_string()
}
