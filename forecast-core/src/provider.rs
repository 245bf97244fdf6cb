use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{FixedOffset, Local};

use crate::{
    Config,
    aggregate::aggregate_forecast,
    feed::{ForecastFeed, ParseMode, parse_feed},
    model::DailySummary,
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Fetches the raw forecast feed for a city.
///
/// Transport, authentication and retries live behind this trait; the core
/// never interprets provider failures beyond passing them through.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str) -> anyhow::Result<ForecastFeed>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `forecast configure` and enter your API key."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}

/// Fetch, parse (strict) and aggregate the forecast for a city.
///
/// Returns at most `horizon` daily summaries in ascending date order.
pub async fn fetch_daily_forecast(
    provider: &dyn ForecastProvider,
    city: &str,
    horizon: usize,
) -> anyhow::Result<Vec<DailySummary>> {
    let feed = provider.fetch_forecast(city).await?;
    let zone = reference_zone(&feed);
    let parsed = parse_feed(&feed, ParseMode::Strict)?;

    Ok(aggregate_forecast(parsed.observations, horizon, zone))
}

/// Day boundaries follow the city's own UTC offset when the provider reports
/// one, otherwise the system-local offset.
fn reference_zone(feed: &ForecastFeed) -> FixedOffset {
    feed.city
        .as_ref()
        .and_then(|city| city.timezone)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| *Local::now().offset())
}
