//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The raw feed parser (provider samples -> typed observations)
//! - The daily aggregator (observations -> per-day summaries)
//! - Abstraction over the forecast provider
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod feed;
pub mod model;
pub mod provider;

pub use aggregate::{DEFAULT_HORIZON_DAYS, aggregate_forecast};
pub use config::Config;
pub use feed::{ForecastFeed, ParseError, ParseMode, ParsedFeed, parse_feed};
pub use model::{DailySummary, Observation};
pub use provider::{ForecastProvider, fetch_daily_forecast, provider_from_config};
