use clap::{Parser, Subcommand};
use forecast_core::{
    Config, DEFAULT_HORIZON_DAYS, DailySummary, fetch_daily_forecast, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Daily forecast summaries for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show the aggregated daily forecast for a city.
    Show {
        /// City name, e.g. "London" or "Kyiv,UA".
        city: String,

        /// Number of days to summarize; falls back to the configured
        /// default, then 5.
        #[arg(long)]
        days: Option<usize>,

        /// Print the summaries as a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, days, json } => show(&city, days, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: &str, days: Option<usize>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let horizon = days
        .or(config.horizon_days)
        .unwrap_or(DEFAULT_HORIZON_DAYS);

    let summaries = fetch_daily_forecast(provider.as_ref(), city, horizon).await?;

    if json {
        println!("{}", serde_json::to_string(&summaries)?);
    } else {
        print_table(city, &summaries);
    }

    Ok(())
}

fn print_table(city: &str, summaries: &[DailySummary]) {
    if summaries.is_empty() {
        println!("No forecast data available for {city}.");
        return;
    }

    println!("Forecast for {city}:");
    for day in summaries {
        println!(
            "{}  {:>5.1} .. {:<5.1} C  humidity {:>5.1}%  pressure {:>6.1} hPa  wind {:>4.1} m/s  {}",
            day.date.format("%a %Y-%m-%d"),
            day.min_temp,
            day.max_temp,
            day.avg_humidity,
            day.avg_pressure,
            day.avg_wind_speed,
            day.condition
        );
    }
}
