use anyhow::{Context, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use forecast_core::{Config, DailyForecast, ForecastError, ForecastService};
use inquire::{CustomType, Text};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Daily weather forecast for a city")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API base URL and request timeout.
    Configure,

    /// Show the forecast for a city.
    Show {
        /// City name, e.g. "Madrid".
        city: String,

        /// Day to forecast, `YYYY-MM-DD` or RFC 3339; if absent, means today.
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,

        /// Which part of the forecast to print.
        #[arg(long, value_enum, default_value_t = Detail::Full)]
        detail: Detail,

        /// Override the configured API base URL.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the range of dates a forecast can be requested for.
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Detail {
    Full,
    Weather,
    Wind,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, date, detail, base_url } => {
                let mut config = Config::load()?;
                if let Some(url) = base_url {
                    config.set_base_url(url);
                }

                let service = ForecastService::from_config(&config)
                    .context("Failed to create HTTP client")?;
                info!(base_url = service.base_url(), %city, "looking up forecast");

                let forecast = match service.predict(&city, date).await {
                    Ok(forecast) => forecast,
                    Err(ForecastError::InvalidDatetime) => return Err(invalid_date(&service)),
                    Err(err) => return Err(err.into()),
                };

                println!("{}", render(detail, &forecast)?);
                Ok(())
            }
            Command::Window => {
                let service = ForecastService::from_config(&Config::load()?)?;
                let window = service
                    .forecast_window()
                    .ok_or_else(|| anyhow!("Could not compute forecast window"))?;

                println!("{} .. {}", window.first_day(), window.last_day());
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.set_base_url(base_url);
    config.timeout_secs = Some(timeout_secs);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn invalid_date(service: &ForecastService) -> anyhow::Error {
    match service.forecast_window() {
        Some(window) => anyhow!(
            "{}.\nAllowed range: {} .. {}.",
            ForecastError::InvalidDatetime,
            window.first_day(),
            window.last_day()
        ),
        None => ForecastError::InvalidDatetime.into(),
    }
}

fn render(detail: Detail, forecast: &DailyForecast) -> anyhow::Result<String> {
    let out = match detail {
        Detail::Full => serde_json::to_string_pretty(forecast)
            .context("Failed to serialize forecast")?,
        Detail::Weather => forecast
            .weather_state_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "unknown".to_string()),
        Detail::Wind => forecast
            .wind_speed()
            .map(|speed| speed.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    };
    Ok(out)
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(input: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{input}', expected YYYY-MM-DD or RFC 3339"))?;
    day.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| anyhow!("Invalid date '{input}'"))
}
