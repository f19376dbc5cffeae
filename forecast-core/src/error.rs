use reqwest::StatusCode;
use thiserror::Error;

/// Failure raised by a [`JsonTransport`](crate::JsonTransport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors surfaced by [`ForecastService`](crate::ForecastService).
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Target date lies outside the forecast window. Raised before any request.
    #[error("Invalid datetime")]
    InvalidDatetime,

    #[error("City not found ({0})")]
    CityNotFound(String),

    /// The location has no forecast list, or no entry for the requested day.
    #[error("{}", not_found_message(.city, .date))]
    ForecastNotFoundForCity { city: String, date: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ForecastError {
    pub(crate) fn forecast_not_found(city: &str) -> Self {
        Self::ForecastNotFoundForCity { city: city.to_owned(), date: None }
    }

    pub(crate) fn forecast_not_found_on(city: &str, date: &str) -> Self {
        Self::ForecastNotFoundForCity { city: city.to_owned(), date: Some(date.to_owned()) }
    }
}

fn not_found_message(city: &str, date: &Option<String>) -> String {
    match date {
        Some(date) => format!("Forecast not found for city: {city} and date: {date}"),
        None => format!("Forecast not found for city: {city}"),
    }
}
