use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    error::{ForecastError, TransportError},
    model::{DailyForecast, ForecastQuery, LocationId},
    transport::{HttpTransport, JsonTransport},
    window::{ForecastWindow, day_key, validate_date},
};

/// Field of the location detail response holding the per-day forecasts.
const FORECAST_LIST_FIELD: &str = "consolidated_weather";
/// Field of a search result holding the location id.
const LOCATION_ID_FIELD: &str = "woeid";

/// Looks up one day's forecast for a city.
///
/// Every call runs independently: validate the date, search the city, fetch
/// the location's forecast list, pick the entry for the requested day. The
/// service holds no per-call state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct ForecastService {
    transport: Arc<dyn JsonTransport>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl ForecastService {
    pub fn new(transport: Arc<dyn JsonTransport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { transport, clock: Arc::new(SystemClock), base_url }
    }

    /// HTTP-backed service using the configured API root and timeout.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::with_timeout(config.timeout())?;
        Ok(Self::new(Arc::new(transport), config.base_url()))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dates currently accepted by [`predict`](Self::predict).
    pub fn forecast_window(&self) -> Option<ForecastWindow> {
        ForecastWindow::starting_at(self.clock.now())
    }

    /// Forecast entry for `city_name` on `date` (today when `None`).
    ///
    /// Fails with [`ForecastError::InvalidDatetime`] without touching the
    /// network when the date is out of range.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn predict(
        &self,
        city_name: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<DailyForecast, ForecastError> {
        let date = validate_date(self.clock.now(), date)?;
        let day = day_key(date);

        if city_name.trim().is_empty() {
            return Err(ForecastError::CityNotFound(city_name.to_owned()));
        }

        let location = self.resolve_location(city_name).await?;
        let entries = self.fetch_forecasts(city_name, &location).await?;

        select_day(entries, &day)
            .ok_or_else(|| ForecastError::forecast_not_found_on(city_name, &day))
    }

    pub async fn predict_query(
        &self,
        query: &ForecastQuery,
    ) -> Result<DailyForecast, ForecastError> {
        self.predict(&query.city_name, query.target_date).await
    }

    /// Weather state name ("Light Cloud", ...) of the matched entry, if the
    /// provider sent one.
    pub async fn predict_weather(
        &self,
        city_name: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<String>, ForecastError> {
        let forecast = self.predict(city_name, date).await?;
        Ok(forecast.weather_state_name().map(str::to_owned))
    }

    /// Wind speed of the matched entry, if the provider sent one. A reported
    /// speed of `0.0` is `Some(0.0)`.
    pub async fn predict_wind(
        &self,
        city_name: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<f64>, ForecastError> {
        Ok(self.predict(city_name, date).await?.wind_speed())
    }

    /// Id of the first search result for `city_name`. Further matches are ignored.
    async fn resolve_location(&self, city_name: &str) -> Result<LocationId, ForecastError> {
        let url = self.search_url(city_name)?;
        let response = self.transport.fetch_json(url.as_str()).await?;

        let location = response
            .as_array()
            .and_then(|matches| matches.first())
            .and_then(|first| first.get(LOCATION_ID_FIELD))
            .and_then(LocationId::from_json)
            .ok_or_else(|| ForecastError::CityNotFound(city_name.to_owned()))?;

        debug!(city = city_name, %location, "resolved location");
        Ok(location)
    }

    /// The location's forecast entries, unparsed and in provider order.
    async fn fetch_forecasts(
        &self,
        city_name: &str,
        location: &LocationId,
    ) -> Result<Vec<Value>, ForecastError> {
        let url = self.location_url(location)?;
        let response = self.transport.fetch_json(url.as_str()).await?;

        let list = match response {
            Value::Object(mut body) => body.remove(FORECAST_LIST_FIELD),
            _ => None,
        };

        match list {
            Some(Value::Array(entries)) => Ok(entries),
            Some(_) => {
                warn!(%location, "{FORECAST_LIST_FIELD} is not a list");
                Err(ForecastError::forecast_not_found(city_name))
            }
            None => {
                warn!(%location, "location response has no {FORECAST_LIST_FIELD}");
                Err(ForecastError::forecast_not_found(city_name))
            }
        }
    }

    fn search_url(&self, city_name: &str) -> Result<Url, TransportError> {
        let endpoint = format!("{}/location/search/", self.base_url);
        Ok(Url::parse_with_params(&endpoint, &[("query", city_name)])?)
    }

    fn location_url(&self, location: &LocationId) -> Result<Url, TransportError> {
        Ok(Url::parse(&format!("{}/location/{location}", self.base_url))?)
    }
}

/// First entry whose `applicable_date` is `day`. Entries that are not
/// objects or carry no date string are skipped.
fn select_day(entries: Vec<Value>, day: &str) -> Option<DailyForecast> {
    entries.into_iter().enumerate().find_map(|(index, entry)| {
        let Some(forecast) = DailyForecast::from_json(entry) else {
            warn!(index, "skipping forecast entry that is not an object");
            return None;
        };

        match forecast.applicable_date().map(|date| date == day) {
            Some(true) => Some(forecast),
            Some(false) => None,
            None => {
                warn!(index, "skipping forecast entry without applicable_date");
                None
            }
        }
    })
}
