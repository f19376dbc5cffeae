//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Date-window validation against an injectable clock
//! - The JSON transport seam and its HTTP implementation
//! - [`ForecastService`]: city search, forecast lookup and day matching
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod clock;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod transport;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{ForecastError, TransportError};
pub use forecast::ForecastService;
pub use model::{DailyForecast, ForecastQuery, LocationId};
pub use transport::{HttpTransport, JsonTransport};
pub use window::{ForecastWindow, MAX_FORECAST_DAYS, validate_date};
