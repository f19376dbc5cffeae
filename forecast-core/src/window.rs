use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::ForecastError;

/// How many days past today a forecast may be requested for.
pub const MAX_FORECAST_DAYS: u64 = 5;

/// Inclusive range of instants a forecast may be requested for:
/// today at 00:00:00 through today + [`MAX_FORECAST_DAYS`] at 23:59:59 (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ForecastWindow {
    /// Window relative to the calendar day of `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Option<Self> {
        let today = now.date_naive();
        let start = today.and_hms_opt(0, 0, 0)?.and_utc();
        let end = today
            .checked_add_days(Days::new(MAX_FORECAST_DAYS))?
            .and_hms_opt(23, 59, 59)?
            .and_utc();

        Some(Self { start, end })
    }

    pub fn contains(&self, when: DateTime<Utc>) -> bool {
        self.start <= when && when <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

/// Check a requested date against the window around `now`.
///
/// `None` means "today" and yields `now` itself. A present date is returned
/// unchanged when it falls inside the window.
pub fn validate_date(
    now: DateTime<Utc>,
    date: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, ForecastError> {
    let Some(date) = date else {
        return Ok(now);
    };

    let window = ForecastWindow::starting_at(now).ok_or(ForecastError::InvalidDatetime)?;
    if window.contains(date) {
        Ok(date)
    } else {
        Err(ForecastError::InvalidDatetime)
    }
}

/// Day-precision key used to match provider entries, e.g. "2018-07-06".
pub fn day_key(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
