use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone)]
pub struct ForecastQuery {
    /// A blank name is rejected as an unknown city without any request.
    pub city_name: String,
    /// `None` means today.
    pub target_date: Option<DateTime<Utc>>,
}

impl ForecastQuery {
    pub fn new(city_name: impl Into<String>, target_date: Option<DateTime<Utc>>) -> Self {
        Self { city_name: city_name.into(), target_date }
    }
}

/// Provider key for a place (the `woeid`). Kept as text; numeric ids are
/// rendered without decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationId(String);

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts a JSON number or string, anything else is not an id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) => Some(Self(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a location's consolidated forecast list, exactly as the
/// provider sent it. Serializes back to the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyForecast(Map<String, Value>);

impl DailyForecast {
    const APPLICABLE_DATE: &'static str = "applicable_date";
    const WEATHER_STATE_NAME: &'static str = "weather_state_name";
    const WIND_SPEED: &'static str = "wind_speed";

    /// `None` unless `value` is a JSON object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Day the entry describes, "YYYY-MM-DD".
    pub fn applicable_date(&self) -> Option<&str> {
        self.0.get(Self::APPLICABLE_DATE).and_then(Value::as_str)
    }

    /// Missing, `null` or non-string values are absent; `""` is kept.
    pub fn weather_state_name(&self) -> Option<&str> {
        self.0.get(Self::WEATHER_STATE_NAME).and_then(Value::as_str)
    }

    /// Missing, `null` or non-numeric values are absent; `0.0` is kept.
    pub fn wind_speed(&self) -> Option<f64> {
        self.0.get(Self::WIND_SPEED).and_then(Value::as_f64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}
