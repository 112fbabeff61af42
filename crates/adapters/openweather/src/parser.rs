//! Forecast payload parser.
//!
//! The 5-day forecast endpoint answers with a `list` of 3-hour periods,
//! soonest first. Each period carries a `weather` array whose first item is
//! the primary condition:
//!
//! ```json
//! {"list": [{"dt": 1700000000, "weather": [{"main": "Rain", "description": "light rain"}]}]}
//! ```

use serde::Deserialize;
use weatherhue_domain::forecast::Forecast;
use weatherhue_domain::time::from_unix_seconds;

use crate::error::PayloadParseError;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    #[serde(default)]
    dt: Option<i64>,
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pick the first period's primary condition from a forecast body.
///
/// # Errors
///
/// Returns a [`PayloadParseError`] if the body is not a forecast, or if the
/// first period or its condition is missing.
pub fn parse_forecast(body: &[u8]) -> Result<Forecast, PayloadParseError> {
    let response: ForecastResponse = serde_json::from_slice(body)?;
    let entry = response
        .list
        .into_iter()
        .next()
        .ok_or(PayloadParseError::EmptyForecast)?;
    let valid_at = entry.dt.and_then(from_unix_seconds);
    let condition = entry
        .weather
        .into_iter()
        .next()
        .ok_or(PayloadParseError::NoCondition)?;

    let forecast = Forecast::new(condition.main, condition.description);
    Ok(match valid_at {
        Some(ts) => forecast.with_valid_at(ts),
        None => forecast,
    })
}

/// Extract the `message` of an API error body, falling back to the raw text.
#[must_use]
pub fn parse_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body).map_or_else(
        |_| String::from_utf8_lossy(body).trim().to_string(),
        |err| err.message,
    )
}
