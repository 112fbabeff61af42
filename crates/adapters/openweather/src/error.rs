//! OpenWeatherMap adapter error types.

use weatherhue_domain::error::WeatherHueError;

/// Errors specific to the OpenWeatherMap adapter.
#[derive(Debug, thiserror::Error)]
pub enum OpenWeatherError {
    /// The HTTP request could not be sent or its body not read.
    #[error("forecast request failed")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("forecast API answered {status}: {message}")]
    Status {
        /// HTTP status returned by the API.
        status: reqwest::StatusCode,
        /// The API's error message, or the raw body when it has none.
        message: String,
    },

    /// The response body could not be turned into a forecast.
    #[error("failed to parse forecast payload")]
    PayloadParse(#[from] PayloadParseError),
}

/// Details about why a forecast payload could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum PayloadParseError {
    /// The body is not JSON of the expected shape.
    #[error("malformed forecast JSON")]
    Json(#[from] serde_json::Error),

    /// The `list` array has no entries.
    #[error("forecast list is empty")]
    EmptyForecast,

    /// The first forecast entry has an empty `weather` array.
    #[error("first forecast entry has no weather condition")]
    NoCondition,
}

impl OpenWeatherError {
    /// Convert into the domain error matching the failure class.
    #[must_use]
    pub fn into_domain(self) -> WeatherHueError {
        match self {
            err @ (Self::Request(_) | Self::Status { .. }) => WeatherHueError::Network(Box::new(err)),
            err @ Self::PayloadParse(_) => WeatherHueError::Parse(Box::new(err)),
        }
    }
}

impl From<OpenWeatherError> for WeatherHueError {
    fn from(err: OpenWeatherError) -> Self {
        err.into_domain()
    }
}
