//! # weatherhue-adapter-openweather
//!
//! OpenWeatherMap adapter — implements the `WeatherSource` port on top of
//! the 5-day / 3-hour forecast endpoint.
//!
//! ## How it works
//!
//! Each fetch is a single `GET <base_url>?id=<city_id>&appid=<api_key>&mode=json`.
//! The first period of the returned list is the one coming up next; its
//! first `weather` item gives the condition (`main`) and `description`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `weatherhue-app` and `weatherhue-domain`.

mod config;
mod error;
pub mod parser;

pub use config::{DEFAULT_BASE_URL, OpenWeatherConfig};
pub use error::{OpenWeatherError, PayloadParseError};

use std::time::Duration;

use weatherhue_app::ports::WeatherSource;
use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::forecast::Forecast;

/// Forecast source backed by the OpenWeatherMap HTTP API.
pub struct OpenWeatherSource {
    config: OpenWeatherConfig,
    http: reqwest::Client,
}

impl OpenWeatherSource {
    /// Build a source with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`OpenWeatherError::Request`] if the HTTP client cannot be
    /// initialised (e.g. no TLS backend).
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub fn config(&self) -> &OpenWeatherConfig {
        &self.config
    }

    async fn fetch_forecast(&self) -> Result<Forecast, OpenWeatherError> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("id", self.config.city_id.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("mode", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(OpenWeatherError::Status {
                status,
                message: parser::parse_error_message(&body),
            });
        }

        tracing::debug!(
            city_id = %self.config.city_id,
            body = %String::from_utf8_lossy(&body),
            "got forecast results"
        );
        Ok(parser::parse_forecast(&body)?)
    }
}

impl WeatherSource for OpenWeatherSource {
    fn location(&self) -> &str {
        &self.config.city_id
    }

    async fn fetch(&self) -> Result<Forecast, WeatherHueError> {
        self.fetch_forecast()
            .await
            .map_err(OpenWeatherError::into_domain)
    }
}
