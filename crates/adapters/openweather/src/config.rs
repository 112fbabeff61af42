//! OpenWeatherMap integration configuration.

use serde::Deserialize;

/// Forecast endpoint of the OpenWeatherMap 2.5 API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Configuration for the OpenWeatherMap forecast source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    /// OpenWeatherMap city id (see `https://openweathermap.org/city/<id>`).
    pub city_id: String,
    /// API key sent as the `appid` query parameter.
    pub api_key: String,
    /// Forecast endpoint URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u16,
}

impl OpenWeatherConfig {
    /// Public page for the configured city.
    #[must_use]
    pub fn city_url(&self) -> String {
        format!("https://openweathermap.org/city/{}", self.city_id)
    }
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            city_id: String::new(),
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}
