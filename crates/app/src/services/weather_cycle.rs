//! Weather cycle — one fetch → resolve → apply pass.
//!
//! The poll loop repeats [`WeatherCycle::run_once`]; the CLI also uses the
//! individual steps directly for its test and override modes.

use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::forecast::Forecast;
use weatherhue_domain::table::ColorSetting;
use weatherhue_domain::time::{Timestamp, now};

use crate::ports::{LightController, WeatherSource};
use crate::services::ColorMapper;

/// Outcome of a completed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub forecast: Forecast,
    pub setting: ColorSetting,
    pub applied_at: Timestamp,
}

/// Owns the weather source, the mapper and the light controller, and passes
/// them explicitly through each step.
pub struct WeatherCycle<W, L> {
    source: W,
    mapper: ColorMapper,
    lights: L,
    bulbs: Vec<String>,
}

impl<W: WeatherSource, L: LightController> WeatherCycle<W, L> {
    /// Wire a cycle from its parts.
    pub fn new(source: W, mapper: ColorMapper, lights: L, bulbs: Vec<String>) -> Self {
        Self {
            source,
            mapper,
            lights,
            bulbs,
        }
    }

    /// Names of the bulbs every cycle sets.
    #[must_use]
    pub fn bulbs(&self) -> &[String] {
        &self.bulbs
    }

    /// Fetch the forecast for the next period.
    ///
    /// # Errors
    ///
    /// Propagates network and parse errors from the weather source.
    pub async fn fetch(&self) -> Result<Forecast, WeatherHueError> {
        let forecast = self.source.fetch().await?;
        tracing::info!(
            location = self.source.location(),
            condition = %forecast.condition,
            description = %forecast.description,
            "got next weather information"
        );
        Ok(forecast)
    }

    /// Map a condition/description pair to a color.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherHueError::Lookup`] when the table has no match.
    pub fn resolve(&self, condition: &str, description: &str) -> Result<ColorSetting, WeatherHueError> {
        Ok(self.mapper.resolve(condition, description)?)
    }

    /// Push a setting to all configured bulbs.
    ///
    /// # Errors
    ///
    /// Propagates errors from the light controller.
    pub async fn apply(&mut self, setting: ColorSetting) -> Result<(), WeatherHueError> {
        self.lights.apply(setting, &self.bulbs).await
    }

    /// Fetch, resolve and apply, in that order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub async fn run_once(&mut self) -> Result<CycleReport, WeatherHueError> {
        let forecast = self.fetch().await?;
        let setting = self.resolve(&forecast.condition, &forecast.description)?;
        self.apply(setting).await?;
        Ok(CycleReport {
            forecast,
            setting,
            applied_at: now(),
        })
    }

    /// Resolve and apply a forced condition, skipping the fetch.
    ///
    /// # Errors
    ///
    /// Returns the lookup error or the light controller's error.
    #[tracing::instrument(skip(self))]
    pub async fn run_forced(
        &mut self,
        condition: &str,
        description: &str,
    ) -> Result<ColorSetting, WeatherHueError> {
        let setting = self.resolve(condition, description)?;
        self.apply(setting).await?;
        Ok(setting)
    }

    /// Sentence describing a forecast for this cycle's location.
    #[must_use]
    pub fn describe(&self, forecast: &Forecast) -> String {
        format!(
            "In the last forecast weather for your location ({}) was thought to be {forecast}",
            self.source.location()
        )
    }
}
