//! Color mapper — resolves a forecast against the weather table.

use weatherhue_domain::error::LookupError;
use weatherhue_domain::table::{ColorSetting, WeatherTable};

/// Application service wrapping the static [`WeatherTable`].
#[derive(Debug, Clone)]
pub struct ColorMapper {
    table: WeatherTable,
}

impl ColorMapper {
    /// Create a mapper over a table loaded at startup.
    #[must_use]
    pub fn new(table: WeatherTable) -> Self {
        Self { table }
    }

    /// Resolve `(condition, description)` to the color to show.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the condition is missing from the table,
    /// or when it has neither the description nor a `default` entry.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, condition: &str, description: &str) -> Result<ColorSetting, LookupError> {
        let setting = self.table.lookup(condition, description)?;
        tracing::debug!(
            color = %setting.color,
            brightness = %setting.brightness,
            "resolved weather color"
        );
        Ok(setting)
    }
}
