//! Weather table — maps a forecast condition and description to a color.
//!
//! The table is keyed by the forecast's primary condition (`"Rain"`,
//! `"Clouds"`, …). Each condition holds a set of descriptions
//! (`"light rain"`, …) plus an optional [`DEFAULT_DESCRIPTION`] entry used
//! when the exact description is not listed. Entries are written as
//! `[[r, g, b], brightness]`:
//!
//! ```toml
//! [Rain]
//! default = [[0, 0, 255], 100]
//! "light rain" = [[100, 100, 255], 80]
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Brightness, Rgb};
use crate::error::{LookupError, ValidationError};

/// Description key used when the forecast description has no own entry.
pub const DEFAULT_DESCRIPTION: &str = "default";

/// A color and brightness to push to the bulbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Rgb, Brightness)", into = "(Rgb, Brightness)")]
pub struct ColorSetting {
    pub color: Rgb,
    pub brightness: Brightness,
}

impl ColorSetting {
    #[must_use]
    pub const fn new(color: Rgb, brightness: Brightness) -> Self {
        Self { color, brightness }
    }
}

impl From<(Rgb, Brightness)> for ColorSetting {
    fn from((color, brightness): (Rgb, Brightness)) -> Self {
        Self { color, brightness }
    }
}

impl From<ColorSetting> for (Rgb, Brightness) {
    fn from(setting: ColorSetting) -> Self {
        (setting.color, setting.brightness)
    }
}

impl fmt::Display for ColorSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color {} and brightness {}",
            self.color, self.brightness
        )
    }
}

/// All color entries for one condition, keyed by description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet(HashMap<String, ColorSetting>);

impl ConditionSet {
    /// The entry for `description`, without any fallback.
    #[must_use]
    pub fn get(&self, description: &str) -> Option<ColorSetting> {
        self.0.get(description).copied()
    }

    /// The [`DEFAULT_DESCRIPTION`] entry, if configured.
    #[must_use]
    pub fn default_setting(&self) -> Option<ColorSetting> {
        self.get(DEFAULT_DESCRIPTION)
    }

    pub fn insert(&mut self, description: impl Into<String>, setting: ColorSetting) {
        self.0.insert(description.into(), setting);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Static condition → description → color table, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherTable(HashMap<String, ConditionSet>);

impl WeatherTable {
    /// Register (or replace) one entry.
    pub fn insert(
        &mut self,
        condition: impl Into<String>,
        description: impl Into<String>,
        setting: ColorSetting,
    ) {
        self.0
            .entry(condition.into())
            .or_default()
            .insert(description, setting);
    }

    /// Resolve a forecast to a color setting.
    ///
    /// Looks up `condition` first, then `description` within it, then the
    /// condition's [`DEFAULT_DESCRIPTION`] entry.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownCondition`] when the condition is not in
    /// the table, and [`LookupError::NoDefault`] when neither the description
    /// nor a default entry exists for it.
    pub fn lookup(&self, condition: &str, description: &str) -> Result<ColorSetting, LookupError> {
        let set = self
            .0
            .get(condition)
            .ok_or_else(|| LookupError::UnknownCondition {
                condition: condition.to_string(),
            })?;

        if let Some(setting) = set.get(description) {
            return Ok(setting);
        }

        set.default_setting().ok_or_else(|| LookupError::NoDefault {
            condition: condition.to_string(),
            description: description.to_string(),
        })
    }

    /// Condition names in the table, sorted.
    #[must_use]
    pub fn conditions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn condition(&self, name: &str) -> Option<&ConditionSet> {
        self.0.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the table is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the table is empty, a condition name
    /// is blank, or a condition has no entries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyTable);
        }
        for (condition, set) in &self.0 {
            if condition.trim().is_empty() {
                return Err(ValidationError::EmptyCondition);
            }
            if set.is_empty() {
                return Err(ValidationError::EmptyConditionSet(condition.clone()));
            }
        }
        Ok(())
    }
}
