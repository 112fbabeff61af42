//! Configuration loading — TOML file with environment variable overrides.
//!
//! Reads `weatherhue.toml` (or the path given with `--config`). Unlike the
//! bridge and weather sections, the color table has no sensible default, so
//! a missing file is an error. Environment variables take precedence over
//! file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use weatherhue_adapter_hue::HueConfig;
use weatherhue_adapter_openweather::OpenWeatherConfig;
use weatherhue_domain::error::ValidationError;
use weatherhue_domain::table::WeatherTable;

/// Crates whose log level follows `verbosity`.
const LOG_TARGETS: [&str; 4] = [
    "weatherhued",
    "weatherhue_app",
    "weatherhue_adapter_openweather",
    "weatherhue_adapter_hue",
];

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between two weather checks.
    pub refresh_secs: u64,
    /// 0 = warnings only, 1 = info, 2 and more = debug.
    pub verbosity: u8,
    /// Forecast source settings.
    pub weather: OpenWeatherConfig,
    /// Hue bridge settings.
    pub bridge: HueConfig,
    /// Condition → description → color table.
    pub weathercolormap: WeatherTable,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax). Overrides `verbosity` when set.
    pub filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_secs: 900,
            verbosity: 1,
            weather: OpenWeatherConfig::default(),
            bridge: HueConfig::default(),
            weathercolormap: WeatherTable::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, then apply environment-variable
    /// overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let example = example_path(path);
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                    example: example.exists().then_some(example),
                });
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        let mut config: Self = toml::from_str(&content)?;
        config.resolve_paths(path);
        Ok(config)
    }

    /// Make a relative username file path relative to the config file.
    fn resolve_paths(&mut self, config_path: &Path) {
        if self.bridge.username_file.is_relative()
            && let Some(dir) = config_path.parent()
        {
            self.bridge.username_file = dir.join(&self.bridge.username_file);
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("WEATHERHUE_API_KEY") {
            self.weather.api_key = val;
        }
        if let Some(val) = lookup("WEATHERHUE_CITY_ID") {
            self.weather.city_id = val;
        }
        if let Some(val) = lookup("WEATHERHUE_BRIDGE_IP") {
            self.bridge.ip = val;
        }
        if let Some(val) = lookup("WEATHERHUE_LOG") {
            self.logging.filter = Some(val);
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = Some(val);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_secs must be non-zero".to_string(),
            ));
        }
        if self.weather.city_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "weather.city_id must be set".to_string(),
            ));
        }
        if self.weather.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "weather.api_key must be set".to_string(),
            ));
        }
        if self.bridge.ip.trim().is_empty() {
            return Err(ConfigError::Validation("bridge.ip must be set".to_string()));
        }
        if self.bridge.bulbs.is_empty() {
            return Err(ConfigError::Validation(
                "bridge.bulbs must list at least one bulb".to_string(),
            ));
        }
        self.weathercolormap.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// The `EnvFilter` directive to log with.
    #[must_use]
    pub fn log_filter(&self) -> String {
        if let Some(filter) = &self.logging.filter {
            return filter.clone();
        }
        let level = match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        std::iter::once("warn".to_string())
            .chain(LOG_TARGETS.iter().map(|target| format!("{target}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `weatherhue.toml` → `weatherhue.toml.example`.
fn example_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".example");
    PathBuf::from(name)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The config file does not exist.
    #[error("config file {} not found", .path.display())]
    MissingFile {
        path: PathBuf,
        /// Sample configuration next to the expected file, if there is one.
        example: Option<PathBuf>,
    },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// The color table is unusable.
    #[error("invalid weathercolormap")]
    Table(#[from] ValidationError),
}

impl ConfigError {
    /// Advice for the operator, when there is any.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingFile {
                path,
                example: Some(example),
            } => Some(format!(
                "copy {} to {} and fill in your settings",
                example.display(),
                path.display()
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use weatherhue_domain::color::Gamut;

    use super::*;

    const VALID: &str = r#"
        refresh_secs = 600

        [weather]
        city_id = "2759794"
        api_key = "secret"

        [bridge]
        ip = "192.168.1.10"
        bulbs = ["Living room"]

        [weathercolormap.Rain]
        default = [[0, 0, 255], 100]
        "light rain" = [[100, 100, 255], 80]
    "#;

    fn valid() -> Config {
        toml::from_str(VALID).unwrap()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(900));
        assert_eq!(config.verbosity, 1);
        assert!(config.logging.filter.is_none());
        assert!(config.weathercolormap.is_empty());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            refresh_secs = 300
            verbosity = 2

            [weather]
            city_id = "2759794"
            api_key = "secret"
            base_url = "http://localhost:9000/forecast"

            [bridge]
            ip = "192.168.1.10"
            bulbs = ["Living room", "Hallway"]
            username = "abc123"
            gamut = "C"

            [logging]
            filter = "debug"

            [weathercolormap.Clear]
            default = [[255, 255, 0], 254]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.refresh_secs, 300);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.weather.base_url, "http://localhost:9000/forecast");
        assert_eq!(config.bridge.bulbs, vec!["Living room", "Hallway"]);
        assert_eq!(config.bridge.username.as_deref(), Some("abc123"));
        assert_eq!(config.bridge.gamut, Gamut::C);
        assert_eq!(config.logging.filter.as_deref(), Some("debug"));
        assert_eq!(config.weathercolormap.conditions(), vec!["Clear"]);
    }

    #[test]
    fn should_accept_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_refresh() {
        let mut config = valid();
        config.refresh_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_missing_api_key() {
        let mut config = valid();
        config.weather.api_key = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_missing_city() {
        let mut config = valid();
        config.weather.city_id = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_bulb_list() {
        let mut config = valid();
        config.bridge.bulbs.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_color_table() {
        let mut config = valid();
        config.weathercolormap = WeatherTable::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Table(ValidationError::EmptyTable))
        ));
    }

    #[test]
    fn should_override_from_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("WEATHERHUE_API_KEY", "from-env"),
            ("WEATHERHUE_CITY_ID", "2643743"),
            ("WEATHERHUE_BRIDGE_IP", "10.0.0.2"),
            ("WEATHERHUE_LOG", "trace"),
        ]);
        let mut config = valid();

        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.weather.api_key, "from-env");
        assert_eq!(config.weather.city_id, "2643743");
        assert_eq!(config.bridge.ip, "10.0.0.2");
        assert_eq!(config.log_filter(), "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_weatherhue_log() {
        let env: HashMap<&str, &str> =
            HashMap::from([("WEATHERHUE_LOG", "info"), ("RUST_LOG", "debug")]);
        let mut config = valid();

        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn should_derive_log_filter_from_verbosity() {
        let mut config = valid();
        config.verbosity = 0;
        assert_eq!(
            config.log_filter(),
            "warn,weatherhued=warn,weatherhue_app=warn,weatherhue_adapter_openweather=warn,weatherhue_adapter_hue=warn"
        );
        config.verbosity = 5;
        assert!(config.log_filter().contains("weatherhue_adapter_hue=debug"));
    }

    #[test]
    fn should_load_file_and_resolve_username_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherhue.toml");
        std::fs::write(&path, VALID).unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.refresh_secs, 600);
        assert_eq!(
            config.bridge.username_file,
            dir.path().join(".weatherhue_user")
        );
    }

    #[test]
    fn should_keep_absolute_username_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherhue.toml");
        let patched = VALID.replace(
            "bulbs = [\"Living room\"]",
            "bulbs = [\"Living room\"]\nusername_file = \"/var/lib/weatherhue/user\"",
        );
        std::fs::write(&path, patched).unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(
            config.bridge.username_file,
            PathBuf::from("/var/lib/weatherhue/user")
        );
    }

    #[test]
    fn should_hint_at_example_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherhue.toml");
        std::fs::write(dir.path().join("weatherhue.toml.example"), VALID).unwrap();

        let err = Config::from_file(&path).unwrap_err();

        assert!(matches!(err, ConfigError::MissingFile { example: Some(_), .. }));
        assert!(err.hint().unwrap().contains("weatherhue.toml.example"));
    }

    #[test]
    fn should_fail_without_hint_when_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::from_file(&dir.path().join("weatherhue.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::MissingFile { example: None, .. }));
        assert!(err.hint().is_none());
    }

    #[test]
    fn should_reject_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherhue.toml");
        std::fs::write(&path, "refresh_secs = [").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
