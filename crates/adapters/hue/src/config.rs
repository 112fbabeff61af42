//! Hue bridge configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use weatherhue_domain::color::Gamut;

/// Configuration for the Hue bridge and the bulbs it drives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    /// Bridge address on the local network (`host` or `host:port`).
    pub ip: String,
    /// Names of the bulbs to color, as shown in the Hue app.
    pub bulbs: Vec<String>,
    /// Bridge username, when already known. Skips pairing.
    pub username: Option<String>,
    /// File the username is stored in after pairing, keyed by bridge address.
    pub username_file: PathBuf,
    /// Application name sent to the bridge when pairing (`app#device`).
    pub device_type: String,
    /// Color gamut of the bulbs.
    pub gamut: Gamut,
    /// Fade duration in deciseconds.
    pub transition_time: u16,
    /// Pause between two bulbs, in milliseconds.
    pub bulb_pause_ms: u64,
    /// Delay between pairing attempts while waiting for the link button, in seconds.
    pub pairing_retry_secs: u64,
    /// Give up pairing after this many seconds. Waits forever when unset.
    pub pairing_timeout_secs: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: u16,
}

impl HueConfig {
    /// Base URL of the bridge's REST API.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.ip)
    }

    #[must_use]
    pub fn bulb_pause(&self) -> Duration {
        Duration::from_millis(self.bulb_pause_ms)
    }

    #[must_use]
    pub fn pairing_retry(&self) -> Duration {
        Duration::from_secs(self.pairing_retry_secs)
    }

    #[must_use]
    pub fn pairing_timeout(&self) -> Option<Duration> {
        self.pairing_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            ip: String::new(),
            bulbs: Vec::new(),
            username: None,
            username_file: PathBuf::from(".weatherhue_user"),
            device_type: "weatherhue#weatherhued".to_string(),
            gamut: Gamut::B,
            transition_time: 100,
            bulb_pause_ms: 300,
            pairing_retry_secs: 10,
            pairing_timeout_secs: None,
            timeout_secs: 10,
        }
    }
}
