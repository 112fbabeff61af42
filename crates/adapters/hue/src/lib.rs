//! # weatherhue-adapter-hue
//!
//! Philips Hue adapter — implements the `LightController` port against a
//! Hue bridge's local REST API.
//!
//! ## How it works
//!
//! The bridge only answers requests carrying a username it issued. On first
//! use the adapter takes that username from the configuration, then from the
//! username file, and only then pairs: it registers with the bridge, retrying
//! while the bridge reports that its link button has not been pressed. The
//! username is saved so later runs connect silently.
//!
//! Setting a color reads the light list once to turn bulb names into ids,
//! then sends one state update per bulb with a short pause in between.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `weatherhue-app` and `weatherhue-domain`.

mod config;
mod error;
pub mod protocol;
mod username_store;

pub use config::HueConfig;
pub use error::{HueError, UsernameStoreError};
pub use username_store::UsernameStore;

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::Instant;
use weatherhue_app::ports::LightController;
use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::table::ColorSetting;

use protocol::{
    ApiResponse, LINK_BUTTON_NOT_PRESSED, LightsResponse, RegisterRequest, Registration,
    StateUpdate, first_error,
};

/// Light controller backed by a Hue bridge.
pub struct HueBridge {
    config: HueConfig,
    http: reqwest::Client,
    store: UsernameStore,
    username: Option<String>,
}

impl HueBridge {
    /// Build a bridge client. Does not contact the bridge yet.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::Request`] if the HTTP client cannot be initialised.
    pub fn new(config: HueConfig) -> Result<Self, HueError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;
        let store = UsernameStore::new(config.username_file.clone());
        Ok(Self {
            config,
            http,
            store,
            username: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &HueConfig {
        &self.config
    }

    /// Whether a username has been obtained.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.username.is_some()
    }

    /// Obtain a username, pairing with the bridge if none is known.
    ///
    /// # Errors
    ///
    /// Returns the pairing or username file error.
    pub async fn connect(&mut self) -> Result<String, HueError> {
        if let Some(username) = &self.username {
            return Ok(username.clone());
        }
        tracing::debug!(
            ip = %self.config.ip,
            "connecting to bridge, press its link button if this is the first run"
        );

        let username = if let Some(username) = self.config.username.clone() {
            username
        } else if let Some(username) = self.store.load(&self.config.ip)? {
            username
        } else {
            let username = self.pair().await?;
            self.store.save(&self.config.ip, &username)?;
            tracing::debug!(path = %self.store.path().display(), "saved bridge username");
            username
        };

        tracing::info!(ip = %self.config.ip, "bridge login successful");
        self.username = Some(username.clone());
        Ok(username)
    }

    async fn pair(&self) -> Result<String, HueError> {
        let started = Instant::now();
        loop {
            match self.register().await {
                Err(HueError::LinkButtonNotPressed) => {
                    if let Some(limit) = self.config.pairing_timeout()
                        && started.elapsed() >= limit
                    {
                        return Err(HueError::PairingTimedOut(limit));
                    }
                    tracing::warn!(
                        retry_in_secs = self.config.pairing_retry_secs,
                        "press the link button on the bridge"
                    );
                    tokio::time::sleep(self.config.pairing_retry()).await;
                }
                other => return other,
            }
        }
    }

    async fn register(&self) -> Result<String, HueError> {
        let request = self
            .http
            .post(format!("{}/api", self.config.base_url()))
            .json(&RegisterRequest {
                devicetype: &self.config.device_type,
            });
        let responses: Vec<ApiResponse<Registration>> = read_json(request).await?;
        match responses.into_iter().next() {
            Some(ApiResponse::Success(registration)) => Ok(registration.username),
            Some(ApiResponse::Error(err)) if err.kind == LINK_BUTTON_NOT_PRESSED => {
                Err(HueError::LinkButtonNotPressed)
            }
            Some(ApiResponse::Error(err)) => Err(HueError::Api(err)),
            None => Err(HueError::EmptyResponse),
        }
    }

    /// Map of light name to light id.
    async fn light_ids(&self, username: &str) -> Result<HashMap<String, String>, HueError> {
        let request = self
            .http
            .get(format!("{}/api/{username}/lights", self.config.base_url()));
        match read_json(request).await? {
            LightsResponse::Lights(lights) => Ok(lights
                .into_iter()
                .map(|(id, light)| (light.name, id))
                .collect()),
            LightsResponse::Rejected(responses) => Err(first_error(&responses)
                .cloned()
                .map_or(HueError::EmptyResponse, HueError::Api)),
        }
    }

    async fn set_state(
        &self,
        username: &str,
        id: &str,
        update: &StateUpdate,
    ) -> Result<(), HueError> {
        let request = self
            .http
            .put(format!(
                "{}/api/{username}/lights/{id}/state",
                self.config.base_url()
            ))
            .json(update);
        let responses: Vec<ApiResponse<serde_json::Value>> = read_json(request).await?;
        match first_error(&responses) {
            Some(err) => Err(HueError::Api(err.clone())),
            None => Ok(()),
        }
    }

    /// Turn the named bulbs on with the given color and brightness.
    ///
    /// Every name is checked against the bridge before any bulb changes.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::UnknownLight`] for a name the bridge does not
    /// know, or the first request error.
    #[tracing::instrument(skip(self, setting), fields(setting = %setting))]
    pub async fn set_bulbs(
        &mut self,
        setting: ColorSetting,
        bulbs: &[String],
    ) -> Result<(), HueError> {
        let username = self.connect().await?;
        let ids = self.light_ids(&username).await?;
        let targets = bulbs
            .iter()
            .map(|name| {
                ids.get(name)
                    .map(|id| (name, id))
                    .ok_or_else(|| HueError::UnknownLight(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let xy = self.config.gamut.rgb_to_xy(setting.color);
        let update = StateUpdate {
            on: true,
            xy: [xy.x, xy.y],
            bri: setting.brightness.bridge_value(),
            transitiontime: self.config.transition_time,
        };

        for (index, (name, id)) in targets.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.bulb_pause()).await;
            }
            tracing::debug!(bulb = %name, id = %id, x = xy.x, y = xy.y, "setting bulb");
            self.set_state(&username, id, &update).await?;
        }

        tracing::info!(count = targets.len(), "done setting colors");
        Ok(())
    }
}

impl LightController for HueBridge {
    async fn apply(&mut self, setting: ColorSetting, bulbs: &[String]) -> Result<(), WeatherHueError> {
        self.set_bulbs(setting, bulbs)
            .await
            .map_err(HueError::into_domain)
    }
}

async fn read_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, HueError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(HueError::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
