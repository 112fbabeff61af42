//! Hue adapter error types.

use std::path::PathBuf;
use std::time::Duration;

use weatherhue_domain::error::WeatherHueError;

use crate::protocol::ApiError;

/// Errors specific to the Hue adapter.
#[derive(Debug, thiserror::Error)]
pub enum HueError {
    /// The HTTP request could not be sent or its body not read.
    #[error("bridge request failed")]
    Request(#[from] reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("bridge answered {0}")]
    Status(reqwest::StatusCode),

    /// The bridge answered with JSON we do not understand.
    #[error("unexpected bridge response")]
    Payload(#[from] serde_json::Error),

    /// The bridge answered with an empty response list.
    #[error("bridge answered with an empty response")]
    EmptyResponse,

    /// Pairing was attempted before the link button was pressed.
    #[error("link button not pressed")]
    LinkButtonNotPressed,

    /// The link button was not pressed within the configured pairing timeout.
    #[error("link button was not pressed within {0:?}")]
    PairingTimedOut(Duration),

    /// The bridge rejected a request.
    #[error("bridge rejected request (type {}, {}): {}", .0.kind, .0.address, .0.description)]
    Api(ApiError),

    /// A configured bulb name does not exist on the bridge.
    #[error("no light named {0:?} on the bridge")]
    UnknownLight(String),

    /// The username file could not be read or written.
    #[error("failed to access username file")]
    UsernameStore(#[from] UsernameStoreError),
}

/// Details about a username file failure.
#[derive(Debug, thiserror::Error)]
pub enum UsernameStoreError {
    /// Reading or writing the file failed.
    #[error("I/O error on {path}")]
    Io {
        /// The username file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of `{ "<ip>": { "username": … } }`.
    #[error("{path} is not a valid username file")]
    Format {
        /// The username file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HueError {
    /// Convert into the domain error matching the failure class.
    #[must_use]
    pub fn into_domain(self) -> WeatherHueError {
        match self {
            err @ (Self::Request(_) | Self::Status(_)) => WeatherHueError::Network(Box::new(err)),
            err @ Self::Payload(_) => WeatherHueError::Parse(Box::new(err)),
            other => WeatherHueError::Bridge(Box::new(other)),
        }
    }
}

impl From<HueError> for WeatherHueError {
    fn from(err: HueError) -> Self {
        err.into_domain()
    }
}
