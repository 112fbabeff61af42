//! Wire types of the Hue bridge REST API (v1).
//!
//! Write calls answer with a list of `{"success": …}` / `{"error": …}`
//! objects, one per changed attribute. Reads answer with the resource
//! itself, or with such a list when the call is rejected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Error type the bridge sends while its link button has not been pressed.
pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;

/// One item of a bridge response list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success(T),
    Error(ApiError),
}

/// Error item reported by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(default)]
    pub address: String,
    pub description: String,
}

/// Body of `POST /api`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub devicetype: &'a str,
}

/// Success payload of `POST /api`.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub username: String,
}

/// The part of a light resource we need.
#[derive(Debug, Clone, Deserialize)]
pub struct LightInfo {
    pub name: String,
}

/// Answer of `GET /api/<username>/lights`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LightsResponse {
    Lights(HashMap<String, LightInfo>),
    Rejected(Vec<ApiResponse<serde_json::Value>>),
}

/// Body of `PUT /api/<username>/lights/<id>/state`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate {
    pub on: bool,
    pub xy: [f64; 2],
    pub bri: u8,
    pub transitiontime: u16,
}

/// The first error in a response list, if any.
#[must_use]
pub fn first_error<T>(responses: &[ApiResponse<T>]) -> Option<&ApiError> {
    responses.iter().find_map(|response| match response {
        ApiResponse::Error(err) => Some(err),
        ApiResponse::Success(_) => None,
    })
}
