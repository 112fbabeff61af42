//! # weatherhue-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `WeatherSource` — fetch the next forecast period
//!   - `LightController` — push a color setting to named bulbs
//! - Define the use-cases that drive them:
//!   - `ColorMapper` — resolve a forecast against the weather table
//!   - `WeatherCycle` — one fetch → resolve → apply pass
//!   - `PollLoop` — repeat the cycle on a fixed interval, forever
//! - Orchestrate domain objects without knowing *how* the network works
//!
//! ## Dependency rule
//! Depends on `weatherhue-domain` only (plus `tokio::time` for waiting).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
