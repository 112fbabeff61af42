//! # weatherhue-domain
//!
//! Pure domain model for the weatherhue forecast-to-light system.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **colors** (`Rgb`, `Brightness`) and their projection onto a
//!   bulb's CIE xy gamut
//! - Define the **weather table** mapping a forecast condition and
//!   description to a color setting, with explicit `default` fallback
//! - Define the **forecast** value produced by each poll
//! - Contain all invariant enforcement and lookup logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod color;
pub mod forecast;
pub mod table;
