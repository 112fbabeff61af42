//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod color_mapper;
pub mod poll_loop;
pub mod weather_cycle;

pub use color_mapper::ColorMapper;
pub use poll_loop::PollLoop;
pub use weather_cycle::{CycleReport, WeatherCycle};

#[cfg(test)]
mod fakes;
