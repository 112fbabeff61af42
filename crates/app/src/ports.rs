//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod light_controller;
pub mod weather_source;

pub use light_controller::LightController;
pub use weather_source::WeatherSource;
