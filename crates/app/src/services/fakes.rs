//! In-memory port implementations shared by the service tests.

use std::sync::{Arc, Mutex};

use tokio::time::Instant;
use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::forecast::Forecast;
use weatherhue_domain::table::ColorSetting;

use crate::ports::{LightController, WeatherSource};

/// Returns a fixed forecast (or a network failure) and records when it was asked.
#[derive(Clone)]
pub struct FakeSource {
    forecast: Option<Forecast>,
    pub calls: Arc<Mutex<Vec<Instant>>>,
}

impl FakeSource {
    pub fn returning(condition: &str, description: &str) -> Self {
        Self {
            forecast: Some(Forecast::new(condition, description)),
            calls: Arc::default(),
        }
    }

    pub fn offline() -> Self {
        Self {
            forecast: None,
            calls: Arc::default(),
        }
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

impl WeatherSource for FakeSource {
    fn location(&self) -> &str {
        "2759794"
    }

    async fn fetch(&self) -> Result<Forecast, WeatherHueError> {
        self.calls.lock().unwrap().push(Instant::now());
        self.forecast.clone().ok_or_else(|| {
            WeatherHueError::Network(Box::new(std::io::Error::other("connection refused")))
        })
    }
}

/// Records every setting it is asked to apply.
#[derive(Clone, Default)]
pub struct FakeLights {
    pub applied: Arc<Mutex<Vec<(ColorSetting, Vec<String>)>>>,
}

impl FakeLights {
    pub fn applied(&self) -> Vec<(ColorSetting, Vec<String>)> {
        self.applied.lock().unwrap().clone()
    }
}

impl LightController for FakeLights {
    async fn apply(&mut self, setting: ColorSetting, bulbs: &[String]) -> Result<(), WeatherHueError> {
        self.applied.lock().unwrap().push((setting, bulbs.to_vec()));
        Ok(())
    }
}
