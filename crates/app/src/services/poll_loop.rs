//! Poll loop — repeats the weather cycle on a fixed interval, forever.
//!
//! One state (running), one transition (tick). The first tick runs as soon
//! as the loop starts; each following tick starts `interval` after the
//! previous one finished. There is no isolation between ticks: the first
//! error ends the loop.

use std::convert::Infallible;
use std::time::Duration;

use weatherhue_domain::error::WeatherHueError;

use crate::ports::{LightController, WeatherSource};
use crate::services::weather_cycle::{CycleReport, WeatherCycle};

/// Interval used when none is configured (15 minutes).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(900);

/// Drives a [`WeatherCycle`] on a timer.
pub struct PollLoop<W, L> {
    cycle: WeatherCycle<W, L>,
    interval: Duration,
}

impl<W: WeatherSource, L: LightController> PollLoop<W, L> {
    #[must_use]
    pub fn new(cycle: WeatherCycle<W, L>, interval: Duration) -> Self {
        Self { cycle, interval }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single cycle.
    ///
    /// # Errors
    ///
    /// Returns the cycle's error unchanged.
    pub async fn tick(&mut self) -> Result<CycleReport, WeatherHueError> {
        self.cycle.run_once().await
    }

    /// Tick now, then every `interval`, until a tick fails.
    ///
    /// Only ever returns with the error that stopped the loop.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any step of any cycle.
    pub async fn run(mut self) -> Result<Infallible, WeatherHueError> {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "checking the weather every {} minutes",
            self.interval.as_secs() / 60
        );
        loop {
            let report = self.tick().await?;
            tracing::info!(
                forecast = %report.forecast,
                setting = %report.setting,
                applied_at = %report.applied_at,
                next_in_secs = self.interval.as_secs(),
                "cycle complete"
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}
