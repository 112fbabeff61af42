//! # weatherhued — weatherhue daemon
//!
//! Composition root that wires the forecast source and the Hue bridge
//! together and drives them.
//!
//! ## Responsibilities
//! - Parse the command line and the configuration file (plus env vars)
//! - Initialise logging
//! - Construct the adapters and inject them into the weather cycle
//! - Run the poll loop, a single test cycle, or a forced condition
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use weatherhue_adapter_hue::HueBridge;
use weatherhue_adapter_openweather::OpenWeatherSource;
use weatherhue_app::services::{ColorMapper, PollLoop, WeatherCycle};

use crate::cli::{Cli, Mode};
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            if let Some(hint) = err.hint() {
                eprintln!("{hint}");
            }
            return Err(err).context("could not load configuration");
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .init();

    println!("Reading weather for {}", config.weather.city_url());
    println!("Using bridge at {}", config.bridge.base_url());
    println!("Coloring bulbs: {}", config.bridge.bulbs.join(", "));

    // Adapters
    let source = OpenWeatherSource::new(config.weather.clone())
        .context("failed to set up the weather client")?;
    let bridge =
        HueBridge::new(config.bridge.clone()).context("failed to set up the bridge client")?;

    // Services
    let mapper = ColorMapper::new(config.weathercolormap.clone());
    let mut cycle = WeatherCycle::new(source, mapper, bridge, config.bridge.bulbs.clone());

    match cli.mode() {
        Mode::Daemon => {
            let Err(err) = PollLoop::new(cycle, config.refresh_interval()).run().await;
            tracing::error!(error = %err, "weather loop stopped");
            Err(err).context("weather loop stopped")
        }
        Mode::Test => {
            let forecast = cycle.fetch().await.context("could not fetch the forecast")?;
            println!("{}", cycle.describe(&forecast));
            let setting = cycle.resolve(&forecast.condition, &forecast.description)?;
            println!("Now setting {} to {setting}", cycle.bulbs().join(", "));
            cycle.apply(setting).await.context("could not set the bulbs")?;
            Ok(())
        }
        Mode::Force {
            condition,
            description,
        } => {
            println!("Ignoring location, forced weather to {condition} - {description}");
            let setting = cycle
                .run_forced(&condition, &description)
                .await
                .context("could not apply the forced weather")?;
            println!("Set {} to {setting}", cycle.bulbs().join(", "));
            Ok(())
        }
    }
}
