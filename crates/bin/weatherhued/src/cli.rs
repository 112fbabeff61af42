//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use weatherhue_domain::table::DEFAULT_DESCRIPTION;

/// Colors Hue bulbs after the upcoming weather.
#[derive(Debug, Parser)]
#[command(name = "weatherhued", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "weatherhue.toml")]
    pub config: PathBuf,

    /// Run a single cycle and print what was done.
    #[arg(short, long)]
    pub test: bool,

    /// Skip the forecast and force this weather condition (e.g. `Rain`).
    #[arg(short, long, value_name = "MAIN")]
    pub weather: Option<String>,

    /// Description used with `--weather`.
    #[arg(short, long, value_name = "DESC", default_value = DEFAULT_DESCRIPTION)]
    pub description: String,
}

/// What the daemon should do once configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Poll forever.
    Daemon,
    /// One fetch → resolve → apply pass.
    Test,
    /// Apply a forced condition once, without fetching.
    Force {
        condition: String,
        description: String,
    },
}

impl Cli {
    /// A forced weather wins over `--test`.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match &self.weather {
            Some(condition) => Mode::Force {
                condition: condition.clone(),
                description: self.description.clone(),
            },
            None if self.test => Mode::Test,
            None => Mode::Daemon,
        }
    }
}
