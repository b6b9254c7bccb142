//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use proload_core::DemoScenario;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Config file picked up when `--config` is not given; absent means factory defaults.
pub const DEFAULT_CONFIG_PATH: &str = "etc/proload.toml";

#[derive(Parser, Debug)]
#[command(name = "proload", version, about = "ProLoad indicator simulator")]
pub struct Cli {
    /// Path to config TOML (typed). Defaults to etc/proload.toml when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Calibration CSV replacing the configured points (strict header)
    #[arg(long, value_name = "FILE")]
    pub calibration: Option<PathBuf>,

    /// Override capacity, in tonnes
    #[arg(long = "capacity-t", value_name = "TONNES", allow_hyphen_values = true)]
    pub capacity_t: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Canned load levels from the control panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Scenario {
    Empty,
    Normal,
    Warning,
    Danger,
    Overload,
}

impl From<Scenario> for DemoScenario {
    fn from(s: Scenario) -> Self {
        match s {
            Scenario::Empty => DemoScenario::Empty,
            Scenario::Normal => DemoScenario::Normal,
            Scenario::Warning => DemoScenario::Warning,
            Scenario::Danger => DemoScenario::Danger,
            Scenario::Overload => DemoScenario::Overload,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take one reading from the simulated sensor
    Read {
        /// Move the voltage injector first (V, saturated to 0.4..=4.7)
        #[arg(long, value_name = "VOLTS", allow_negative_numbers = true)]
        voltage: Option<f64>,
        /// Drop the sensor link before reading
        #[arg(long, action = ArgAction::SetTrue)]
        disconnected: bool,
    },
    /// Drive the injector to a target load, then read
    Demo {
        /// Target load in percent of capacity
        #[arg(
            long,
            value_name = "PCT",
            allow_negative_numbers = true,
            conflicts_with = "scenario",
            required_unless_present = "scenario"
        )]
        percent: Option<f64>,
        /// Named scenario from the control panel
        #[arg(long, value_enum)]
        scenario: Option<Scenario>,
    },
    /// Show the fitted calibration line
    Fit,
    /// System information screen
    Info,
}
