mod cli;
mod error_fmt;
mod run;

use clap::Parser;
use eyre::Result;
use proload_core::error::LoadCellError;
use proload_core::{CalibrationSet, SystemConfig, parse_capacity_tons};
use proload_hardware::SimulatedSensor;
use std::path::Path;

use crate::cli::{Cli, Commands, DEFAULT_CONFIG_PATH, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = real_main(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn real_main(cli: Cli) -> Result<()> {
    color_eyre::install()?;

    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;

    let mut sys = SystemConfig::try_from(&cfg)?;
    if let Some(path) = &cli.calibration {
        let rows = proload_config::load_calibration_csv(path)?;
        let set = CalibrationSet::try_from(rows.as_slice())?;
        sys.replace_calibration(set)?;
        tracing::info!(path = %path.display(), points = rows.len(), "calibration loaded");
    }
    if let Some(t) = &cli.capacity_t {
        sys.set_max_load(parse_capacity_tons(t)?)?;
    }

    let mut sensor = SimulatedSensor::new().with_device(cfg.sensor.device.clone());
    if !cfg.sensor.connected {
        sensor.disconnect();
    }
    sensor.set_voltage(cfg.sensor.voltage)?;

    let out = match cli.cmd {
        Commands::Read {
            voltage,
            disconnected,
        } => run::read(&sys, &mut sensor, voltage, disconnected)?,
        Commands::Demo { percent, scenario } => {
            run::demo(&sys, &mut sensor, percent, scenario.map(Into::into))?
        }
        Commands::Fit => run::fit(&sys),
        Commands::Info => run::info(&sys),
    };

    if cli.json {
        println!("{}", out.json);
    } else {
        println!("{}", out.text);
    }
    Ok(())
}

/// Load and validate the TOML config. Without `--config`, a missing default
/// file means factory settings.
fn load_config(path: Option<&Path>) -> Result<proload_config::Config> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(proload_config::Config::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadCellError::Config(format!("read {}: {e}", path.display())))?;
    let cfg = proload_config::load_toml(&text)
        .map_err(|e| LoadCellError::Config(format!("parse {}: {e}", path.display())))?;
    cfg.validate()
        .map_err(|e| LoadCellError::Config(e.to_string()))?;
    Ok(cfg)
}

fn init_tracing(
    json: bool,
    cli_level: Option<&str>,
    logging: &proload_config::Logging,
) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    // Console logs go to stderr; stdout carries command output.
    let console = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let p = Path::new(file);
            let dir = p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = p
                .file_name()
                .ok_or_else(|| LoadCellError::Config(format!("logging.file '{file}' has no file name")))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}
