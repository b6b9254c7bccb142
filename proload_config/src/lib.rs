#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and calibration parsing for the load indicator.
//!
//! - `Config` and its sections are deserialized from TOML and validated. Every
//!   section is optional and falls back to the factory setup.
//! - The calibration CSV loader enforces headers and runs the same point-set
//!   checks as the `[calibration]` section.
use serde::Deserialize;

/// Default paired sensor name.
pub const DEFAULT_DEVICE: &str = "ProSensor-X1";

/// Calibration CSV schema.
///
/// Expected headers:
/// id,voltage,weight
///
/// Example:
/// id,voltage,weight
/// 1,0.5,0.0
/// 2,4.5,10000.0
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CalibrationRow {
    pub id: u32,
    /// Sensor output (V)
    pub voltage: f64,
    /// Reference weight (kg)
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Capacity {
    /// Maximum load in tonnes; stored in kg at runtime.
    pub max_load_t: f64,
}

impl Default for Capacity {
    fn default() -> Self {
        Self { max_load_t: 10.0 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorCfg {
    /// Name of the paired sensor
    pub device: String,
    /// Start with the sensor link up
    pub connected: bool,
    /// Initial injector voltage (V); saturated to the sensor range at runtime
    pub voltage: f64,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            connected: true,
            voltage: 0.5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalibrationCfg {
    pub points: Vec<CalibrationRow>,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            points: vec![
                CalibrationRow {
                    id: 1,
                    voltage: 0.5,
                    weight: 0.0,
                },
                CalibrationRow {
                    id: 2,
                    voltage: 4.5,
                    weight: 10_000.0,
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub capacity: Capacity,
    pub sensor: SensorCfg,
    pub calibration: CalibrationCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Point-set checks shared by the TOML section and the CSV loader: unique ids,
/// finite values, and voltages that can determine a slope.
pub fn check_calibration_rows(rows: &[CalibrationRow]) -> eyre::Result<()> {
    for (i, r) in rows.iter().enumerate() {
        if rows[..i].iter().any(|q| q.id == r.id) {
            eyre::bail!("calibration.points has duplicate id {}", r.id);
        }
        if !r.voltage.is_finite() || !r.weight.is_finite() {
            eyre::bail!("calibration.points id {} has a non-finite value", r.id);
        }
    }
    if let [first, rest @ ..] = rows
        && !rest.is_empty()
        && rest.iter().all(|r| r.voltage == first.voltage)
    {
        eyre::bail!("calibration.points voltages must not all be identical");
    }
    Ok(())
}

pub fn load_calibration_csv(path: &std::path::Path) -> eyre::Result<Vec<CalibrationRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open calibration CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["id", "voltage", "weight"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "calibration CSV must have headers 'id,voltage,weight', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<CalibrationRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    check_calibration_rows(&rows)?;
    Ok(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Capacity
        if !self.capacity.max_load_t.is_finite() || self.capacity.max_load_t <= 0.0 {
            eyre::bail!("capacity.max_load_t must be > 0");
        }

        // Sensor
        if !self.sensor.voltage.is_finite() {
            eyre::bail!("sensor.voltage must be a finite number");
        }
        if self.sensor.device.trim().is_empty() {
            eyre::bail!("sensor.device must not be empty");
        }

        // Calibration
        check_calibration_rows(&self.calibration.points)?;

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }
        if let Some(level) = self.logging.level.as_deref()
            && !matches!(
                level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace"
            )
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_factory() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.capacity.max_load_t, 10.0);
        assert_eq!(cfg.sensor.device, DEFAULT_DEVICE);
        assert!(cfg.sensor.connected);
        assert_eq!(cfg.calibration.points.len(), 2);
        cfg.validate().unwrap();
    }

    #[test]
    fn single_point_is_allowed() {
        let rows = [CalibrationRow {
            id: 4,
            voltage: 1.0,
            weight: 5.0,
        }];
        check_calibration_rows(&rows).unwrap();
        check_calibration_rows(&[]).unwrap();
    }
}
