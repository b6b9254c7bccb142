#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core indicator logic (hardware-agnostic).
//!
//! Everything here is a pure, synchronous computation over its inputs. Sensors
//! are reached through `proload_traits::VoltageSource`.
//!
//! ## Architecture
//!
//! - **Calibration**: least-squares line fit and the editable point set (`calibration`)
//! - **Reading**: voltage → weight → load percentage → status (`reading`, `status`)
//! - **Demo**: inverse mapping from a target load back to a sensor voltage (`demo`)
//! - **Configuration**: capacity + calibration held consistently (`config`)
//! - **Display**: non-finite-safe formatting and the system info screen (`util`, `info`)

pub mod calibration;
pub mod config;
pub mod conversions;
pub mod demo;
pub mod error;
pub mod info;
pub mod reading;
pub mod status;
pub mod util;

pub use calibration::{CalibrationCoefficients, CalibrationPoint, CalibrationSet, fit, try_fit};
pub use config::{SystemConfig, parse_capacity_tons};
pub use demo::{DemoScenario, SENSOR_MAX_V, SENSOR_MIN_V, voltage_for_target_load};
pub use error::{CalibrationError, LoadCellError};
pub use info::SystemInfo;
pub use reading::{Reading, evaluate};
pub use status::LoadStatus;

use crate::error::Result;
use proload_traits::VoltageSource;

/// Take one sample from `sensor` and evaluate it against `cfg`.
///
/// A disconnected sensor is not read at all and reports zero load.
pub fn sample<S: VoltageSource + ?Sized>(cfg: &SystemConfig, sensor: &mut S) -> Result<(f64, Reading)> {
    if !sensor.is_connected() {
        return Ok((0.0, cfg.evaluate(0.0, false)));
    }
    let voltage = sensor
        .read_voltage()
        .map_err(|e| LoadCellError::Sensor(e.to_string()))?;
    let reading = cfg.evaluate(voltage, true);
    if !reading.weight.is_finite() {
        tracing::warn!(voltage, "reading is not finite; check calibration");
    }
    tracing::debug!(
        voltage,
        weight = reading.weight,
        pct = reading.load_percentage,
        status = %reading.status,
        "sample"
    );
    Ok((voltage, reading))
}
