//! Voltage → weight → status evaluation.

use crate::calibration::CalibrationCoefficients;
use crate::status::LoadStatus;

/// Result of evaluating one sensor voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Weight in kg, never negative.
    pub weight: f64,
    /// `weight / max_load * 100`.
    pub load_percentage: f64,
    pub status: LoadStatus,
}

/// Apply the calibration line to `voltage` and classify against `max_load`.
///
/// - Disconnected sensors report exactly 0 kg.
/// - Negative raw weights (noise below the zero point) clamp to 0; NaN is kept
///   so a broken calibration stays visible.
/// - `max_load` must be strictly positive; that is checked where capacity is set.
pub fn evaluate(
    voltage: f64,
    coefficients: CalibrationCoefficients,
    max_load: f64,
    sensor_connected: bool,
) -> Reading {
    let weight = if sensor_connected {
        let raw = coefficients.weight_at(voltage);
        if raw <= 0.0 { 0.0 } else { raw }
    } else {
        0.0
    };
    let load_percentage = (weight / max_load) * 100.0;
    Reading {
        weight,
        load_percentage,
        status: LoadStatus::from_percentage(load_percentage),
    }
}
