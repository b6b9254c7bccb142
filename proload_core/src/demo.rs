//! Inverse mapping used to drive the simulated sensor from a desired load.

use crate::calibration::CalibrationCoefficients;

pub use proload_traits::{SENSOR_MAX_V, SENSOR_MIN_V};

/// Voltage the sensor would have to output to show `percent` of `max_load`.
///
/// The result saturates at `[SENSOR_MIN_V, SENSOR_MAX_V]`. A zero slope gives
/// ±Inf before saturation (so a bound) or NaN when the target sits exactly on
/// the intercept; NaN is returned unchanged.
pub fn voltage_for_target_load(
    percent: f64,
    coefficients: CalibrationCoefficients,
    max_load: f64,
) -> f64 {
    let target_weight = (percent / 100.0) * max_load;
    let voltage = (target_weight - coefficients.intercept) / coefficients.slope;
    voltage.clamp(SENSOR_MIN_V, SENSOR_MAX_V)
}

/// Canned load levels offered by the simulator's control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoScenario {
    Empty,
    Normal,
    Warning,
    Danger,
    Overload,
}

impl DemoScenario {
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::Normal,
        Self::Warning,
        Self::Danger,
        Self::Overload,
    ];

    pub const fn percent(self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Normal => 50.0,
            Self::Warning => 75.0,
            Self::Danger => 90.0,
            Self::Overload => 110.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORY: CalibrationCoefficients = CalibrationCoefficients {
        slope: 2500.0,
        intercept: -1250.0,
    };

    #[test]
    fn half_load_is_midscale() {
        let v = voltage_for_target_load(50.0, FACTORY, 10_000.0);
        assert!((v - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_saturates_at_lower_bound() {
        // 0 % -> 0.5 V, inside range
        assert!((voltage_for_target_load(0.0, FACTORY, 10_000.0) - 0.5).abs() < 1e-12);
        // negative targets go below the range
        assert_eq!(voltage_for_target_load(-50.0, FACTORY, 10_000.0), SENSOR_MIN_V);
    }

    #[test]
    fn overload_saturates_at_upper_bound() {
        // 110 % -> 4.9 V
        assert_eq!(voltage_for_target_load(110.0, FACTORY, 10_000.0), SENSOR_MAX_V);
    }

    #[test]
    fn zero_slope() {
        let flat = CalibrationCoefficients {
            slope: 0.0,
            intercept: 100.0,
        };
        assert_eq!(voltage_for_target_load(50.0, flat, 10_000.0), SENSOR_MAX_V);
        assert_eq!(voltage_for_target_load(0.0, flat, 10_000.0), SENSOR_MIN_V);
        assert!(voltage_for_target_load(1.0, flat, 10_000.0).is_nan());
    }
}
