//! Runtime system configuration for the indicator.
//!
//! This is the in-memory state the indicator works from. It is separate from
//! the TOML-deserialized config in `proload_config`; see `conversions`.

use crate::calibration::{CalibrationCoefficients, CalibrationSet};
use crate::demo::voltage_for_target_load;
use crate::error::{LoadCellError, Result};
use crate::reading::{Reading, evaluate};

/// Kilograms per metric tonne.
pub const KG_PER_TONNE: f64 = 1_000.0;
/// Factory capacity: 10 t.
pub const FACTORY_MAX_LOAD_KG: f64 = 10_000.0;

/// Capacity plus calibration, with coefficients always derived from the
/// current point set.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    max_load: f64,
    calibration: CalibrationSet,
    coefficients: CalibrationCoefficients,
}

impl SystemConfig {
    /// Build from a capacity in kg and a calibration set. Rejects a bad
    /// capacity and calibration sets that cannot produce a finite line.
    pub fn new(max_load: f64, calibration: CalibrationSet) -> Result<Self> {
        check_capacity(max_load)?;
        let coefficients = calibration.try_fit().map_err(LoadCellError::from)?;
        Ok(Self {
            max_load,
            calibration,
            coefficients,
        })
    }

    /// 10 t capacity with the 0.5 V / 4.5 V two-point calibration.
    pub fn factory() -> Self {
        let calibration = CalibrationSet::factory();
        let coefficients = calibration.fit();
        Self {
            max_load: FACTORY_MAX_LOAD_KG,
            calibration,
            coefficients,
        }
    }

    /// Capacity in kg.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn coefficients(&self) -> CalibrationCoefficients {
        self.coefficients
    }

    /// Set the capacity in kg. The previous value is kept on error.
    pub fn set_max_load(&mut self, kg: f64) -> Result<()> {
        check_capacity(kg)?;
        tracing::info!(from_kg = self.max_load, to_kg = kg, "capacity changed");
        self.max_load = kg;
        Ok(())
    }

    /// Swap in a new calibration set and its fit in one step.
    ///
    /// Nothing changes if the set is rejected, so the stored coefficients
    /// never lag behind the stored points.
    pub fn replace_calibration(
        &mut self,
        calibration: CalibrationSet,
    ) -> Result<CalibrationCoefficients> {
        let coefficients = match calibration.try_fit() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, points = calibration.len(), "calibration rejected");
                return Err(LoadCellError::from(e).into());
            }
        };
        tracing::debug!(
            points = calibration.len(),
            slope = coefficients.slope,
            intercept = coefficients.intercept,
            "calibration refit"
        );
        self.calibration = calibration;
        self.coefficients = coefficients;
        Ok(coefficients)
    }

    /// Evaluate a voltage against this configuration.
    pub fn evaluate(&self, voltage: f64, sensor_connected: bool) -> Reading {
        evaluate(voltage, self.coefficients, self.max_load, sensor_connected)
    }

    /// Sensor voltage that would show `percent` of capacity.
    pub fn voltage_for_target_load(&self, percent: f64) -> f64 {
        voltage_for_target_load(percent, self.coefficients, self.max_load)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::factory()
    }
}

fn check_capacity(kg: f64) -> Result<()> {
    if !kg.is_finite() || kg <= 0.0 {
        return Err(LoadCellError::Capacity(format!("{kg} kg must be a positive number")).into());
    }
    Ok(())
}

/// Parse a capacity typed in tonnes (as on the device keypad) into kg.
pub fn parse_capacity_tons(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let tons: f64 = trimmed
        .parse()
        .map_err(|_| LoadCellError::Capacity(format!("'{trimmed}' is not a number")))?;
    if !tons.is_finite() || tons <= 0.0 {
        return Err(LoadCellError::Capacity(format!("{trimmed} t must be greater than zero")).into());
    }
    Ok(tons * KG_PER_TONNE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationPoint;
    use crate::error::CalibrationError;
    use crate::status::LoadStatus;

    #[test]
    fn factory_defaults() {
        let cfg = SystemConfig::default();
        assert_eq!(cfg.max_load(), 10_000.0);
        assert_eq!(cfg.coefficients().slope, 2500.0);
        assert_eq!(cfg.coefficients().intercept, -1250.0);
        assert_eq!(cfg.calibration().len(), 2);
    }

    #[test]
    fn replace_calibration_refits() {
        let mut cfg = SystemConfig::factory();
        let set = CalibrationSet::from_points(vec![
            CalibrationPoint::new(1, 1.0, 0.0),
            CalibrationPoint::new(2, 3.0, 4_000.0),
        ])
        .unwrap();
        let c = cfg.replace_calibration(set.clone()).unwrap();
        assert_eq!(c.slope, 2000.0);
        assert_eq!(c.intercept, -2000.0);
        assert_eq!(cfg.coefficients(), c);
        assert_eq!(cfg.calibration(), &set);
    }

    #[test]
    fn rejected_calibration_leaves_state_untouched() {
        let mut cfg = SystemConfig::factory();
        let before = cfg.clone();
        let set = CalibrationSet::from_points(vec![
            CalibrationPoint::new(1, 2.0, 0.0),
            CalibrationPoint::new(2, 2.0, 4_000.0),
        ])
        .unwrap();
        let err = cfg.replace_calibration(set).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoadCellError>(),
            Some(&LoadCellError::Calibration(
                CalibrationError::DegenerateVoltages(2.0)
            ))
        );
        assert_eq!(cfg, before);
    }

    #[test]
    fn empty_calibration_falls_back_to_identity() {
        let mut cfg = SystemConfig::factory();
        let c = cfg.replace_calibration(CalibrationSet::new()).unwrap();
        assert_eq!(c, CalibrationCoefficients::IDENTITY);
    }

    #[test]
    fn capacity_must_be_positive() {
        let mut cfg = SystemConfig::factory();
        assert!(cfg.set_max_load(0.0).is_err());
        assert!(cfg.set_max_load(-5.0).is_err());
        assert!(cfg.set_max_load(f64::NAN).is_err());
        assert_eq!(cfg.max_load(), 10_000.0);
        cfg.set_max_load(20_000.0).unwrap();
        assert_eq!(cfg.evaluate(2.5, true).status, LoadStatus::Normal);
        assert_eq!(cfg.evaluate(2.5, true).load_percentage, 25.0);
    }

    #[test]
    fn capacity_from_tonnes() {
        assert_eq!(parse_capacity_tons("12.5").unwrap(), 12_500.0);
        assert_eq!(parse_capacity_tons(" 3 ").unwrap(), 3_000.0);
        assert!(parse_capacity_tons("0").is_err());
        assert!(parse_capacity_tons("-1").is_err());
        assert!(parse_capacity_tons("abc").is_err());
        assert!(parse_capacity_tons("inf").is_err());
    }

    #[test]
    fn new_rejects_bad_capacity() {
        assert!(SystemConfig::new(0.0, CalibrationSet::factory()).is_err());
    }
}
