//! Conversions from `proload_config` types to `proload_core` types.

use crate::calibration::{CalibrationPoint, CalibrationSet};
use crate::config::{KG_PER_TONNE, SystemConfig};
use crate::error::{LoadCellError, Report};

// ── Calibration ──────────────────────────────────────────────────────────────

impl From<&proload_config::CalibrationRow> for CalibrationPoint {
    fn from(r: &proload_config::CalibrationRow) -> Self {
        Self::new(r.id, r.voltage, r.weight)
    }
}

impl TryFrom<&[proload_config::CalibrationRow]> for CalibrationSet {
    type Error = LoadCellError;
    fn try_from(rows: &[proload_config::CalibrationRow]) -> Result<Self, Self::Error> {
        let points = rows.iter().map(CalibrationPoint::from).collect();
        Ok(Self::from_points(points)?)
    }
}

// ── SystemConfig ─────────────────────────────────────────────────────────────

impl TryFrom<&proload_config::Config> for SystemConfig {
    type Error = Report;
    fn try_from(c: &proload_config::Config) -> Result<Self, Self::Error> {
        let set = CalibrationSet::try_from(c.calibration.points.as_slice())?;
        Self::new(c.capacity.max_load_t * KG_PER_TONNE, set)
    }
}
