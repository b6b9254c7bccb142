//! System information screen.

use std::fmt;

use crate::config::SystemConfig;
use crate::util::fmt_fixed;

pub const FIRMWARE_VERSION: &str = "v2.1.0-stable";
pub const HARDWARE_ID: &str = "HW-992-XJ";

#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub firmware: &'static str,
    pub hardware_id: &'static str,
    pub slope: f64,
    pub intercept: f64,
    pub max_load_kg: f64,
    pub calibration_points: usize,
}

impl From<&SystemConfig> for SystemInfo {
    fn from(cfg: &SystemConfig) -> Self {
        let c = cfg.coefficients();
        Self {
            firmware: FIRMWARE_VERSION,
            hardware_id: HARDWARE_ID,
            slope: c.slope,
            intercept: c.intercept,
            max_load_kg: cfg.max_load(),
            calibration_points: cfg.calibration().len(),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FIRMWARE         {}", self.firmware)?;
        writeln!(f, "HARDWARE ID      {}", self.hardware_id)?;
        writeln!(f, "CAPACITY         {} t", fmt_fixed(self.max_load_kg / 1000.0, 3))?;
        writeln!(f, "CALIB POINTS     {}", self.calibration_points)?;
        writeln!(f, "CALIB SLOPE      {}", fmt_fixed(self.slope, 4))?;
        write!(f, "CALIB INTERCEPT  {}", fmt_fixed(self.intercept, 4))
    }
}
