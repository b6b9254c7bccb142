//! Simulated load-cell sensor.
//!
//! The simulator's control panel moves a voltage "injector" and toggles the
//! wireless link; the indicator reads through `proload_traits::VoltageSource`.
pub mod error;

use proload_traits::{SENSOR_MAX_V, SENSOR_MIN_V, SensorError, VoltageSource};
use std::cell::Cell;
use std::rc::Rc;

use crate::error::{HwError, Result};

/// Default paired sensor.
pub const DEFAULT_DEVICE: &str = "ProSensor-X1";

/// Shared handle to the injected voltage. Clones control the same sensor.
#[derive(Clone, Debug)]
pub struct Injector {
    volts: Rc<Cell<f64>>,
}

impl Injector {
    /// Move the injector. Values outside the sensor range saturate.
    pub fn set(&self, volts: f64) -> Result<f64> {
        if volts.is_nan() {
            return Err(HwError::InvalidVoltage);
        }
        let v = volts.clamp(SENSOR_MIN_V, SENSOR_MAX_V);
        if v != volts {
            tracing::debug!(requested = volts, applied = v, "injector saturated");
        }
        self.volts.set(v);
        Ok(v)
    }

    pub fn get(&self) -> f64 {
        self.volts.get()
    }
}

/// Simulated sensor
pub struct SimulatedSensor {
    injector: Injector,
    device: Option<String>,
}

impl SimulatedSensor {
    /// Connected to [`DEFAULT_DEVICE`] with the injector at the bottom of the range.
    pub fn new() -> Self {
        Self {
            injector: Injector {
                volts: Rc::new(Cell::new(SENSOR_MIN_V)),
            },
            device: Some(DEFAULT_DEVICE.to_string()),
        }
    }

    pub fn with_device(mut self, name: impl Into<String>) -> Self {
        self.device = Some(name.into());
        self
    }

    pub fn disconnected(mut self) -> Self {
        self.device = None;
        self
    }

    pub fn injector(&self) -> Injector {
        self.injector.clone()
    }

    pub fn set_voltage(&mut self, volts: f64) -> Result<f64> {
        self.injector.set(volts)
    }

    pub fn connect(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::info!(device = %name, "sensor connected");
        self.device = Some(name);
    }

    pub fn disconnect(&mut self) {
        if let Some(name) = self.device.take() {
            tracing::info!(device = %name, "sensor disconnected");
        }
    }

    /// Flip the link; reconnecting pairs with [`DEFAULT_DEVICE`].
    pub fn toggle_connection(&mut self) -> bool {
        if self.device.is_some() {
            self.disconnect();
        } else {
            self.connect(DEFAULT_DEVICE);
        }
        self.device.is_some()
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl VoltageSource for SimulatedSensor {
    fn read_voltage(&mut self) -> std::result::Result<f64, SensorError> {
        if self.device.is_none() {
            return Err(Box::new(HwError::Disconnected));
        }
        let v = self.injector.get();
        tracing::trace!(volts = v, "simulated sensor read");
        Ok(v)
    }

    fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    fn device_name(&self) -> Option<&str> {
        self.device.as_deref()
    }
}
