//! Seams between the indicator core and whatever produces sensor voltages.

/// Lower end of the sensor's operating output range (V).
pub const SENSOR_MIN_V: f64 = 0.4;
/// Upper end of the sensor's operating output range (V).
pub const SENSOR_MAX_V: f64 = 4.7;

pub type SensorError = Box<dyn std::error::Error + Send + Sync>;

/// A load-cell front end that yields an amplified bridge voltage.
pub trait VoltageSource {
    /// Current sensor output in volts.
    fn read_voltage(&mut self) -> Result<f64, SensorError>;

    /// Whether the sensor link is up. A disconnected sensor reports no load.
    fn is_connected(&self) -> bool;

    /// Name of the paired sensor, if any.
    fn device_name(&self) -> Option<&str> {
        None
    }
}

impl<T: VoltageSource + ?Sized> VoltageSource for Box<T> {
    fn read_voltage(&mut self) -> Result<f64, SensorError> {
        (**self).read_voltage()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn device_name(&self) -> Option<&str> {
        (**self).device_name()
    }
}
