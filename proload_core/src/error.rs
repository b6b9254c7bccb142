use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("calibration voltages are all identical ({0} V); slope is undefined")]
    DegenerateVoltages(f64),
    #[error("calibration voltages are too close together to fit a slope")]
    IllConditioned,
    #[error("calibration point {id} has a non-finite voltage or weight")]
    NonFinite { id: u32 },
    #[error("duplicate calibration point id {0}")]
    DuplicateId(u32),
    #[error("unknown calibration point id {0}")]
    UnknownId(u32),
    #[error("no calibration point ids left to assign")]
    IdsExhausted,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadCellError {
    #[error("invalid capacity: {0}")]
    Capacity(String),
    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("sensor error: {0}")]
    Sensor(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
