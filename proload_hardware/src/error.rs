use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HwError {
    #[error("sensor disconnected")]
    Disconnected,
    #[error("injected voltage is not a number")]
    InvalidVoltage,
}

pub type Result<T> = std::result::Result<T, HwError>;
