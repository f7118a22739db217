use thiserror::Error;

/// Custom error type for pinn-systems
///
/// This error type is used to wrap all possible errors that can occur when using pinn-systems
#[derive(Error, Debug)]
pub enum PinnSystemsError {
    #[error("System error: {0}")]
    SystemError(#[from] SystemError),
    #[error("Error: {0}")]
    Other(String),
}

/// Possible errors when constructing or evaluating a differential equation system
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Natural frequency must be positive, got omega0 = {omega0}")]
    NonPositiveNaturalFrequency { omega0: f64 },
    #[error("Parameter {name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    #[error("Error: {0}")]
    Other(String),
}

#[macro_export]
macro_rules! system_error {
    ($variant:ident) => {
        PinnSystemsError::from(SystemError::$variant)
    };
    ($variant:ident, $($arg:tt)*) => {
        PinnSystemsError::from(SystemError::$variant($($arg)*))
    };
}

#[macro_export]
macro_rules! other_error {
    ($msg:expr) => {
        PinnSystemsError::Other($msg.to_string())
    };
}
