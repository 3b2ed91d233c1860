use crate::core::error::ApeyeError;
use apeye_lib::{ApiError, DispatchError};

/// Process exit codes, following Unix conventions.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    /// Bad configuration, credentials or request setup
    ConfigError = 3,
    /// File missing, unreadable or malformed
    FileError = 4,
    NotFoundError = 5,
    /// Network or HTTP error
    NetworkError = 6,
    VariableError = 8,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<&ApiError> for ExitCode {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Unauthorized | ApiError::InvalidUrl(_) => ExitCode::ConfigError,
            ApiError::Status { status: 404, .. } => ExitCode::NotFoundError,
            ApiError::Network(_) | ApiError::Status { .. } | ApiError::Decode(_) => {
                ExitCode::NetworkError
            }
        }
    }
}

impl From<&ApeyeError> for ExitCode {
    fn from(error: &ApeyeError) -> Self {
        match error {
            ApeyeError::Io(_) | ApeyeError::FileNotFound(_) | ApeyeError::InvalidFile { .. } => {
                ExitCode::FileError
            }
            ApeyeError::Config(_) => ExitCode::ConfigError,
            ApeyeError::EnvironmentNotFound(_) => ExitCode::NotFoundError,
            ApeyeError::InvalidVariable(_) => ExitCode::VariableError,
            ApeyeError::Api(err) => ExitCode::from(err),
            ApeyeError::Dispatch(DispatchError::Backend(err)) => ExitCode::from(err),
            ApeyeError::Dispatch(DispatchError::EmptyUrl)
            | ApeyeError::Dispatch(DispatchError::InvalidRequest(_)) => ExitCode::ConfigError,
            ApeyeError::Generic(_) => ExitCode::GeneralError,
        }
    }
}
