use apeye_lib::{ApiError, DispatchError};
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ApeyeError {
    Io(io::Error),
    FileNotFound(String),
    InvalidFile { path: String, message: String },
    Config(String),
    EnvironmentNotFound(String),
    InvalidVariable(String),
    Api(ApiError),
    Dispatch(DispatchError),
    Generic(String),
}

impl fmt::Display for ApeyeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApeyeError::Io(err) => write!(f, "IO error: {err}"),
            ApeyeError::FileNotFound(path) => write!(f, "File not found: {path}"),
            ApeyeError::InvalidFile { path, message } => write!(f, "Invalid file {path}: {message}"),
            ApeyeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ApeyeError::EnvironmentNotFound(name) => write!(f, "Environment not found: {name}"),
            ApeyeError::InvalidVariable(msg) => write!(f, "Invalid variable: {msg}"),
            ApeyeError::Api(err) => write!(f, "{err}"),
            ApeyeError::Dispatch(err) => write!(f, "{err}"),
            ApeyeError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApeyeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApeyeError::Io(err) => Some(err),
            ApeyeError::Api(err) => Some(err),
            ApeyeError::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ApeyeError {
    fn from(err: io::Error) -> Self {
        ApeyeError::Io(err)
    }
}

impl From<ApiError> for ApeyeError {
    fn from(err: ApiError) -> Self {
        ApeyeError::Api(err)
    }
}

impl From<DispatchError> for ApeyeError {
    fn from(err: DispatchError) -> Self {
        ApeyeError::Dispatch(err)
    }
}

impl From<String> for ApeyeError {
    fn from(msg: String) -> Self {
        ApeyeError::Generic(msg)
    }
}

impl From<&str> for ApeyeError {
    fn from(msg: &str) -> Self {
        ApeyeError::Generic(msg.to_string())
    }
}
