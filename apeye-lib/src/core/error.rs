use std::fmt;

/// Failure of a request executed directly against its target.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteError {
    /// The target could not be reached or the exchange broke off.
    Network(String),
    /// The request could not be built (bad URL, header, or body).
    InvalidRequest(String),
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteError::Network(msg) => write!(f, "Network error: {msg}"),
            ExecuteError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
        }
    }
}

impl std::error::Error for ExecuteError {}

impl From<reqwest::Error> for ExecuteError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            ExecuteError::InvalidRequest(error.to_string())
        } else {
            ExecuteError::Network(error.to_string())
        }
    }
}

/// Failure talking to the backend REST API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    Unauthorized,
    Status { status: u16, message: String },
    Decode(String),
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
            ApiError::Unauthorized => write!(f, "Session expired or missing, please sign in"),
            ApiError::Status { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::Decode(msg) => write!(f, "Unexpected backend response: {msg}"),
            ApiError::InvalidUrl(url) => write!(f, "Invalid backend URL: {url}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

/// Failure of a dispatched request that the caller has to surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    EmptyUrl,
    InvalidRequest(String),
    Backend(ApiError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::EmptyUrl => write!(f, "Please enter a URL"),
            DispatchError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            DispatchError::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for DispatchError {
    fn from(err: ApiError) -> Self {
        DispatchError::Backend(err)
    }
}
