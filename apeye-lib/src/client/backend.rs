use crate::core::error::ApiError;
use crate::model::{ApiResponse, NewHistoryEntry, RequestConfig};
use std::future::Future;
use std::pin::Pin;

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Server side of the client: proxied execution and history storage.
pub trait Backend: Send + Sync {
    /// Executes a request on the server's behalf, bypassing browser-style
    /// cross-origin restrictions.
    fn execute<'a>(&'a self, config: &'a RequestConfig) -> BackendFuture<'a, ApiResponse>;

    fn record_history<'a>(&'a self, entry: &'a NewHistoryEntry) -> BackendFuture<'a, ()>;
}
