pub mod api;
pub mod backend;
pub mod direct;

pub use api::ApiClient;
pub use backend::{Backend, BackendFuture};
pub use direct::DirectExecutor;
