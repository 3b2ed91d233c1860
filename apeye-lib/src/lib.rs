pub mod classify;
pub mod client;
pub mod core;
pub mod dispatch;
pub mod model;
pub mod relay;
pub mod variables;

pub use classify::{classify, is_private_url, Target};
pub use client::{ApiClient, Backend, DirectExecutor};
pub use crate::core::error::{ApiError, DispatchError, ExecuteError};
pub use dispatch::{
    AppState, Dispatched, Dispatcher, Executed, Notification, NotificationLevel, Route,
};
pub use model::{
    ApiResponse, Auth, Body, BodyType, Environment, HistoryEntry, HistoryFilter, HttpMethod,
    KeyValue, KeyValueField, NewHistoryEntry, RequestConfig, StatusFilter,
};
pub use variables::{extract_variables, resolve_config, resolve_string};
