pub mod auth;
pub mod body;
pub mod collection;
pub mod environment;
pub mod history;
pub mod http_method;
pub mod key_value;
pub mod request_config;
pub mod response;

pub use auth::Auth;
pub use body::{Body, BodyType};
pub use collection::{
    Collection, CreateCollectionInput, SaveRequestInput, SavedRequest, UpdateCollectionInput,
};
pub use environment::{CreateEnvironmentInput, Environment, UpdateEnvironmentInput};
pub use history::{HistoryEntry, HistoryFilter, NewHistoryEntry, StatusFilter};
pub use http_method::HttpMethod;
pub use key_value::{KeyValue, KeyValueField};
pub use request_config::RequestConfig;
pub use response::ApiResponse;
