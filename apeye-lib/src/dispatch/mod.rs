pub mod dispatcher;
pub mod state;

pub use dispatcher::{Dispatched, Dispatcher, Executed, Route};
pub use state::{AppState, Notification, NotificationLevel};
