use super::state::{AppState, Notification};
use crate::classify::{classify, Target};
use crate::client::{Backend, DirectExecutor};
use crate::core::error::{DispatchError, ExecuteError};
use crate::model::{ApiResponse, NewHistoryEntry, RequestConfig};
use crate::variables::resolve_config;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const REQUEST_COMPLETED: &str = "Request completed";
pub const LOCAL_SERVER_UNREACHABLE: &str = "Cannot reach local server - see response for tips";
pub const CORS_BLOCKED: &str = "CORS Error - server is blocking requests";

/// Which side executed a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Direct,
    Proxied,
}

impl From<Target> for Route {
    fn from(target: Target) -> Self {
        match target {
            Target::Private => Route::Direct,
            Target::Public => Route::Proxied,
        }
    }
}

#[derive(Debug)]
pub struct Dispatched {
    pub route: Route,
    /// The config as sent, placeholders resolved.
    pub config: RequestConfig,
    pub response: ApiResponse,
    /// History recording started for a successful direct execution.
    /// Dropping the handle leaves the task running.
    pub history: Option<JoinHandle<()>>,
}

/// Outcome of [`Dispatcher::execute_request`]; the response lives in the state.
#[derive(Debug)]
pub struct Executed {
    pub route: Route,
    pub history: Option<JoinHandle<()>>,
}

/// Routes requests to the direct executor or the backend proxy.
pub struct Dispatcher<B> {
    direct: DirectExecutor,
    backend: Arc<B>,
}

impl<B: Backend + 'static> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self::with_executor(DirectExecutor::new(), Arc::new(backend))
    }

    pub fn with_executor(direct: DirectExecutor, backend: Arc<B>) -> Self {
        Self { direct, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn dispatch(
        &self,
        config: RequestConfig,
        variables: &HashMap<String, String>,
    ) -> Result<Dispatched, DispatchError> {
        let config = resolve_config(config, variables);
        let route = Route::from(classify(&config.url));
        debug!(url = %config.url, ?route, "dispatching request");

        match route {
            Route::Direct => match self.direct.execute(&config).await {
                Ok(response) => {
                    let history = self.spawn_history(&config, &response);
                    Ok(Dispatched {
                        route,
                        config,
                        response,
                        history: Some(history),
                    })
                }
                Err(ExecuteError::Network(message)) => {
                    warn!(url = %config.url, "local request failed: {message}");
                    Ok(Dispatched {
                        route,
                        config,
                        response: ApiResponse::network_error(),
                        history: None,
                    })
                }
                Err(ExecuteError::InvalidRequest(message)) => {
                    Err(DispatchError::InvalidRequest(message))
                }
            },
            Route::Proxied => {
                let response = self.backend.execute(&config).await?;
                Ok(Dispatched {
                    route,
                    config,
                    response,
                    history: None,
                })
            }
        }
    }

    /// Dispatches `state.config` and records the outcome in `state`.
    pub async fn execute_request(&self, state: &mut AppState) -> Result<Executed, DispatchError> {
        if state.config.url.trim().is_empty() {
            state.notify(Notification::error(DispatchError::EmptyUrl.to_string()));
            return Err(DispatchError::EmptyUrl);
        }

        state.is_loading = true;
        state.response = None;

        let variables = state.active_variables();
        let outcome = self.dispatch(state.config.clone(), &variables).await;
        state.is_loading = false;

        match outcome {
            Ok(dispatched) => {
                let message = if dispatched.response.is_network_error() {
                    Notification::error(LOCAL_SERVER_UNREACHABLE)
                } else {
                    Notification::success(REQUEST_COMPLETED)
                };
                state.response = Some(dispatched.response);
                state.notify(message);
                Ok(Executed {
                    route: dispatched.route,
                    history: dispatched.history,
                })
            }
            Err(err) => {
                let message = err.to_string();
                if message.contains("CORS") {
                    state.response = Some(ApiResponse::cors_blocked());
                    state.notify(Notification::error(CORS_BLOCKED));
                } else {
                    state.notify(Notification::error(message));
                }
                Err(err)
            }
        }
    }

    fn spawn_history(&self, config: &RequestConfig, response: &ApiResponse) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let entry = NewHistoryEntry::new(config, response);
        tokio::spawn(async move {
            match backend.record_history(&entry).await {
                Ok(()) => debug!(url = %entry.url, "history recorded"),
                Err(e) => warn!(url = %entry.url, "failed to save to history: {e}"),
            }
        })
    }
}
