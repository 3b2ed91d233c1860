use crate::model::{ApiResponse, Environment, RequestConfig, SavedRequest};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient, user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Editable request, last response and environment selection of one client.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: RequestConfig,
    pub response: Option<ApiResponse>,
    pub is_loading: bool,
    pub environments: Vec<Environment>,
    pub active_environment_id: Option<String>,
    /// Values layered over the active environment's variables.
    pub variable_overrides: HashMap<String, String>,
    pub notifications: Vec<Notification>,
}

impl AppState {
    pub fn new(config: RequestConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn active_environment(&self) -> Option<&Environment> {
        let id = self.active_environment_id.as_deref()?;
        self.environments.iter().find(|env| env.id == id)
    }

    pub fn set_active_environment(&mut self, id: Option<String>) {
        self.active_environment_id = id;
    }

    /// Adds the environment, replacing one with the same id.
    pub fn upsert_environment(&mut self, environment: Environment) {
        match self
            .environments
            .iter_mut()
            .find(|env| env.id == environment.id)
        {
            Some(existing) => *existing = environment,
            None => self.environments.push(environment),
        }
    }

    /// Removes the environment and drops the selection if it was active.
    pub fn remove_environment(&mut self, id: &str) -> bool {
        let before = self.environments.len();
        self.environments.retain(|env| env.id != id);
        if self.active_environment_id.as_deref() == Some(id) {
            self.active_environment_id = None;
        }
        self.environments.len() != before
    }

    /// Variables in effect for the next dispatch.
    pub fn active_variables(&self) -> HashMap<String, String> {
        let mut variables = self
            .active_environment()
            .map(|env| env.variables.clone())
            .unwrap_or_default();
        variables.extend(
            self.variable_overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        variables
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn reset_request(&mut self) {
        self.config = RequestConfig::default();
        self.response = None;
    }

    pub fn load_saved_request(&mut self, saved: &SavedRequest) {
        self.config = RequestConfig::from_saved_request(saved);
        self.response = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str, vars: &[(&str, &str)]) -> Environment {
        Environment::new(
            name,
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_active_environment_lookup() {
        let mut state = AppState::default();
        let staging = env("staging", &[("host", "staging.example.com")]);
        let id = staging.id.clone();
        state.upsert_environment(staging);

        assert!(state.active_environment().is_none());
        state.set_active_environment(Some(id.clone()));
        assert_eq!(state.active_environment().unwrap().name, "staging");

        state.set_active_environment(Some("missing".into()));
        assert!(state.active_environment().is_none());
    }

    #[test]
    fn test_remove_active_environment_clears_selection() {
        let mut state = AppState::default();
        let a = env("a", &[]);
        let b = env("b", &[]);
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        state.upsert_environment(a);
        state.upsert_environment(b);

        state.set_active_environment(Some(b_id.clone()));
        assert!(state.remove_environment(&a_id));
        assert_eq!(state.active_environment_id.as_deref(), Some(b_id.as_str()));

        assert!(state.remove_environment(&b_id));
        assert!(state.active_environment_id.is_none());
        assert!(!state.remove_environment(&b_id));
    }

    #[test]
    fn test_overrides_win_over_environment() {
        let mut state = AppState::default();
        let dev = env("dev", &[("token", "from-env"), ("host", "localhost")]);
        state.set_active_environment(Some(dev.id.clone()));
        state.upsert_environment(dev);
        state
            .variable_overrides
            .insert("token".into(), "from-cli".into());

        let vars = state.active_variables();
        assert_eq!(vars["token"], "from-cli");
        assert_eq!(vars["host"], "localhost");
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut state = AppState::default();
        let mut dev = env("dev", &[]);
        state.upsert_environment(dev.clone());
        dev.name = "development".into();
        state.upsert_environment(dev);
        assert_eq!(state.environments.len(), 1);
        assert_eq!(state.environments[0].name, "development");
    }

    #[test]
    fn test_take_notifications_drains() {
        let mut state = AppState::default();
        state.notify(Notification::success("Request completed"));
        assert_eq!(state.take_notifications().len(), 1);
        assert!(state.notifications.is_empty());
    }
}
