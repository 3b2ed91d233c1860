use crate::commands::validators;
use crate::core::error::ApeyeError;
use crate::core::formatter::OutputFormat;
use crate::core::store::ActiveEnvironmentStore;
use apeye_lib::{ApiClient, Environment};
use clap::Args;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api/proxy";

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long = "output",
        help = "Output format: text or json",
        default_value_t = OutputFormat::Text,
        value_enum,
        ignore_case = true
    )]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct BackendArgs {
    #[arg(
        long = "backend",
        env = "APEYE_BACKEND_URL",
        default_value = DEFAULT_BACKEND_URL,
        help = "Backend API base URL"
    )]
    pub backend_url: String,

    #[arg(
        long = "cookie",
        env = "APEYE_SESSION_COOKIE",
        hide_env_values = true,
        help = "Session cookie sent to the backend, e.g. session=abc"
    )]
    pub cookie: Option<String>,
}

impl BackendArgs {
    pub fn client(&self) -> ApiClient {
        let client = ApiClient::new(&self.backend_url);
        match &self.cookie {
            Some(cookie) => client.with_cookie(cookie),
            None => client,
        }
    }
}

#[derive(Debug, Args)]
pub struct EnvSourceArgs {
    #[arg(
        long = "env-file",
        value_name = "FILE",
        help = "JSON file with a list of environments, instead of the backend",
        value_parser = validators::validate_path_exists
    )]
    pub env_file: Option<String>,
}

impl EnvSourceArgs {
    pub async fn load(&self, backend: &BackendArgs) -> Result<Vec<Environment>, ApeyeError> {
        match &self.env_file {
            Some(path) => read_json_file(Path::new(path)),
            None => {
                debug!(backend = %backend.backend_url, "fetching environments");
                Ok(backend.client().list_environments().await?)
            }
        }
    }
}

/// Finds an environment by id or case-insensitive name.
pub fn find_environment<'a>(
    environments: &'a [Environment],
    id_or_name: &str,
) -> Result<&'a Environment, ApeyeError> {
    environments
        .iter()
        .find(|env| env.id == id_or_name)
        .or_else(|| environments.iter().find(|env| env.matches(id_or_name)))
        .ok_or_else(|| ApeyeError::EnvironmentNotFound(id_or_name.to_string()))
}

pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ApeyeError> {
    if !path.exists() {
        return Err(ApeyeError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ApeyeError::InvalidFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn active_environment_id() -> Result<Option<String>, ApeyeError> {
    ActiveEnvironmentStore::current_dir().load()
}
