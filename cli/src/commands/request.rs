use crate::commands::shared::{
    active_environment_id, find_environment, read_json_file, BackendArgs, EnvSourceArgs,
    OutputArgs,
};
use crate::commands::validators;
use crate::core::error::ApeyeError;
use crate::core::formatter::{get_formatter, OutputFormat};
use crate::core::store::ActiveEnvironmentStore;
use apeye_lib::{
    classify, extract_variables, AppState, Dispatcher, NotificationLevel, RequestConfig,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a finished run waits for its history write before exiting.
const HISTORY_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Args)]
#[command(about = "Run and inspect requests")]
pub struct RequestCommand {
    #[command(subcommand)]
    pub command: RequestSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestSubcommand {
    #[command(about = "Send a request, directly for local targets or through the backend")]
    Run(RunArgs),
    #[command(about = "List the {{variables}} a request uses")]
    Vars(VarsArgs),
    #[command(about = "Tell whether a URL is sent directly (private) or proxied (public)")]
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
pub struct RequestFileArgs {
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Request config JSON file",
        value_parser = validators::validate_path_exists
    )]
    pub file: String,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub request: RequestFileArgs,

    #[arg(
        short = 'e',
        long = "env",
        alias = "environment",
        value_name = "NAME|ID",
        help = "Environment to resolve variables from (defaults to the active one)"
    )]
    pub environment: Option<String>,

    #[command(flatten)]
    pub env_source: EnvSourceArgs,

    #[arg(
        short = 'v',
        long = "variable",
        value_name = "NAME=VALUE",
        help = "Override a variable",
        value_parser = validators::validate_variable
    )]
    pub variable: Vec<String>,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct VarsArgs {
    #[command(flatten)]
    pub request: RequestFileArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(help = "URL to classify")]
    pub url: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
pub struct ClassificationView {
    pub url: String,
    pub target: &'static str,
}

/// Selects the persisted environment. A missing environment or a failed
/// fetch leaves the request without variables.
async fn select_stored_environment(state: &mut AppState, args: &RunArgs, stored_id: &str) {
    state.environments = match args.env_source.load(&args.backend).await {
        Ok(environments) => environments,
        Err(e) => {
            warn!(error = %e, "could not load environments, running without variables");
            return;
        }
    };
    match find_environment(&state.environments, stored_id) {
        Ok(environment) => {
            let id = environment.id.clone();
            debug!(environment = %id, "using active environment");
            state.set_active_environment(Some(id));
        }
        Err(_) => {
            warn!(environment = %stored_id, "active environment no longer exists, clearing it");
            if let Err(e) = ActiveEnvironmentStore::current_dir().clear() {
                warn!(error = %e, "could not clear active environment");
            }
        }
    }
}

pub async fn execute_run(args: &RunArgs) -> Result<(), ApeyeError> {
    let config: RequestConfig = read_json_file(Path::new(&args.request.file))?;
    let mut state = AppState::new(config);

    for variable in &args.variable {
        let (name, value) =
            validators::parse_variable(variable).map_err(ApeyeError::InvalidVariable)?;
        state.variable_overrides.insert(name, value);
    }

    if let Some(selection) = &args.environment {
        state.environments = args.env_source.load(&args.backend).await?;
        let id = find_environment(&state.environments, selection)?.id.clone();
        debug!(environment = %selection, "using environment");
        state.set_active_environment(Some(id));
    } else if let Some(stored_id) = active_environment_id()? {
        select_stored_environment(&mut state, args, &stored_id).await;
    }

    let dispatcher = Dispatcher::new(args.backend.client());
    let outcome = dispatcher.execute_request(&mut state).await;

    let show_notifications = args.output.output == OutputFormat::Text;
    for notification in state.take_notifications() {
        match notification.level {
            NotificationLevel::Error if show_notifications && outcome.is_ok() => {
                eprintln!("{}", notification.message)
            }
            NotificationLevel::Success => debug!("{}", notification.message),
            _ => {}
        }
    }

    if let Some(response) = &state.response {
        print!("{}", get_formatter(&args.output.output).format_response(response));
    }

    let executed = outcome?;
    // the runtime drops pending tasks on exit
    if let Some(history) = executed.history {
        if tokio::time::timeout(HISTORY_GRACE, history).await.is_err() {
            warn!("history write still pending at exit");
        }
    }
    Ok(())
}

pub fn execute_vars(args: &VarsArgs) -> Result<(), ApeyeError> {
    let config: RequestConfig = read_json_file(Path::new(&args.request.file))?;
    let mut names: Vec<String> = extract_variables(&config).into_iter().collect();
    names.sort();

    print!(
        "{}",
        get_formatter(&args.output.output).format_list(&names, "Variables:", "No variables found")
    );
    Ok(())
}

pub fn execute_classify(args: &ClassifyArgs) -> Result<(), ApeyeError> {
    let target = classify(&args.url);
    let view = ClassificationView {
        url: args.url.clone(),
        target: target.as_str(),
    };
    match args.output.output {
        OutputFormat::Text => println!("{}", view.target),
        OutputFormat::Json => print!("{}", get_formatter(&args.output.output).format(&view)),
    }
    Ok(())
}
