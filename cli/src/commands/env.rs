use crate::commands::shared::{
    active_environment_id, find_environment, BackendArgs, EnvSourceArgs, OutputArgs,
};
use crate::core::error::ApeyeError;
use crate::core::formatter::get_formatter;
use crate::core::store::ActiveEnvironmentStore;
use apeye_lib::Environment;
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::debug;

#[derive(Args)]
#[command(name = "env")]
#[command(about = "Manage environments")]
pub struct EnvCommand {
    #[command(subcommand)]
    pub command: EnvSubcommand,
}

#[derive(Subcommand)]
pub enum EnvSubcommand {
    #[command(about = "List environments")]
    List(ListArgs),
    #[command(about = "Select the environment used by 'request run'")]
    Use(UseArgs),
    #[command(about = "Clear the selected environment")]
    Clear,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub env_source: EnvSourceArgs,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct UseArgs {
    #[arg(help = "Environment name or id")]
    pub environment: String,

    #[command(flatten)]
    pub env_source: EnvSourceArgs,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Serialize)]
pub struct EnvironmentView {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub variables: Vec<String>,
}

impl EnvironmentView {
    fn new(env: &Environment, active_id: Option<&str>) -> Self {
        let mut variables: Vec<String> = env.variables.keys().cloned().collect();
        variables.sort();
        Self {
            id: env.id.clone(),
            name: env.name.clone(),
            active: active_id == Some(env.id.as_str()),
            variables,
        }
    }
}

pub async fn execute_list(args: &ListArgs) -> Result<(), ApeyeError> {
    let environments = args.env_source.load(&args.backend).await?;
    let active = active_environment_id()?;

    let views: Vec<EnvironmentView> = environments
        .iter()
        .map(|env| EnvironmentView::new(env, active.as_deref()))
        .collect();

    print!(
        "{}",
        get_formatter(&args.output.output).format_list(
            &views,
            "Environments found:",
            "No environments found"
        )
    );
    Ok(())
}

pub async fn execute_use(args: &UseArgs) -> Result<(), ApeyeError> {
    let environments = args.env_source.load(&args.backend).await?;
    let environment = find_environment(&environments, &args.environment)?;

    let store = ActiveEnvironmentStore::current_dir();
    store.save(&environment.id)?;
    debug!(path = %store.path().display(), "saved active environment");
    println!("Active environment: {} ({})", environment.name, environment.id);
    Ok(())
}

pub fn execute_clear() -> Result<(), ApeyeError> {
    ActiveEnvironmentStore::current_dir().clear()?;
    println!("Active environment cleared");
    Ok(())
}
