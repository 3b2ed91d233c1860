use crate::commands::shared::{BackendArgs, OutputArgs};
use crate::core::error::ApeyeError;
use crate::core::formatter::get_formatter;
use apeye_lib::model::Collection;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args)]
#[command(about = "Browse saved collections")]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand)]
pub enum CollectionSubcommand {
    #[command(about = "List collections and their saved requests")]
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Serialize)]
pub struct CollectionView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub requests: Vec<String>,
}

impl From<&Collection> for CollectionView {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id.clone(),
            name: collection.name.clone(),
            description: collection.description.clone(),
            requests: collection
                .requests
                .iter()
                .map(|r| format!("{} {} ({})", r.method, r.url, r.name))
                .collect(),
        }
    }
}

pub async fn execute_list(args: &ListArgs) -> Result<(), ApeyeError> {
    let collections = args.backend.client().list_collections().await?;
    let views: Vec<CollectionView> = collections.iter().map(CollectionView::from).collect();

    print!(
        "{}",
        get_formatter(&args.output.output).format_list(
            &views,
            "Collections found:",
            "No collections found"
        )
    );
    Ok(())
}
