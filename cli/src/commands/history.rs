use crate::commands::shared::{BackendArgs, OutputArgs};
use crate::commands::validators;
use crate::core::error::ApeyeError;
use crate::core::formatter::get_formatter;
use apeye_lib::client::api::DEFAULT_HISTORY_LIMIT;
use apeye_lib::{HistoryEntry, HistoryFilter, HttpMethod, StatusFilter};
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args)]
#[command(about = "Browse and clear request history")]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    #[command(about = "List recent requests")]
    List(ListArgs),
    #[command(about = "Delete one history entry")]
    Delete(DeleteArgs),
    #[command(about = "Delete all history")]
    Clear(ClearArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(
        long,
        default_value_t = DEFAULT_HISTORY_LIMIT,
        value_parser = validators::validate_limit,
        help = "Number of entries to fetch"
    )]
    pub limit: usize,

    #[arg(
        short = 'm',
        long,
        value_parser = parse_method,
        help = "Only show this HTTP method"
    )]
    pub method: Option<HttpMethod>,

    #[arg(
        long,
        default_value = "all",
        value_parser = parse_status,
        help = "all, success (2xx) or error"
    )]
    pub status: StatusFilter,

    #[arg(short = 'q', long, default_value = "", help = "Only URLs containing this text")]
    pub search: String,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "History entry id")]
    pub id: String,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Args)]
pub struct ClearArgs {
    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Serialize)]
pub struct HistoryView {
    pub id: String,
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&HistoryEntry> for HistoryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            method: entry.method,
            url: entry.url.clone(),
            status: entry.status_code,
            time_ms: entry.response_time,
            created_at: entry
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

fn parse_method(s: &str) -> Result<HttpMethod, String> {
    HttpMethod::parse(s).ok_or_else(|| format!("Unknown HTTP method: {s}"))
}

fn parse_status(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(s).ok_or_else(|| format!("Unknown status filter: {s}"))
}

pub async fn execute_list(args: &ListArgs) -> Result<(), ApeyeError> {
    let entries = args.backend.client().list_history(args.limit).await?;
    let filter = HistoryFilter {
        method: args.method,
        status: args.status,
        search_query: args.search.clone(),
    };

    let views: Vec<HistoryView> = filter
        .apply(&entries)
        .into_iter()
        .map(HistoryView::from)
        .collect();

    print!(
        "{}",
        get_formatter(&args.output.output).format_list(&views, "", "No history found")
    );
    Ok(())
}

pub async fn execute_delete(args: &DeleteArgs) -> Result<(), ApeyeError> {
    args.backend.client().delete_history(&args.id).await?;
    println!("History entry deleted");
    Ok(())
}

pub async fn execute_clear(args: &ClearArgs) -> Result<(), ApeyeError> {
    args.backend.client().clear_history().await?;
    println!("History cleared");
    Ok(())
}
