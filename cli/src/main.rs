use clap::Parser;

mod commands;
mod core;

use commands::collection::CollectionSubcommand;
use commands::env::EnvSubcommand;
use commands::history::HistorySubcommand;
use commands::request::RequestSubcommand;
use commands::Commands;
use crate::core::error::ApeyeError;
use crate::core::exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "apeye")]
#[command(about = "API testing client: send requests, manage environments and history, run the proxy relay")]
#[command(version = apeye_lib::core::version::app_version())]
#[command(arg_required_else_help = true)]
struct Args {
    #[arg(short, long, help = "Enable debug logging", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    crate::core::logger::Logger::init(args.debug);

    if let Err(e) = run(args.command).await {
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::from(&e).code());
    }
}

async fn run(command: Commands) -> Result<(), ApeyeError> {
    match command {
        Commands::Request(request) => match request.command {
            RequestSubcommand::Run(args) => commands::request::execute_run(&args).await,
            RequestSubcommand::Vars(args) => commands::request::execute_vars(&args),
            RequestSubcommand::Classify(args) => commands::request::execute_classify(&args),
        },
        Commands::Env(env) => match env.command {
            EnvSubcommand::List(args) => commands::env::execute_list(&args).await,
            EnvSubcommand::Use(args) => commands::env::execute_use(&args).await,
            EnvSubcommand::Clear => commands::env::execute_clear(),
        },
        Commands::History(history) => match history.command {
            HistorySubcommand::List(args) => commands::history::execute_list(&args).await,
            HistorySubcommand::Delete(args) => commands::history::execute_delete(&args).await,
            HistorySubcommand::Clear(args) => commands::history::execute_clear(&args).await,
        },
        Commands::Collection(collection) => match collection.command {
            CollectionSubcommand::List(args) => commands::collection::execute_list(&args).await,
        },
        Commands::Serve(args) => commands::serve::execute_serve(&args).await,
    }
}
