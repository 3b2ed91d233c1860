pub mod collection;
pub mod env;
pub mod history;
pub mod request;
pub mod serve;
pub mod shared;
pub mod validators;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Request(request::RequestCommand),
    Env(env::EnvCommand),
    History(history::HistoryCommand),
    Collection(collection::CollectionCommand),
    Serve(serve::ServeArgs),
}
