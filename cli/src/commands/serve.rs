use crate::core::error::ApeyeError;
use apeye_lib::relay::{self, config, RelayConfig};
use clap::Args;
use tokio::signal;
use tracing::{info, warn};

#[derive(Debug, Args)]
#[command(about = "Run the proxy relay in front of the backend")]
pub struct ServeArgs {
    #[arg(long, env = "HOST", default_value = config::DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    #[arg(long = "backend-url", env = "BACKEND_URL", default_value = config::DEFAULT_BACKEND_URL)]
    pub backend_url: String,
}

impl From<&ServeArgs> for RelayConfig {
    fn from(args: &ServeArgs) -> Self {
        RelayConfig {
            host: args.host.clone(),
            port: args.port,
            backend_url: args.backend_url.clone(),
        }
    }
}

pub async fn execute_serve(args: &ServeArgs) -> Result<(), ApeyeError> {
    let config = RelayConfig::from(args);
    info!(
        version = apeye_lib::core::version::app_version(),
        host = %config.host,
        port = config.port,
        backend = config.backend_url(),
        "starting relay"
    );

    relay::serve(&config, shutdown_signal())
        .await
        .map_err(|e| ApeyeError::Config(format!("relay failed on {}:{}: {e}", config.host, config.port)))
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
