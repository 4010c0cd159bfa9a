use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use lens_remote::RemoteClient;
use lens_server::app_state::AppState;
use lens_server::config::Args;
use lens_server::transport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = RemoteClient::new(args.remote_config());
    tracing::info!(endpoint = %client.endpoint(), "Company Lens MCP proxy running on stdio");

    let state = AppState::new(Arc::new(client));
    let reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    tokio::select! {
        result = transport::serve(&state, reader, &mut stdout) => result?,
        () = shutdown_signal() => tracing::info!("Shutdown signal received"),
    }

    stdout.flush().await?;

    // A pending stdin read holds a blocking thread that runtime shutdown would wait on.
    std::process::exit(0)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
