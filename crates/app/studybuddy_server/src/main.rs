//! StudyBuddy web server binary.
//!
//! Serves the web client, the client config endpoint and the chat proxy.

use std::path::PathBuf;

use clap::Parser;
use studybuddy_api::{AppState, config::ApiConfig};
use studybuddy_core::config::{ChatSettings, ClientConfig};
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "studybuddy_server", about = "StudyBuddy web server")]
struct Args {
    /// Interface to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory containing the web client bundle (`index.html` and assets).
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,studybuddy_api=debug,studybuddy_core=debug,tower_http=info",
                )
            }),
        )
        .init();

    let args = Args::parse();

    info!(
        version = studybuddy_core::version(),
        "starting StudyBuddy server"
    );

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        static_dir: args.static_dir,
        chat: ChatSettings::from_env()?,
        client: ClientConfig::from_env(),
    };
    config.log_summary();

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = studybuddy_api::router(AppState::new(config));

    info!(addr = %local_addr, "StudyBuddy server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
