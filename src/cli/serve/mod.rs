//! Serve command - runs the API server until Ctrl+C or SIGTERM

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router_with_config;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::observability::init_metrics;
use crate::infrastructure::storage::DocumentStore;

/// Overrides for the configured listen address
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);

    logging::init_logging(&config.logging)?;

    let storage_config = config
        .storage
        .to_storage_config()
        .context("Invalid storage configuration")?;
    let store = DocumentStore::connect(&storage_config).await?;
    store.ping().await.context("Document store is unreachable")?;

    let state = crate::create_app_state(&store).await?;
    let metrics = init_metrics(&config.metrics);
    let app = create_router_with_config(state, &config, metrics);

    let addr = build_socket_addr(&config)?;
    info!("Starting NFL Predictions API on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server shutdown complete");

    Ok(())
}

impl ServeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid server.host '{}'", config.server.host))?;

    Ok(SocketAddr::from((ip, config.server.port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let mut config = AppConfig::default();
        let args = ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9000),
        };

        args.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_build_socket_addr() {
        let config = AppConfig::default();
        assert_eq!(build_socket_addr(&config).unwrap().to_string(), "0.0.0.0:8080");

        let mut config = AppConfig::default();
        config.server.host = "localhost:80".to_string();
        assert!(build_socket_addr(&config).is_err());
    }
}
