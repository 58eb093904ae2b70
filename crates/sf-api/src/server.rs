//! Server configuration and startup

use serde::{Deserialize, Serialize};
use sf_core::{Error, Result};
use std::env;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::router;
use crate::state::AppState;

/// Address the API binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Create configuration from `STYLE_FINDER_HOST` and `STYLE_FINDER_PORT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("STYLE_FINDER_HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("STYLE_FINDER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                Error::Configuration(format!("STYLE_FINDER_PORT is not a valid port: {}", raw))
            })?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    info!(address = %listener.local_addr()?, "Style-Finder API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
