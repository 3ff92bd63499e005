//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::core::{Config, Result, ServerState};
use crate::services::HttpService;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!(
            port = self.config.http_port,
            backend = ?self.config.store_backend,
            id_strategy = ?self.config.id_strategy,
            environment = %self.config.environment,
            "Catalog server starting"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        HttpService::new(self.config.clone())
            .start_server(self.state.clone(), shutdown)
            .await
    }
}
