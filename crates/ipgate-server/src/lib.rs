//! Check-ip authorization service.
//!
//! Answers whether an IP is on the blocklist, in the shape the gate expects:
//! `{"blocked": true|false}`. The blocklist is read once at startup.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `HOST` | Listen address (default: `0.0.0.0`) |
//! | `PORT` | Listen port (default: `5000`) |
//! | `IPGATE_BLOCKLIST_FILE` | Blocklist file (default: `ip_blacklist.txt`) |
//! | `IPGATE_STATIC_DIR` | Directory served under `/static` |

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

pub mod blocklist;
pub mod config;
pub mod handlers;
pub mod router;

pub use blocklist::{parse_ip, Blocklist};
pub use config::{ConfigError, ServerConfig};
pub use handlers::{AppState, CheckIpResponse, ErrorResponse, HealthResponse};
pub use router::build_router;

/// Load the blocklist and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let blocklist = Blocklist::load(&config.blocklist_path);
    let app = build_router(AppState::new(blocklist), config.static_dir.as_deref());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(addr = %addr, "check-ip service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("check-ip service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
