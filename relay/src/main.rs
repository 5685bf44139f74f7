//! Signal Relay - webhook-to-Telegram alert forwarder.
//!
//! Receives TradingView-style JSON alerts on `/webhook`, authenticates them
//! with a shared secret, formats them as HTML, and relays them to one fixed
//! Telegram chat. Stateless; every request is handled independently.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::web::{health, webhook, AppState};
use relay::{Config, Telegram};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_starting");

    // Load configuration; missing required values abort startup
    let config = Config::from_env().context("Invalid configuration")?;
    info!(
        port = config.port,
        chat_id = %config.chat_id,
        relay_timeout_ms = config.relay_timeout_ms,
        secret_configured = !config.webhook_secret.is_empty(),
        "config_loaded"
    );

    // Create the Telegram client
    let telegram = Telegram::new(
        &config.bot_token,
        config.chat_id.clone(),
        Duration::from_millis(config.relay_timeout_ms),
    );

    // Create application state
    let state = AppState::new(config.clone(), telegram);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}
