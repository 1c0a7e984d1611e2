// File: server.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ConfigParameter;
use crate::error::{ServerError, ServerResult};
use crate::handlers::{self, AppState};

pub const INDEX_DOCUMENT: &str = "index.html";

/// Assets under `root`; unknown paths get the root's index document.
pub fn frontend(root: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(root).fallback(ServeFile::new(root.join(INDEX_DOCUMENT)))
}

// Only uploads are capped; JSON scan bodies are always read in full.
pub fn router(state: AppState, config: &ConfigParameter) -> Router {
    Router::new()
        .route(
            "/api/analyze-text",
            post(handlers::analyze_text).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/analyze-screenshot",
            post(handlers::analyze_screenshot)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes())),
        )
        .route(
            "/api/analyze-website",
            post(handlers::analyze_website).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/history", get(handlers::history))
        .route("/api/stats", get(handlers::stats))
        .fallback_service(frontend(config.static_dir()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn listen_addr(config: &ConfigParameter) -> ServerResult<SocketAddr> {
    let ip: IpAddr = config.host().parse().map_err(|_| ServerError::Address {
        host: config.host().to_string(),
        port: config.port(),
    })?;
    Ok(SocketAddr::new(ip, config.port()))
}

pub async fn serve(config: &ConfigParameter, state: AppState) -> ServerResult<()> {
    let addr = listen_addr(config)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(
        "Listening on http://{} (assets from {})",
        addr,
        config.static_dir().display()
    );

    axum::serve(listener, router(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
