//! Axum HTTP server for the LinkScout API and audit page.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use linkscout_core::catalogue::Catalogue;
use linkscout_core::compare::ProductComparator;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Shared, read-only application state. The catalogue is loaded once
/// at startup; every comparison re-fetches from scratch.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub comparator: Arc<ProductComparator>,
}

impl AppState {
    pub fn new(catalogue: Catalogue, comparator: ProductComparator) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            comparator: Arc::new(comparator),
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/products", get(handlers::products))
        .route("/compare", post(handlers::compare))
        .route("/compare-all", post(handlers::compare_all))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until ctrl-c.
pub async fn serve(listen_addr: &str, state: AppState) -> Result<()> {
    let addr: SocketAddr = listen_addr.parse().context("Invalid listen address")?;

    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .context("Failed to bind HTTP server")?;

    info!("LinkScout listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("HTTP server shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
