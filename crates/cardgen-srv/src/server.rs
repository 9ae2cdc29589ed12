//! HTTP server runner: builds the router, binds TCP and serves until
//! shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::{auth, handlers, rate_limit, SrvError};

/// How often idle clients are dropped from the rate limiter.
const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the router with public and protected routes.
///
/// Protected routes pass the rate limiter first, then the bearer check.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/cards", get(handlers::cards))
        .route("/v1/scenarios", get(handlers::scenarios))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_by_ip,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, config: ServerConfig, shutdown: F) -> crate::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(config)?;
    let addr = listener.local_addr()?;
    let app = build_router(state.clone());
    let pruner = tokio::spawn(prune_limiter(state));

    info!(addr = %addr, "cardgen-srv listening");
    info!("endpoints: GET /health, GET /v1/cards (protected), GET /v1/scenarios (protected)");
    warn!("fixture server is for test and sandbox use only");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;
    pruner.abort();
    served?;

    info!("cardgen-srv stopped");
    Ok(())
}

async fn prune_limiter(state: AppState) {
    let mut ticker = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
    loop {
        ticker.tick().await;
        let tracked = state.prune_limiter();
        debug!(tracked, "pruned rate limiter");
    }
}

/// Start the server with the given configuration and run until Ctrl-C.
pub async fn run(config: ServerConfig) -> crate::Result<()> {
    config.validate()?;

    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|e| SrvError::Server(format!("TCP bind {}: {e}", config.listen)))?;

    serve(listener, config, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
