mod handlers;
mod routes;

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::ledger::Ledger;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) ledger: Ledger,
}

/// Builds the full application: API routes nested under `prefix` (empty for
/// none), an enveloped 404 fallback, open CORS and request logging.
pub(crate) fn router(state: AppState, prefix: &str) -> Router {
    let api = routes::api_routes();
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    app.fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub(crate) async fn run_server(addr: SocketAddr, prefix: &str, ledger: Ledger) -> anyhow::Result<()> {
    let app = router(AppState { ledger }, prefix);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}{}", listener.local_addr()?, prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests;
