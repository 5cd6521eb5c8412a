use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::middleware::metrics_middleware;
use super::{announce, clients, handlers, indexers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Indexers and their definitions
        .route("/indexers", get(indexers::list_indexers))
        // Announce lines
        .route("/parse", post(announce::parse))
        .route("/announce", post(announce::announce))
        // Arr clients
        .route("/clients", get(clients::list_clients))
        .route("/clients/{name}/test", post(clients::test_client))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(metrics_middleware)),
    )
}
