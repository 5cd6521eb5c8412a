//! Indexer API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use relayarr_core::IndexerSummary;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IndexersResponse {
    pub indexers: Vec<IndexerSummary>,
}

/// GET /api/v1/indexers
pub async fn list_indexers(State(state): State<Arc<AppState>>) -> Json<IndexersResponse> {
    Json(IndexersResponse {
        indexers: state.processor().indexers(),
    })
}
