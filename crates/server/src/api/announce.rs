//! Announce API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use relayarr_core::{AnnounceError, AnnounceResult, Release};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnnounceRequest {
    /// Configured indexer name.
    pub indexer: String,
    /// Raw announce line as seen on the channel.
    pub line: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub indexer: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
}

fn error_response(e: AnnounceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        AnnounceError::UnknownIndexer(_) => StatusCode::NOT_FOUND,
        AnnounceError::IndexerDisabled(_) => StatusCode::CONFLICT,
        _ => {
            error!(error = %e, "Announce processing failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    ErrorResponse::new(status, e.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/parse
///
/// Match a line without pushing anything. Secrets in the release are masked.
pub async fn parse(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnnounceRequest>,
) -> Result<Json<ParseResponse>, (StatusCode, Json<ErrorResponse>)> {
    let release = state
        .processor()
        .dry_run(&body.indexer, &body.line)
        .map_err(error_response)?;

    Ok(Json(ParseResponse {
        indexer: body.indexer,
        matched: release.is_some(),
        release,
    }))
}

/// POST /api/v1/announce
///
/// Match a line and push the release to every enabled client.
pub async fn announce(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnnounceRequest>,
) -> Result<Json<AnnounceResult>, (StatusCode, Json<ErrorResponse>)> {
    state
        .processor()
        .announce(&body.indexer, &body.line)
        .await
        .map(Json)
        .map_err(error_response)
}
