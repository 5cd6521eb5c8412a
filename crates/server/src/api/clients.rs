//! Arr client API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use relayarr_core::{ArrKind, SystemStatus};
use serde::Serialize;
use tracing::warn;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub name: String,
    pub kind: ArrKind,
    pub host: String,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClientTestResponse {
    pub client: String,
    pub status: SystemStatus,
}

/// GET /api/v1/clients
///
/// All configured clients, including disabled ones.
pub async fn list_clients(State(state): State<Arc<AppState>>) -> Json<ClientsResponse> {
    Json(ClientsResponse {
        clients: state
            .config()
            .clients
            .iter()
            .map(|c| ClientSummary {
                name: c.name.clone(),
                kind: c.kind,
                host: c.host.clone(),
                enabled: c.enabled,
            })
            .collect(),
    })
}

/// POST /api/v1/clients/{name}/test
///
/// Check connectivity and credentials against the application's status
/// endpoint.
pub async fn test_client(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ClientTestResponse>, (StatusCode, Json<ErrorResponse>)> {
    let client = state.processor().client(&name).ok_or_else(|| {
        ErrorResponse::new(
            StatusCode::NOT_FOUND,
            format!("Client not found or disabled: {}", name),
        )
    })?;

    match client.test().await {
        Ok(status) => Ok(Json(ClientTestResponse {
            client: name,
            status,
        })),
        Err(e) => {
            warn!(client = %name, error = %e, "Client test failed");
            Err(ErrorResponse::new(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
