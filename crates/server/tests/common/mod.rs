//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock arr clients injected, enabling API testing without real
//! applications.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use relayarr_core::{
    load_config_from_str, testing::MockArrClient, AnnounceProcessor, ArrClient, ArrKind,
};
use relayarr_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use relayarr_core::testing::fixtures;

const CONFIG: &str = r#"
[[indexers]]
name = "pte"
definition = "polishtracker"
[indexers.settings]
rsskey = "ABC123"

[[indexers]]
name = "pte-off"
definition = "polishtracker"
enabled = false
[indexers.settings]
rsskey = "ABC123"

[[clients]]
name = "radarr"
kind = "radarr"
host = "http://localhost:7878"
api_key = "radarr-key"

[[clients]]
name = "sonarr"
kind = "sonarr"
host = "http://localhost:8989"
api_key = "sonarr-key"

[[clients]]
name = "lidarr"
kind = "lidarr"
host = "http://localhost:8686"
api_key = "lidarr-key"
enabled = false
"#;

/// Test fixture for E2E testing with mock arr clients.
///
/// The configuration lists three clients (one disabled) and two indexers
/// (one disabled). Pushes go to in-memory mocks named like the enabled
/// clients.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    pub radarr: Arc<MockArrClient>,
    pub sonarr: Arc<MockArrClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub async fn new() -> Self {
        let config = load_config_from_str(CONFIG).expect("Failed to parse config");

        let radarr = Arc::new(MockArrClient::with_kind("radarr", ArrKind::Radarr));
        let sonarr = Arc::new(MockArrClient::with_kind("sonarr", ArrKind::Sonarr));

        let mut pte_off = fixtures::polishtracker_indexer("ABC123");
        pte_off.name = "pte-off".to_string();
        pte_off.enabled = false;
        let mut pte = fixtures::polishtracker_indexer("ABC123");
        pte.name = "pte".to_string();

        let processor = AnnounceProcessor::new(
            vec![pte, pte_off],
            vec![
                Arc::clone(&radarr) as Arc<dyn ArrClient>,
                Arc::clone(&sonarr) as Arc<dyn ArrClient>,
            ],
        );

        let state = Arc::new(AppState::new(config, Arc::new(processor)));
        let router = create_router(state);

        Self {
            router,
            radarr,
            sonarr,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let request_builder = Request::builder().method(method).uri(path);

        let request = match body {
            Some(json) => request_builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => request_builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }
}
