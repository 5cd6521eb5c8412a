//! HTTP push adapter for arr applications.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::config::ArrClientConfig;
use crate::metrics;
use crate::release::Release;

use super::{interpret, ArrClient, ArrError, ArrKind, ArrRelease, PushOutcome, SystemStatus};

/// Arr client talking to the application's HTTP API.
///
/// The same adapter serves every family; [`ArrKind`] selects the API version
/// prefix.
pub struct ArrHttpClient {
    client: Client,
    config: ArrClientConfig,
}

impl ArrHttpClient {
    /// Create a new client. The request timeout bounds the whole push,
    /// including the time the application spends processing the release.
    pub fn new(config: ArrClientConfig) -> Result<Self, ArrError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArrError::ConnectionFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.host.trim_end_matches('/'),
            self.config.kind.api_base(),
            path
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Api-Key", &self.config.api_key);
        match &self.config.basic_auth {
            Some(auth) => request.basic_auth(&auth.username, Some(&auth.password)),
            None => request,
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("no response within {}s", self.config.timeout_secs)
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            format!("request failed: {}", e)
        }
    }

    async fn send_push(&self, payload: &ArrRelease) -> PushOutcome {
        let request = self.authorize(self.client.post(self.endpoint("release/push")).json(payload));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return PushOutcome::Error {
                    detail: self.transport_error(&e),
                }
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return PushOutcome::Error {
                    detail: format!("failed to read response body: {}", e),
                }
            }
        };

        // Bodies can echo the download URL, so only their length is logged.
        debug!(
            client = %self.config.name,
            status,
            body_len = body.len(),
            "release/push response"
        );

        interpret(status, &body)
    }
}

#[async_trait]
impl ArrClient for ArrHttpClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn kind(&self) -> ArrKind {
        self.config.kind
    }

    async fn push(&self, release: &Release) -> PushOutcome {
        let payload = ArrRelease::from_release(release, Utc::now());
        let start = Instant::now();

        let outcome = self.send_push(&payload).await;

        metrics::PUSH_DURATION
            .with_label_values(&[&self.config.name])
            .observe(start.elapsed().as_secs_f64());

        outcome
    }

    async fn test(&self) -> Result<SystemStatus, ArrError> {
        let request = self.authorize(self.client.get(self.endpoint("system/status")));

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ArrError::Timeout
            } else if e.is_connect() {
                ArrError::ConnectionFailed(e.to_string())
            } else {
                ArrError::ApiError(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ArrError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArrError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ArrError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}
