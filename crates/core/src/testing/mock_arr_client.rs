//! Mock arr client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::arr::{ArrClient, ArrError, ArrKind, PushOutcome, SystemStatus};
use crate::release::Release;

/// Mock implementation of the ArrClient trait.
///
/// Provides controllable behavior for testing:
/// - Track pushed releases for assertions
/// - Return a configured outcome
/// - Simulate slow applications
///
/// # Example
///
/// ```rust,ignore
/// use relayarr_core::testing::MockArrClient;
///
/// let client = MockArrClient::new("radarr");
/// client.set_outcome(PushOutcome::Unauthorized).await;
///
/// let outcome = client.push(&release).await;
///
/// assert_eq!(client.push_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockArrClient {
    name: String,
    kind: ArrKind,
    /// Releases pushed so far.
    pushes: Arc<RwLock<Vec<Release>>>,
    /// Outcome returned by every push.
    outcome: Arc<RwLock<PushOutcome>>,
    /// Simulated processing time.
    delay: Arc<RwLock<Duration>>,
    /// Result of `test()`; `None` means healthy.
    test_error: Arc<RwLock<Option<ArrError>>>,
}

impl MockArrClient {
    /// Create a mock Radarr that accepts everything.
    pub fn new(name: &str) -> Self {
        Self::with_kind(name, ArrKind::Radarr)
    }

    pub fn with_kind(name: &str, kind: ArrKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            pushes: Arc::new(RwLock::new(Vec::new())),
            outcome: Arc::new(RwLock::new(PushOutcome::Accepted)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            test_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the outcome returned by subsequent pushes.
    pub async fn set_outcome(&self, outcome: PushOutcome) {
        *self.outcome.write().await = outcome;
    }

    /// Delay every push by the given duration.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Make `test()` fail with the given error.
    pub async fn set_test_error(&self, error: ArrError) {
        *self.test_error.write().await = Some(error);
    }

    /// Get all pushed releases.
    pub async fn recorded_pushes(&self) -> Vec<Release> {
        self.pushes.read().await.clone()
    }

    /// Get the number of pushes performed.
    pub async fn push_count(&self) -> usize {
        self.pushes.read().await.len()
    }
}

#[async_trait]
impl ArrClient for MockArrClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ArrKind {
        self.kind
    }

    async fn push(&self, release: &Release) -> PushOutcome {
        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.pushes.write().await.push(release.clone());
        self.outcome.read().await.clone()
    }

    async fn test(&self) -> Result<SystemStatus, ArrError> {
        if let Some(error) = self.test_error.read().await.clone() {
            return Err(error);
        }
        Ok(SystemStatus {
            app_name: Some("Mock".to_string()),
            version: "0.0.0".to_string(),
        })
    }
}
