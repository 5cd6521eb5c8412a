//! Types for pushing releases to arr applications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::definition::IndexerSettings;
use crate::release::Release;

/// Downstream application family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrKind {
    Sonarr,
    Radarr,
    Lidarr,
    Readarr,
    Whisparr,
}

impl ArrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrKind::Sonarr => "sonarr",
            ArrKind::Radarr => "radarr",
            ArrKind::Lidarr => "lidarr",
            ArrKind::Readarr => "readarr",
            ArrKind::Whisparr => "whisparr",
        }
    }

    /// API path prefix served by this family.
    pub fn api_base(&self) -> &'static str {
        match self {
            ArrKind::Sonarr | ArrKind::Radarr | ArrKind::Whisparr => "api/v3",
            ArrKind::Lidarr | ArrKind::Readarr => "api/v1",
        }
    }
}

/// Result of one push attempt.
///
/// A rejection is the application's decision about the release (already
/// grabbed, quality cutoff met, ...), not a failure of the push. Only
/// [`PushOutcome::Error`] is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PushOutcome {
    Accepted,
    Rejected { reasons: Vec<String> },
    Unauthorized,
    Error { detail: String },
}

impl PushOutcome {
    pub fn is_retryable(&self) -> bool {
        matches!(self, PushOutcome::Error { .. })
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            PushOutcome::Accepted => "accepted",
            PushOutcome::Rejected { .. } => "rejected",
            PushOutcome::Unauthorized => "unauthorized",
            PushOutcome::Error { .. } => "error",
        }
    }

    /// Copy with secret setting values masked. Rejection reasons may echo the
    /// submitted download URL back.
    pub fn redacted(&self, settings: &IndexerSettings) -> PushOutcome {
        match self {
            PushOutcome::Rejected { reasons } => PushOutcome::Rejected {
                reasons: reasons.iter().map(|r| settings.redact(r)).collect(),
            },
            PushOutcome::Error { detail } => PushOutcome::Error {
                detail: settings.redact(detail),
            },
            other => other.clone(),
        }
    }
}

/// Release payload for the `release/push` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrRelease {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub size: u64,
    pub indexer: String,
    pub download_protocol: String,
    pub protocol: String,
    /// RFC 3339 timestamp.
    pub publish_date: String,
}

impl ArrRelease {
    pub fn from_release(release: &Release, publish_date: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            title: release.title.clone(),
            info_url: release.info_url.clone(),
            download_url: release.download_url.clone(),
            size: release.size_bytes().unwrap_or(0),
            indexer: release.indexer.clone(),
            download_protocol: release.protocol.as_str().to_string(),
            protocol: release.protocol.as_str().to_string(),
            publish_date: publish_date.to_rfc3339(),
        }
    }
}

/// One validation failure from a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadRequestResponse {
    pub property_name: String,
    pub error_message: String,
    pub error_code: String,
    pub attempted_value: serde_json::Value,
    pub severity: String,
}

impl fmt::Display for BadRequestResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attempted = match &self.attempted_value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        write!(
            f,
            "[{}: {}] {}: {} - got value: {}",
            self.severity, self.error_code, self.property_name, self.error_message, attempted
        )
    }
}

/// Body of a successful push response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushResponse {
    pub approved: bool,
    pub rejected: bool,
    pub temp_rejected: bool,
    pub rejections: Vec<String>,
}

/// Subset of `system/status` used for connectivity tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: Option<String>,
    pub version: String,
}

/// Errors from arr API calls other than pushes.
#[derive(Debug, Clone, Error)]
pub enum ArrError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Unauthorized: bad credentials")]
    Unauthorized,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// A downstream application that accepts pushed releases.
#[async_trait]
pub trait ArrClient: Send + Sync {
    /// Configured client name, for logs and reports.
    fn name(&self) -> &str;

    fn kind(&self) -> ArrKind;

    /// Push a release. Transport failures are reported as
    /// [`PushOutcome::Error`], never as a panic or hang.
    async fn push(&self, release: &Release) -> PushOutcome;

    /// Check connectivity and credentials.
    async fn test(&self) -> Result<SystemStatus, ArrError>;
}
