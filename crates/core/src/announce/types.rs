//! Types for the announce module.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::arr::{ArrError, PushOutcome};
use crate::definition::{IndexerSettings, RenderError, SettingsError, ValidDefinition};
use crate::release::Release;

/// A configured tracker: a definition plus the operator's settings for it.
#[derive(Debug, Clone)]
pub struct Indexer {
    pub name: String,
    pub definition: Arc<ValidDefinition>,
    pub settings: IndexerSettings,
    pub enabled: bool,
}

/// Indexer overview for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct IndexerSummary {
    pub name: String,
    /// Definition identifier.
    pub definition: String,
    /// Human-readable tracker name from the definition.
    pub tracker: String,
    pub enabled: bool,
    pub pattern_count: usize,
    /// Names of settings that have a value.
    pub settings_configured: Vec<String>,
}

impl From<&Indexer> for IndexerSummary {
    fn from(indexer: &Indexer) -> Self {
        Self {
            name: indexer.name.clone(),
            definition: indexer.definition.identifier().to_string(),
            tracker: indexer.definition.name().to_string(),
            enabled: indexer.enabled,
            pattern_count: indexer.definition.pattern_count(),
            settings_configured: indexer.settings.configured().map(str::to_string).collect(),
        }
    }
}

/// Outcome of pushing one release to one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
    pub client: String,
    #[serde(flatten)]
    pub outcome: PushOutcome,
}

/// Everything that happened to one announce line.
///
/// The release and push reports are redacted: secret settings never appear
/// in them.
#[derive(Debug, Clone, Serialize)]
pub struct AnnounceResult {
    pub indexer: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
    pub pushes: Vec<PushReport>,
}

#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("Unknown indexer: {0}")]
    UnknownIndexer(String),

    #[error("Indexer is disabled: {0}")]
    IndexerDisabled(String),

    #[error("Indexer '{indexer}' references unknown definition '{definition}'")]
    UnknownDefinition { indexer: String, definition: String },

    #[error("Invalid settings for indexer '{indexer}': {source}")]
    Settings {
        indexer: String,
        #[source]
        source: SettingsError,
    },

    #[error("Failed to create client '{client}': {source}")]
    Client {
        client: String,
        #[source]
        source: ArrError,
    },

    #[error("Failed to render release for indexer '{indexer}': {source}")]
    Render {
        indexer: String,
        #[source]
        source: RenderError,
    },
}
