use std::sync::Arc;

use relayarr_core::{AnnounceProcessor, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    processor: Arc<AnnounceProcessor>,
}

impl AppState {
    pub fn new(config: Config, processor: Arc<AnnounceProcessor>) -> Self {
        Self { config, processor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn processor(&self) -> &AnnounceProcessor {
        &self.processor
    }
}
