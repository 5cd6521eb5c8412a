use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Indexer and client names are non-empty and unique
/// - Clients have an http(s) host, an API key and a non-zero timeout
///
/// Whether each indexer's definition exists is checked once definitions are
/// loaded.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for indexer in &config.indexers {
        if indexer.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "indexers[].name cannot be empty".to_string(),
            ));
        }
        if !names.insert(indexer.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate indexer name '{}'",
                indexer.name
            )));
        }
    }

    let mut names = HashSet::new();
    for client in &config.clients {
        if client.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "clients[].name cannot be empty".to_string(),
            ));
        }
        if !names.insert(client.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate client name '{}'",
                client.name
            )));
        }
        if !(client.host.starts_with("http://") || client.host.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "client '{}': host must start with http:// or https://",
                client.name
            )));
        }
        if client.api_key.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "client '{}': api_key cannot be empty",
                client.name
            )));
        }
        if client.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "client '{}': timeout_secs cannot be 0",
                client.name
            )));
        }
    }

    Ok(())
}
