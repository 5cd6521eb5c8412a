//! Reading definition files from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::{validate, Definition, DefinitionError, ValidDefinition};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported definition file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid definition in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DefinitionError,
    },

    #[error("Definition identifier '{identifier}' is used by both {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Parse a definition from YAML text.
pub fn parse_definition_yaml(text: &str) -> Result<Definition, String> {
    serde_yaml::from_str(text).map_err(|e| e.to_string())
}

/// Parse a definition from TOML text.
pub fn parse_definition_toml(text: &str) -> Result<Definition, String> {
    toml::from_str(text).map_err(|e| e.to_string())
}

fn is_definition_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml" | "toml")
    )
}

/// Load and validate one definition file (`.yaml`, `.yml` or `.toml`).
pub fn load_definition_file(path: &Path) -> Result<ValidDefinition, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => parse_definition_yaml(&text),
        Some("toml") => parse_definition_toml(&text),
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };
    let definition = parsed.map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    validate(definition).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every definition file in a directory, keyed by identifier.
///
/// Files with other extensions are skipped. Any invalid file fails the whole
/// load: a definition is never used half-validated.
pub fn load_definitions_dir(dir: &Path) -> Result<HashMap<String, Arc<ValidDefinition>>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_definition_file(p))
        .collect();
    paths.sort();

    let mut definitions = HashMap::new();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();

    for path in paths {
        let definition = load_definition_file(&path)?;
        let identifier = definition.identifier().to_string();
        if let Some(first) = origins.get(&identifier) {
            return Err(LoadError::DuplicateIdentifier {
                identifier,
                first: first.clone(),
                second: path,
            });
        }
        debug!(
            identifier = %identifier,
            patterns = definition.pattern_count(),
            path = %path.display(),
            "Loaded definition"
        );
        origins.insert(identifier.clone(), path);
        definitions.insert(identifier, Arc::new(definition));
    }

    info!(count = definitions.len(), dir = %dir.display(), "Definitions loaded");
    Ok(definitions)
}
