//! Per-indexer settings resolved against a definition's settings schema.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use super::{SettingDefinition, SettingKind};

const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("required setting '{0}' is not configured")]
    MissingRequired(String),
}

#[derive(Clone, PartialEq, Eq)]
struct SettingValue {
    kind: SettingKind,
    value: Option<String>,
}

/// Operator-supplied setting values for one indexer.
///
/// Every name in the definition's schema is present, with the supplied value,
/// the schema default, or no value at all. Secret values never appear in the
/// `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IndexerSettings {
    entries: BTreeMap<String, SettingValue>,
}

impl IndexerSettings {
    /// Resolve supplied values against a settings schema.
    ///
    /// Empty strings count as unset. Keys the schema does not declare are
    /// ignored.
    pub fn resolve(
        schema: &[SettingDefinition],
        supplied: &BTreeMap<String, String>,
    ) -> Result<Self, SettingsError> {
        let mut entries = BTreeMap::new();

        for setting in schema {
            let value = supplied
                .get(&setting.name)
                .filter(|v| !v.is_empty())
                .or(setting.default.as_ref())
                .cloned();

            if setting.required && value.is_none() {
                return Err(SettingsError::MissingRequired(setting.name.clone()));
            }

            entries.insert(
                setting.name.clone(),
                SettingValue {
                    kind: setting.kind,
                    value,
                },
            );
        }

        for key in supplied.keys() {
            if !entries.contains_key(key) {
                warn!(setting = %key, "Ignoring setting not declared by definition");
            }
        }

        Ok(Self { entries })
    }

    /// Build settings directly from `(name, kind, value)` triples.
    pub fn from_values(values: impl IntoIterator<Item = (String, SettingKind, Option<String>)>) -> Self {
        Self {
            entries: values
                .into_iter()
                .map(|(name, kind, value)| (name, SettingValue { kind, value }))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.value.as_deref())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .map(|e| e.kind == SettingKind::Secret)
            .unwrap_or(false)
    }

    /// Names of settings that have a value.
    pub fn configured(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.value.is_some())
            .map(|(name, _)| name.as_str())
    }

    /// Replace every secret value occurring in `text` with a marker.
    pub fn redact(&self, text: &str) -> String {
        let mut secrets: Vec<&str> = self
            .entries
            .values()
            .filter(|e| e.kind == SettingKind::Secret)
            .filter_map(|e| e.value.as_deref())
            .filter(|v| !v.is_empty())
            .collect();
        // Longest first so a secret containing another is replaced whole.
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut out = text.to_string();
        for secret in secrets {
            out = out.replace(secret, REDACTED);
        }
        out
    }
}

impl fmt::Debug for IndexerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, entry) in &self.entries {
            let shown = match (&entry.value, entry.kind) {
                (None, _) => "<unset>",
                (Some(_), SettingKind::Secret) => REDACTED,
                (Some(v), SettingKind::Text) => v.as_str(),
            };
            map.entry(name, &shown);
        }
        map.finish()
    }
}
