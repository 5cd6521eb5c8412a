use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::parse_size_bytes;
use crate::definition::{IndexerSettings, Protocol};

/// A release announced by a tracker, in canonical form.
///
/// `download_url` and the rendered `fields` may embed secrets from the
/// indexer settings. Use [`Release::redacted`] before logging or returning a
/// release to an API caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Identifier of the definition that parsed the line.
    pub indexer: String,
    pub protocol: Protocol,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Size exactly as announced (e.g. "2.14 GB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    /// Every rendered match template, by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Every captured variable, by name.
    #[serde(default)]
    pub raw_variables: BTreeMap<String, String>,
}

impl Release {
    /// Announced size in bytes, if it can be parsed.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(parse_size_bytes)
    }

    /// Copy of this release with secret setting values masked in every
    /// rendered string, the title included.
    pub fn redacted(&self, settings: &IndexerSettings) -> Release {
        Release {
            title: settings.redact(&self.title),
            download_url: self.download_url.as_deref().map(|u| settings.redact(u)),
            info_url: self.info_url.as_deref().map(|u| settings.redact(u)),
            fields: self
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), settings.redact(v)))
                .collect(),
            ..self.clone()
        }
    }
}
