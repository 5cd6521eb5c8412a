use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::arr::ArrKind;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub definitions: DefinitionsConfig,
    /// Trackers to accept announces from.
    #[serde(default)]
    pub indexers: Vec<IndexerConfig>,
    /// Applications releases are pushed to.
    #[serde(default)]
    pub clients: Vec<ArrClientConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    7474
}

/// Where definition files are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefinitionsConfig {
    #[serde(default = "default_definitions_dir")]
    pub dir: PathBuf,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            dir: default_definitions_dir(),
        }
    }
}

fn default_definitions_dir() -> PathBuf {
    PathBuf::from("definitions")
}

fn default_true() -> bool {
    true
}

/// One tracker the operator has an account on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexerConfig {
    /// Name announces are submitted under.
    pub name: String,
    /// Identifier of the definition that parses this tracker's announces.
    pub definition: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Values for the definition's settings schema (keys, passkeys, ...).
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

/// An arr application to push releases to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArrClientConfig {
    pub name: String,
    pub kind: ArrKind,
    /// Base URL (e.g., "http://localhost:7878")
    pub host: String,
    pub api_key: String,
    #[serde(default)]
    pub basic_auth: Option<BasicAuthConfig>,
    /// Push timeout in seconds (default: 120). Applications may do slow
    /// import work before answering.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_timeout() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub definitions: DefinitionsConfig,
    pub indexers: Vec<SanitizedIndexerConfig>,
    pub clients: Vec<SanitizedArrClientConfig>,
}

/// Indexer config with setting values hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedIndexerConfig {
    pub name: String,
    pub definition: String,
    pub enabled: bool,
    /// Names of settings that have a value.
    pub settings_configured: Vec<String>,
}

/// Arr client config with credentials hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedArrClientConfig {
    pub name: String,
    pub kind: ArrKind,
    pub host: String,
    pub api_key_configured: bool,
    pub basic_auth_configured: bool,
    pub timeout_secs: u64,
    pub enabled: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            definitions: config.definitions.clone(),
            indexers: config
                .indexers
                .iter()
                .map(|i| SanitizedIndexerConfig {
                    name: i.name.clone(),
                    definition: i.definition.clone(),
                    enabled: i.enabled,
                    settings_configured: i
                        .settings
                        .iter()
                        .filter(|(_, v)| !v.is_empty())
                        .map(|(k, _)| k.clone())
                        .collect(),
                })
                .collect(),
            clients: config
                .clients
                .iter()
                .map(|c| SanitizedArrClientConfig {
                    name: c.name.clone(),
                    kind: c.kind,
                    host: c.host.clone(),
                    api_key_configured: !c.api_key.is_empty(),
                    basic_auth_configured: c.basic_auth.is_some(),
                    timeout_secs: c.timeout_secs,
                    enabled: c.enabled,
                })
                .collect(),
        }
    }
}
