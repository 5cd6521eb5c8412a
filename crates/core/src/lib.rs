pub mod announce;
pub mod arr;
pub mod config;
pub mod definition;
pub mod metrics;
pub mod release;
pub mod testing;

pub use announce::{
    AnnounceError, AnnounceProcessor, AnnounceResult, Indexer, IndexerSummary, PushReport,
};
pub use arr::{interpret, ArrClient, ArrError, ArrHttpClient, ArrKind, PushOutcome, SystemStatus};
pub use config::{
    load_config, load_config_from_str, validate_config, ArrClientConfig, Config, ConfigError,
    SanitizedConfig,
};
pub use definition::{
    load_definition_file, load_definitions_dir, validate, Definition, DefinitionError,
    IndexerSettings, LoadError, MatchResult, Protocol, ValidDefinition,
};
pub use release::{normalize, parse_size_bytes, Release};
