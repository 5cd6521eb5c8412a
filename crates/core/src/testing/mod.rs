//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock arr client and fixtures built around the
//! bundled PolishTracker definition, allowing announce processing to be
//! tested without real arr applications.
//!
//! # Example
//!
//! ```rust,ignore
//! use relayarr_core::testing::{fixtures, MockArrClient};
//!
//! let radarr = Arc::new(MockArrClient::new("radarr"));
//! let processor = AnnounceProcessor::new(
//!     vec![fixtures::polishtracker_indexer("ABC123")],
//!     vec![radarr.clone()],
//! );
//!
//! processor.announce("polishtracker", fixtures::POLISHTRACKER_LINE).await?;
//! assert_eq!(radarr.push_count().await, 1);
//! ```

mod mock_arr_client;

pub use mock_arr_client::MockArrClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::announce::Indexer;
    use crate::definition::{parse_definition_yaml, validate, IndexerSettings, ValidDefinition};
    use crate::release::{normalize, Release};

    /// The PolishTracker definition shipped in `definitions/`.
    pub const POLISHTRACKER_YAML: &str =
        include_str!("../../../../definitions/polishtracker.yaml");

    /// A well-formed PolishTracker announce.
    pub const POLISHTRACKER_LINE: &str = "::: PolishTracker ::: Torrent ( Some.Movie.2017.PLSUB.1080p.BDRip.x264-GROUP ) || Kategoria: ( movies HD ) || Rozmiar: ( 2.14 GB ) || Link: ( https://pte.nu/torrents/000000 )";

    /// Parse and validate a YAML definition, panicking on failure.
    pub fn definition_from_yaml(yaml: &str) -> ValidDefinition {
        let definition = parse_definition_yaml(yaml).expect("fixture definition should parse");
        validate(definition).expect("fixture definition should validate")
    }

    pub fn polishtracker_definition() -> ValidDefinition {
        definition_from_yaml(POLISHTRACKER_YAML)
    }

    /// PolishTracker settings with the given RSS key.
    pub fn polishtracker_settings(rsskey: &str) -> IndexerSettings {
        let definition = polishtracker_definition();
        let supplied = BTreeMap::from([("rsskey".to_string(), rsskey.to_string())]);
        IndexerSettings::resolve(&definition.definition().settings, &supplied)
            .expect("fixture settings should resolve")
    }

    /// An enabled indexer named "polishtracker".
    pub fn polishtracker_indexer(rsskey: &str) -> Indexer {
        Indexer {
            name: "polishtracker".to_string(),
            definition: Arc::new(polishtracker_definition()),
            settings: polishtracker_settings(rsskey),
            enabled: true,
        }
    }

    /// The release normalized from [`POLISHTRACKER_LINE`].
    pub fn polishtracker_release(rsskey: &str) -> Release {
        let definition = polishtracker_definition();
        let settings = polishtracker_settings(rsskey);
        let matched = definition
            .match_line(POLISHTRACKER_LINE)
            .expect("fixture line should match");
        normalize(&matched, &definition, &settings).expect("fixture release should render")
    }
}
