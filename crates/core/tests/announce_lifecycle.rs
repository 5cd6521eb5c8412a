//! Announce lifecycle integration tests.
//!
//! These tests run the full path from configuration to HTTP pushes:
//! - Loading the bundled definitions directory
//! - Building the processor from TOML configuration
//! - Pushing to real HTTP endpoints (wiremock) for several arr families
//! - Outcome interpretation and secret redaction in results

use std::path::PathBuf;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relayarr_core::{
    load_config_from_str, load_definitions_dir, testing::fixtures, validate_config,
    AnnounceError, AnnounceProcessor, PushOutcome,
};

fn definitions_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../definitions")
}

/// Test helper wiring a processor to two mock arr servers.
struct TestHarness {
    processor: AnnounceProcessor,
    radarr: MockServer,
    lidarr: MockServer,
}

impl TestHarness {
    async fn new() -> Self {
        let radarr = MockServer::start().await;
        let lidarr = MockServer::start().await;

        let config = load_config_from_str(&format!(
            r#"
[[indexers]]
name = "pte"
definition = "polishtracker"
[indexers.settings]
rsskey = "ABC123"

[[clients]]
name = "radarr"
kind = "radarr"
host = "{}"
api_key = "radarr-key"
timeout_secs = 5

[[clients]]
name = "lidarr"
kind = "lidarr"
host = "{}"
api_key = "lidarr-key"
timeout_secs = 5
"#,
            radarr.uri(),
            lidarr.uri()
        ))
        .expect("Failed to parse config");
        validate_config(&config).expect("Config should be valid");

        let definitions =
            load_definitions_dir(&definitions_dir()).expect("Failed to load definitions");
        let processor = AnnounceProcessor::from_config(&config, &definitions)
            .expect("Failed to build processor");

        Self {
            processor,
            radarr,
            lidarr,
        }
    }
}

#[tokio::test]
async fn test_announce_pushes_to_all_clients() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/release/push"))
        .and(header("X-Api-Key", "radarr-key"))
        .and(body_partial_json(serde_json::json!({
            "title": "Some.Movie.2017.PLSUB.1080p.BDRip.x264-GROUP",
            "downloadUrl": "https://pte.nu/downrss/ABC123/000000",
            "protocol": "torrent"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"title": "Some.Movie", "approved": true, "rejected": false}]"#),
        )
        .expect(1)
        .mount(&harness.radarr)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/release/push"))
        .and(header("X-Api-Key", "lidarr-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"rejected": true, "rejections": ["Unable to parse release"]}"#,
        ))
        .expect(1)
        .mount(&harness.lidarr)
        .await;

    let result = harness
        .processor
        .announce("pte", fixtures::POLISHTRACKER_LINE)
        .await
        .expect("Announce should succeed");

    assert!(result.matched);
    let release = result.release.as_ref().expect("Release should be present");
    assert_eq!(release.category.as_deref(), Some("movies HD"));
    assert_eq!(release.size.as_deref(), Some("2.14 GB"));
    assert_eq!(
        release.download_url.as_deref(),
        Some("https://pte.nu/downrss/[REDACTED]/000000")
    );

    let radarr = result.pushes.iter().find(|p| p.client == "radarr").unwrap();
    assert_eq!(radarr.outcome, PushOutcome::Accepted);

    let lidarr = result.pushes.iter().find(|p| p.client == "lidarr").unwrap();
    assert_eq!(
        lidarr.outcome,
        PushOutcome::Rejected {
            reasons: vec!["Unable to parse release".to_string()]
        }
    );
}

#[tokio::test]
async fn test_announce_outcomes_are_per_client() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/release/push"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.radarr)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/release/push"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&harness.lidarr)
        .await;

    let result = harness
        .processor
        .announce("pte", fixtures::POLISHTRACKER_LINE)
        .await
        .unwrap();

    let radarr = result.pushes.iter().find(|p| p.client == "radarr").unwrap();
    assert_eq!(radarr.outcome, PushOutcome::Unauthorized);

    let lidarr = result.pushes.iter().find(|p| p.client == "lidarr").unwrap();
    assert!(lidarr.outcome.is_retryable());
}

#[tokio::test]
async fn test_announce_bad_request_reasons_are_redacted() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/release/push"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"[{
                "propertyName": "DownloadUrl",
                "errorMessage": "Invalid url",
                "attemptedValue": "https://pte.nu/downrss/ABC123/000000",
                "severity": "error"
            }]"#,
        ))
        .mount(&harness.radarr)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/release/push"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rejected": false}"#))
        .mount(&harness.lidarr)
        .await;

    let result = harness
        .processor
        .announce("pte", fixtures::POLISHTRACKER_LINE)
        .await
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("ABC123"), "secret leaked: {}", json);

    let radarr = result.pushes.iter().find(|p| p.client == "radarr").unwrap();
    match &radarr.outcome {
        PushOutcome::Rejected { reasons } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("Invalid url"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unmatched_line_pushes_nothing() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.radarr)
        .await;

    let result = harness
        .processor
        .announce("pte", "::: SomeOtherTracker ::: Torrent ( x )")
        .await
        .unwrap();

    assert!(!result.matched);
    assert!(result.pushes.is_empty());
}

#[tokio::test]
async fn test_unknown_indexer_is_an_error() {
    let harness = TestHarness::new().await;

    let result = harness
        .processor
        .announce("polishtracker", fixtures::POLISHTRACKER_LINE)
        .await;

    assert!(matches!(result, Err(AnnounceError::UnknownIndexer(_))));
}
