//! Announce processor: matches lines, normalizes releases and fans pushes
//! out to arr clients.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AnnounceError, AnnounceResult, Indexer, IndexerSummary, PushReport};
use crate::arr::{ArrClient, ArrHttpClient, PushOutcome};
use crate::config::Config;
use crate::definition::{IndexerSettings, ValidDefinition};
use crate::metrics;
use crate::release::{normalize, Release};

/// Routes announce lines from configured indexers to every arr client.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct AnnounceProcessor {
    indexers: HashMap<String, Indexer>,
    clients: Vec<Arc<dyn ArrClient>>,
}

impl AnnounceProcessor {
    pub fn new(indexers: Vec<Indexer>, clients: Vec<Arc<dyn ArrClient>>) -> Self {
        Self {
            indexers: indexers
                .into_iter()
                .map(|indexer| (indexer.name.clone(), indexer))
                .collect(),
            clients,
        }
    }

    /// Build indexers and HTTP clients from configuration.
    ///
    /// Every configured indexer must reference a loaded definition and
    /// supply its required settings. Disabled clients are skipped.
    pub fn from_config(
        config: &Config,
        definitions: &HashMap<String, Arc<ValidDefinition>>,
    ) -> Result<Self, AnnounceError> {
        let mut indexers = Vec::with_capacity(config.indexers.len());
        for indexer in &config.indexers {
            let definition = definitions.get(&indexer.definition).ok_or_else(|| {
                AnnounceError::UnknownDefinition {
                    indexer: indexer.name.clone(),
                    definition: indexer.definition.clone(),
                }
            })?;

            let settings =
                IndexerSettings::resolve(&definition.definition().settings, &indexer.settings)
                    .map_err(|source| AnnounceError::Settings {
                        indexer: indexer.name.clone(),
                        source,
                    })?;

            indexers.push(Indexer {
                name: indexer.name.clone(),
                definition: Arc::clone(definition),
                settings,
                enabled: indexer.enabled,
            });
        }

        let mut clients: Vec<Arc<dyn ArrClient>> = Vec::new();
        for client in config.clients.iter().filter(|c| c.enabled) {
            let http = ArrHttpClient::new(client.clone()).map_err(|source| {
                AnnounceError::Client {
                    client: client.name.clone(),
                    source,
                }
            })?;
            clients.push(Arc::new(http));
        }

        info!(
            indexers = indexers.len(),
            clients = clients.len(),
            "Announce processor configured"
        );

        Ok(Self::new(indexers, clients))
    }

    /// Summaries of all indexers, sorted by name.
    pub fn indexers(&self) -> Vec<IndexerSummary> {
        let mut summaries: Vec<_> = self.indexers.values().map(IndexerSummary::from).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    pub fn indexer(&self, name: &str) -> Option<&Indexer> {
        self.indexers.get(name)
    }

    pub fn clients(&self) -> &[Arc<dyn ArrClient>] {
        &self.clients
    }

    pub fn client(&self, name: &str) -> Option<&Arc<dyn ArrClient>> {
        self.clients.iter().find(|c| c.name() == name)
    }

    fn lookup(&self, name: &str) -> Result<&Indexer, AnnounceError> {
        let indexer = self
            .indexers
            .get(name)
            .ok_or_else(|| AnnounceError::UnknownIndexer(name.to_string()))?;
        if !indexer.enabled {
            return Err(AnnounceError::IndexerDisabled(name.to_string()));
        }
        Ok(indexer)
    }

    fn process(&self, indexer: &Indexer, line: &str) -> Result<Option<Release>, AnnounceError> {
        let Some(matched) = indexer.definition.match_line(line) else {
            debug!(indexer = %indexer.name, "Announce line did not match");
            return Ok(None);
        };

        let release = normalize(&matched, &indexer.definition, &indexer.settings).map_err(
            |source| AnnounceError::Render {
                indexer: indexer.name.clone(),
                source,
            },
        )?;

        debug!(
            indexer = %indexer.name,
            pattern = matched.pattern_index,
            title = %indexer.settings.redact(&release.title),
            "Announce line matched"
        );

        Ok(Some(release))
    }

    /// Process a line and count it. Previews go through [`Self::process`]
    /// directly so they never show up in the announce counters.
    fn process_counted(
        &self,
        indexer: &Indexer,
        line: &str,
    ) -> Result<Option<Release>, AnnounceError> {
        let result = self.process(indexer, line);
        let label = match &result {
            Ok(Some(_)) => "matched",
            Ok(None) => "no_match",
            Err(_) => "error",
        };
        metrics::ANNOUNCE_LINES
            .with_label_values(&[&indexer.name, label])
            .inc();
        result
    }

    /// Match and normalize one line. `Ok(None)` means no pattern matched.
    ///
    /// The returned release carries real secret values; it is meant for
    /// pushing, not for display.
    pub fn process_line(
        &self,
        indexer: &str,
        line: &str,
    ) -> Result<Option<Release>, AnnounceError> {
        let indexer = self.lookup(indexer)?;
        self.process_counted(indexer, line)
    }

    /// Like [`Self::process_line`] but with secrets masked, for previews.
    pub fn dry_run(&self, indexer: &str, line: &str) -> Result<Option<Release>, AnnounceError> {
        let indexer = self.lookup(indexer)?;
        Ok(self
            .process(indexer, line)?
            .map(|release| release.redacted(&indexer.settings)))
    }

    /// Push a release to every client concurrently. Never retries.
    ///
    /// Reports come back in client order and carry raw outcomes, which may
    /// echo secrets. Nothing about individual outcomes is logged here.
    pub async fn dispatch(&self, release: &Release) -> Vec<PushReport> {
        if self.clients.is_empty() {
            debug!("No clients to push to");
            return Vec::new();
        }

        let push_futures: Vec<_> = self
            .clients
            .iter()
            .map(|client| async move {
                let outcome = client.push(release).await;
                PushReport {
                    client: client.name().to_string(),
                    outcome,
                }
            })
            .collect();

        let reports = futures::future::join_all(push_futures).await;

        for report in &reports {
            metrics::PUSH_OUTCOMES
                .with_label_values(&[&report.client, report.outcome.label()])
                .inc();
        }

        reports
    }

    /// Process a line and push the resulting release, if any.
    pub async fn announce(&self, indexer: &str, line: &str) -> Result<AnnounceResult, AnnounceError> {
        let indexer = self.lookup(indexer)?;

        let Some(release) = self.process_counted(indexer, line)? else {
            return Ok(AnnounceResult {
                indexer: indexer.name.clone(),
                matched: false,
                release: None,
                pushes: Vec::new(),
            });
        };

        let reports = self.dispatch(&release).await;
        let release = release.redacted(&indexer.settings);
        let pushes: Vec<PushReport> = reports
            .into_iter()
            .map(|report| PushReport {
                outcome: report.outcome.redacted(&indexer.settings),
                ..report
            })
            .collect();

        for (client, report) in self.clients.iter().zip(&pushes) {
            log_outcome(client.as_ref(), &release, &report.outcome);
        }

        Ok(AnnounceResult {
            indexer: indexer.name.clone(),
            matched: true,
            release: Some(release),
            pushes,
        })
    }
}

/// Log one push outcome. Both the release and the outcome must already be
/// redacted.
fn log_outcome(client: &dyn ArrClient, release: &Release, outcome: &PushOutcome) {
    let kind = client.kind().as_str();
    match outcome {
        PushOutcome::Accepted => info!(
            client = %client.name(),
            kind,
            title = %release.title,
            "Release accepted"
        ),
        PushOutcome::Rejected { reasons } => warn!(
            client = %client.name(),
            kind,
            title = %release.title,
            reasons = reasons.len(),
            "Release rejected"
        ),
        PushOutcome::Unauthorized => warn!(
            client = %client.name(),
            kind,
            "Client refused credentials, check api_key"
        ),
        PushOutcome::Error { detail } => warn!(
            client = %client.name(),
            kind,
            title = %release.title,
            error = %detail,
            "Push failed"
        ),
    }
}
