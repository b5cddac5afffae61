// src/pipeline/snapshot.rs

//! Save live listings as fixtures for offline use.

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::locale::Locale;
use crate::models::{Endpoint, FetchOutcome};
use crate::sources::{ContentSource, FixtureSource, fetch};
use crate::utils::log;

/// Counters for one snapshot run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStats {
    pub saved: usize,
    pub records: usize,
    pub failed: usize,
}

/// Fetch every `(endpoint, locale)` pair from `source` and write it to `target`.
///
/// Failed fetches are skipped so an existing fixture is never overwritten
/// with nothing.
pub async fn run_snapshot(
    source: &dyn ContentSource,
    target: &FixtureSource,
    endpoints: &[Endpoint],
    locales: &[Locale],
    concurrency: usize,
) -> Result<SnapshotStats> {
    let jobs: Vec<(Endpoint, Locale)> = endpoints
        .iter()
        .flat_map(|&endpoint| locales.iter().map(move |&locale| (endpoint, locale)))
        .collect();
    let total = jobs.len();

    log::header(&format!(
        "Snapshot {} listings into {}",
        total,
        target.root().display()
    ));

    let mut stats = SnapshotStats::default();
    let mut fetched = stream::iter(jobs)
        .map(|(endpoint, locale)| async move {
            (endpoint, locale, fetch(source, endpoint, locale).await)
        })
        .buffer_unordered(concurrency.max(1));

    let mut done = 0;
    while let Some((endpoint, locale, outcome)) = fetched.next().await {
        done += 1;
        if let FetchOutcome::Failed { reason } = &outcome {
            stats.failed += 1;
            log::warn(&format!("Skipping {endpoint} [{locale}]: {reason}"));
            continue;
        }

        let records = outcome.into_items();
        let path = target.save(endpoint, locale, &records).await?;
        stats.saved += 1;
        stats.records += records.len();
        log::progress(
            done,
            total,
            &format!("{endpoint} [{locale}] {} records → {}", records.len(), path.display()),
        );
    }

    log::summary(
        "Snapshot",
        &[
            ("Saved", stats.saved.to_string()),
            ("Records", stats.records.to_string()),
            ("Failed", stats.failed.to_string()),
        ],
    );
    Ok(stats)
}
