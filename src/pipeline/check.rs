// src/pipeline/check.rs

//! Endpoint health check.

use futures::stream::{self, StreamExt};

use crate::locale::Locale;
use crate::models::{Endpoint, FetchOutcome, Record};
use crate::sources::{ContentSource, fetch};
use crate::utils::log;

/// Outcome of probing one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCheck {
    pub endpoint: Endpoint,
    pub outcome: FetchOutcome<Record>,
}

/// Probe `endpoints` concurrently, at most `concurrency` at a time.
///
/// Results come back in the order of `endpoints`.
pub async fn check_all(
    source: &dyn ContentSource,
    endpoints: &[Endpoint],
    locale: Locale,
    concurrency: usize,
) -> Vec<EndpointCheck> {
    let total = endpoints.len();
    let mut done = 0;
    let mut checks = Vec::with_capacity(total);

    let mut probes = stream::iter(endpoints.iter().copied())
        .map(|endpoint| async move {
            let outcome = fetch(source, endpoint, locale).await;
            EndpointCheck { endpoint, outcome }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some(check) = probes.next().await {
        done += 1;
        log::progress(done, total, &format!("{} {}", check.endpoint, check.outcome.label()));
        checks.push(check);
    }

    checks.sort_by_key(|check| {
        endpoints
            .iter()
            .position(|e| *e == check.endpoint)
            .unwrap_or(usize::MAX)
    });
    checks
}

/// Print check results; returns the number of failed endpoints.
pub fn print_checks(source_name: &str, checks: &[EndpointCheck]) -> usize {
    log::header(&format!("Endpoint check ({source_name})"));

    for check in checks {
        let line = match &check.outcome {
            FetchOutcome::Loaded(items) => format!("{:<22} ok     {} records", check.endpoint, items.len()),
            FetchOutcome::Empty => format!("{:<22} empty", check.endpoint),
            FetchOutcome::Failed { reason } => format!("{:<22} FAILED {}", check.endpoint, reason),
        };
        if check.outcome.is_failed() {
            log::warn(&line);
        } else {
            log::info(&line);
        }
    }

    let failed = checks.iter().filter(|c| c.outcome.is_failed()).count();
    let empty = checks
        .iter()
        .filter(|c| matches!(c.outcome, FetchOutcome::Empty))
        .count();
    log::summary(
        "Check",
        &[
            ("Endpoints", checks.len().to_string()),
            ("Loaded", (checks.len() - failed - empty).to_string()),
            ("Empty", empty.to_string()),
            ("Failed", failed.to_string()),
        ],
    );
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FixtureSource;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_check_all_reports_each_endpoint_in_order() {
        let temp = TempDir::new().unwrap();
        tokio::fs::write(
            temp.path().join("news.json"),
            json!([{"id": 1}, {"id": 2}]).to_string(),
        )
        .await
        .unwrap();
        tokio::fs::write(temp.path().join("events.json"), "<html>")
            .await
            .unwrap();
        let source = FixtureSource::new(temp.path());

        let checks = check_all(&source, &Endpoint::ALL, Locale::Ru, 3).await;

        assert_eq!(checks.len(), Endpoint::ALL.len());
        let order: Vec<Endpoint> = checks.iter().map(|c| c.endpoint).collect();
        assert_eq!(order, Endpoint::ALL.to_vec());

        let by = |e: Endpoint| &checks.iter().find(|c| c.endpoint == e).unwrap().outcome;
        assert_eq!(by(Endpoint::News).len(), 2);
        assert!(by(Endpoint::Events).is_failed());
        assert_eq!(by(Endpoint::Dormitories).label(), "empty");
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let temp = TempDir::new().unwrap();
        let source = FixtureSource::new(temp.path());

        let checks = check_all(&source, &[Endpoint::News], Locale::En, 0).await;
        assert_eq!(checks.len(), 1);
    }
}
