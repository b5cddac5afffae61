//! Content sources.
//!
//! A source yields the raw records behind one endpoint. The HTTP source
//! talks to the site backend; the fixture source reads local JSON files
//! for offline work and tests. Both decode the same response envelopes.

pub mod fixture;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Locale;
use crate::models::{Endpoint, FetchOutcome, Record};

pub use fixture::FixtureSource;
pub use http::HttpSource;

/// Trait for content backends.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label used in reports.
    fn name(&self) -> &str;

    /// All records of a listing endpoint in `locale`.
    async fn list(&self, endpoint: Endpoint, locale: Locale) -> Result<Vec<Record>>;

    /// One record by id.
    async fn detail(&self, endpoint: Endpoint, id: &str, locale: Locale) -> Result<Record>;
}

/// Fetch a listing and classify the result.
///
/// Failures are logged and reported as `Failed`; nothing is substituted.
pub async fn fetch<S>(source: &S, endpoint: Endpoint, locale: Locale) -> FetchOutcome<Record>
where
    S: ContentSource + ?Sized,
{
    let result = source.list(endpoint, locale).await;
    if let Err(e) = &result {
        log::warn!("{} fetch of {} failed: {}", source.name(), endpoint, e);
    }
    let outcome = FetchOutcome::from_result(result);
    log::debug!(
        "{} {} [{}]: {} ({} records)",
        source.name(),
        endpoint,
        locale,
        outcome.label(),
        outcome.len()
    );
    outcome
}
