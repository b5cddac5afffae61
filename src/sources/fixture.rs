// src/sources/fixture.rs

//! Local JSON fixtures standing in for the backend.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── announcements.json      # any locale
//! ├── announcements.en.json   # preferred for `en`
//! └── news.json
//! ```
//!
//! Files hold the same envelopes the backend returns. A missing file is an
//! empty listing, not an error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::models::{Endpoint, Record, decode_listing};
use crate::sources::ContentSource;
use crate::storage;

/// Reads listings from a fixture directory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    root_dir: PathBuf,
}

impl FixtureSource {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Locale-specific fixture path.
    fn localized_path(&self, endpoint: Endpoint, locale: Locale) -> PathBuf {
        self.root_dir
            .join(format!("{}.{}.json", endpoint.key(), locale.code()))
    }

    /// Locale-neutral fixture path.
    fn shared_path(&self, endpoint: Endpoint) -> PathBuf {
        self.root_dir.join(format!("{}.json", endpoint.key()))
    }

    /// Store a listing for `locale`, replacing any previous one.
    pub async fn save(&self, endpoint: Endpoint, locale: Locale, records: &[Record]) -> Result<PathBuf> {
        let path = self.localized_path(endpoint, locale);
        storage::write_json(&path, records).await?;
        Ok(path)
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn list(&self, endpoint: Endpoint, locale: Locale) -> Result<Vec<Record>> {
        for path in [self.localized_path(endpoint, locale), self.shared_path(endpoint)] {
            if let Some(bytes) = storage::read_optional(&path).await? {
                log::debug!("Reading fixture {:?}", path);
                return decode_listing(endpoint.key(), &bytes);
            }
        }

        log::warn!(
            "No fixture for {} in {:?}. Treating as empty.",
            endpoint,
            self.root_dir
        );
        Ok(Vec::new())
    }

    async fn detail(&self, endpoint: Endpoint, id: &str, locale: Locale) -> Result<Record> {
        let id = id.trim();
        self.list(endpoint, locale)
            .await?
            .into_iter()
            .find(|record| record.id().as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found(endpoint.key(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fetch;
    use serde_json::json;
    use tempfile::TempDir;

    async fn write(dir: &Path, name: &str, value: serde_json::Value) {
        tokio::fs::write(dir.join(name), value.to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_fixture_is_empty_outcome() {
        let temp = TempDir::new().unwrap();
        let source = FixtureSource::new(temp.path());

        let outcome = fetch(&source, Endpoint::Events, Locale::Ru).await;
        assert_eq!(outcome.label(), "empty");
    }

    #[tokio::test]
    async fn test_localized_fixture_preferred() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "news.json", json!([{"id": 1}, {"id": 2}])).await;
        write(temp.path(), "news.en.json", json!([{"id": 3}])).await;
        let source = FixtureSource::new(temp.path());

        assert_eq!(source.list(Endpoint::News, Locale::En).await.unwrap().len(), 1);
        assert_eq!(source.list(Endpoint::News, Locale::Ru).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_paginated_and_wrapped_envelopes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "events.json", json!({"count": 1, "results": [{"id": 7}]})).await;
        write(
            temp.path(),
            "statistics.json",
            json!({"success": true, "data": [{"id": 1}, {"id": 2}]}),
        )
        .await;
        let source = FixtureSource::new(temp.path());

        assert_eq!(source.list(Endpoint::Events, Locale::Ru).await.unwrap().len(), 1);
        assert_eq!(
            source.list(Endpoint::Statistics, Locale::Ru).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_failed_envelope_is_failed_outcome() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "management.json",
            json!({"success": false, "error": "service down"}),
        )
        .await;
        let source = FixtureSource::new(temp.path());

        let outcome = fetch(&source, Endpoint::Management, Locale::Ru).await;
        match outcome {
            crate::models::FetchOutcome::Failed { reason } => assert!(reason.contains("service down")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_detail_by_id() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "news.json",
            json!([{"id": 1, "title_ru": "Первая"}, {"id": 2, "title_ru": "Вторая"}]),
        )
        .await;
        let source = FixtureSource::new(temp.path());

        let record = source.detail(Endpoint::News, "2", Locale::Ru).await.unwrap();
        assert_eq!(record.get_str("title_ru"), Some("Вторая"));

        let err = source.detail(Endpoint::News, "9", Locale::Ru).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let temp = TempDir::new().unwrap();
        let source = FixtureSource::new(temp.path().join("fixtures"));
        let records: Vec<Record> = vec![
            Record::try_from(json!({"id": 1, "name_kg": "Корпус"})).unwrap(),
        ];

        let path = source.save(Endpoint::AcademicBuildings, Locale::Kg, &records).await.unwrap();
        assert!(path.ends_with("academic-buildings.kg.json"));

        let loaded = source.list(Endpoint::AcademicBuildings, Locale::Kg).await.unwrap();
        assert_eq!(loaded, records);
    }
}
