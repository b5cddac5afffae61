// src/pipeline/show.rs

//! Single-record view with every localized family resolved.

use serde_json::Value;

use crate::error::Result;
use crate::locale::Locale;
use crate::models::{Endpoint, Record};
use crate::services::text::{format_date, plain_text};
use crate::services::{LocalizedFieldResolver, field_families};
use crate::sources::ContentSource;
use crate::utils::log;

/// Families that may hold HTML markup.
const HTML_FIELDS: [&str; 3] = ["content", "body", "description"];

/// A record rendered for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailReport {
    pub endpoint: Endpoint,
    pub id: String,
    pub locale: Locale,
    /// Resolved localized families, sorted by name
    pub localized: Vec<(String, String)>,
    /// Plain scalar fields outside any family
    pub attributes: Vec<(String, String)>,
}

/// Render every localized family of `record` for `locale`.
pub fn render_record(
    resolver: &LocalizedFieldResolver,
    record: &Record,
    locale: Locale,
) -> (Vec<(String, String)>, Vec<(String, String)>) {
    let families = field_families(record);

    let localized = families
        .iter()
        .map(|family| {
            let items = resolver.resolve_array(record, family, locale);
            let text = if items.is_empty() {
                resolver.resolve(record, family, locale)
            } else {
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let text = if HTML_FIELDS.iter().any(|f| *f == family.as_str()) {
                plain_text(&text)
            } else {
                text
            };
            (family.clone(), text)
        })
        .collect();

    let attributes = record
        .as_map()
        .iter()
        .filter(|(key, _)| !families.iter().any(|family| belongs_to(key, family)))
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) if key.ends_with("date") || key.ends_with("_at") => {
                    format_date(s, locale)
                }
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect();

    (localized, attributes)
}

/// Whether `key` is the family base itself or one of its locale variants.
fn belongs_to(key: &str, family: &str) -> bool {
    match key.strip_prefix(family) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('_')
            .is_some_and(|suffix| {
                Locale::ALL
                    .iter()
                    .any(|l| l.suffixes().iter().any(|s| *s == suffix))
            }),
        None => false,
    }
}

/// Fetch one record and render it.
pub async fn build_detail(
    source: &dyn ContentSource,
    resolver: &LocalizedFieldResolver,
    endpoint: Endpoint,
    id: &str,
    locale: Locale,
) -> Result<DetailReport> {
    let record = source.detail(endpoint, id, locale).await?;
    let (localized, attributes) = render_record(resolver, &record, locale);

    Ok(DetailReport {
        endpoint,
        id: record.id().unwrap_or_else(|| id.to_string()),
        locale,
        localized,
        attributes,
    })
}

/// Print a detail report to the console.
pub fn print_detail(report: &DetailReport) {
    log::header(&format!(
        "{} #{} [{}]",
        report.endpoint, report.id, report.locale
    ));
    for (field, text) in &report.localized {
        if text.is_empty() {
            log::info(&format!("{field}: (missing)"));
        } else {
            log::info(&format!("{field}: {text}"));
        }
    }
    if !report.attributes.is_empty() {
        log::separator();
        for (key, value) in &report.attributes {
            log::sub_item(&format!("{key}: {value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FallbackChain;
    use crate::sources::FixtureSource;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn test_render_resolves_families_and_keeps_attributes() {
        let resolver = LocalizedFieldResolver::default();
        let rec = record(json!({
            "id": 5,
            "name_ru": "Общежитие №2",
            "name_en": "Dormitory 2",
            "description_ru": "<p>Рядом с <b>кампусом</b></p>",
            "facilities_ru": ["Wi-Fi", "Прачечная"],
            "capacity": 240,
            "type": "student",
        }));

        let (localized, attributes) = render_record(&resolver, &rec, Locale::Ru);

        assert_eq!(
            localized,
            vec![
                ("description".to_string(), "Рядом с кампусом".to_string()),
                ("facilities".to_string(), "Wi-Fi, Прачечная".to_string()),
                ("name".to_string(), "Общежитие №2".to_string()),
            ]
        );
        assert!(attributes.contains(&("capacity".to_string(), "240".to_string())));
        assert!(attributes.contains(&("type".to_string(), "student".to_string())));
        assert!(!attributes.iter().any(|(k, _)| k.starts_with("name")));
    }

    #[test]
    fn test_render_uses_chain_for_missing_locale() {
        let resolver = LocalizedFieldResolver::new(FallbackChain::new([Locale::En, Locale::Ru]));
        let rec = record(json!({"name_ru": "Корпус"}));

        let (localized, _) = render_record(&resolver, &rec, Locale::En);
        assert_eq!(localized, vec![("name".to_string(), "Корпус".to_string())]);
    }

    #[test]
    fn test_belongs_to() {
        assert!(belongs_to("name_ru", "name"));
        assert!(belongs_to("name_ky", "name"));
        assert!(belongs_to("name", "name"));
        assert!(!belongs_to("name_short", "name"));
        assert!(!belongs_to("surname_ru", "name"));
        assert!(!belongs_to("name_ru_old", "name"));
    }

    #[tokio::test]
    async fn test_build_detail_from_fixture() {
        let temp = TempDir::new().unwrap();
        let news = json!([{
            "id": 12,
            "title_ru": "Новости",
            "title_kg": "Жаңылыктар",
            "date": "2024-11-25",
        }]);
        tokio::fs::write(temp.path().join("news.json"), news.to_string())
            .await
            .unwrap();
        let source = FixtureSource::new(temp.path());

        let report = build_detail(
            &source,
            &LocalizedFieldResolver::default(),
            Endpoint::News,
            "12",
            Locale::Kg,
        )
        .await
        .unwrap();

        assert_eq!(report.id, "12");
        assert_eq!(
            report.localized,
            vec![("title".to_string(), "Жаңылыктар".to_string())]
        );
        assert!(
            report
                .attributes
                .contains(&("date".to_string(), "2024-ж., 25-ноябрь".to_string()))
        );
    }
}
