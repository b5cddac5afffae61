// src/services/resolver.rs

//! Localized field resolution.
//!
//! Every place that turns a record field into display text goes through
//! [`LocalizedFieldResolver`], so the fallback order is the same everywhere.
//!
//! For field `name` and active locale `en` with the standard chain, lookup
//! order is:
//!
//! ```text
//! name_en, name.en, name_ru, name.ru, name_kg, name_ky, name.kg, name.ky
//! ```
//!
//! The first non-empty string wins. Nothing matching resolves to `""`.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::locale::{FallbackChain, Locale};
use crate::models::{LocaleConfig, Record};

/// Resolves `{field}_{locale}` families against a fallback chain.
#[derive(Debug, Clone, Default)]
pub struct LocalizedFieldResolver {
    chain: FallbackChain,
    bare_field_fallback: bool,
}

impl LocalizedFieldResolver {
    pub fn new(chain: FallbackChain) -> Self {
        Self {
            chain,
            bare_field_fallback: false,
        }
    }

    pub fn from_config(config: &LocaleConfig) -> Self {
        Self::new(config.chain()).with_bare_field_fallback(config.bare_field_fallback)
    }

    /// Also accept a plain `field` value once every locale variant missed.
    pub fn with_bare_field_fallback(mut self, enabled: bool) -> Self {
        self.bare_field_fallback = enabled;
        self
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Resolve `field` for `locale`, or `""` when no variant is present.
    pub fn resolve(&self, record: &Record, field: &str, locale: Locale) -> String {
        self.lookup(record, field, locale)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Resolve `field`, returning `default` when no variant is present.
    pub fn resolve_or(&self, record: &Record, field: &str, locale: Locale, default: &str) -> String {
        self.lookup(record, field, locale)
            .unwrap_or(default)
            .to_owned()
    }

    /// Borrowing lookup behind [`resolve`](Self::resolve).
    pub fn lookup<'a>(&self, record: &'a Record, field: &str, locale: Locale) -> Option<&'a str> {
        let nested = record.get(field).and_then(Value::as_object);

        for candidate in self.chain.order_for(locale) {
            for suffix in candidate.suffixes() {
                let key = format!("{field}_{suffix}");
                if let Some(text) = non_empty_str(record.get(&key)) {
                    return Some(text);
                }
                if let Some(text) = nested.and_then(|map| non_empty_str(map.get(*suffix))) {
                    return Some(text);
                }
            }
        }

        if self.bare_field_fallback {
            return non_empty_str(record.get(field));
        }
        None
    }

    /// Resolve an array-valued family such as `facilities_ru`.
    pub fn resolve_array(&self, record: &Record, field: &str, locale: Locale) -> Vec<Value> {
        for candidate in self.chain.order_for(locale) {
            for suffix in candidate.suffixes() {
                if let Some(Value::Array(items)) = record.get(&format!("{field}_{suffix}")) {
                    if !items.is_empty() {
                        return items.clone();
                    }
                }
            }
        }

        match record.get(field) {
            Some(Value::Array(items)) if self.bare_field_fallback => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Copy of `record` with each named field replaced by its resolved text.
    pub fn localize(&self, record: &Record, fields: &[&str], locale: Locale) -> Record {
        let mut localized = record.clone();
        for field in fields {
            localized.insert(*field, self.resolve(record, field, locale));
        }
        localized
    }

    /// Person name assembled from `last_name`, `first_name` and `middle_name`.
    ///
    /// English names are written given-name first. A resolved `full_name`
    /// family takes precedence when present.
    pub fn full_name(&self, record: &Record, locale: Locale) -> String {
        if let Some(full) = self.lookup(record, "full_name", locale) {
            return full.to_owned();
        }

        let parts: &[&str] = match locale {
            Locale::En => &["first_name", "last_name"],
            _ => &["last_name", "first_name", "middle_name"],
        };

        parts
            .iter()
            .map(|part| self.lookup(record, part, locale).unwrap_or_default())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Base names of every localized family present in `record`, sorted.
pub fn field_families(record: &Record) -> BTreeSet<String> {
    static SUFFIXED: OnceLock<Regex> = OnceLock::new();
    let suffixed = SUFFIXED.get_or_init(|| {
        Regex::new(r"^(?P<base>.+)_(?:ru|kg|ky|en)$").expect("static regex is valid")
    });

    let mut families = BTreeSet::new();
    for key in record.keys() {
        if let Some(caps) = suffixed.captures(key) {
            families.insert(caps["base"].to_string());
        } else if record
            .get(key)
            .and_then(Value::as_object)
            .is_some_and(|map| !map.is_empty() && map.keys().all(|k| Locale::parse(k).is_some()))
        {
            families.insert(key.to_string());
        }
    }
    families
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    fn standard() -> LocalizedFieldResolver {
        LocalizedFieldResolver::new(FallbackChain::standard())
    }

    #[test]
    fn test_active_locale_value_is_returned_verbatim() {
        let building = record(json!({
            "name_ru": "Главный корпус",
            "name_en": "  Main building ",
            "name_kg": "Башкы корпус"
        }));
        let resolver = standard();

        assert_eq!(resolver.resolve(&building, "name", Locale::En), "  Main building ");
        assert_eq!(resolver.resolve(&building, "name", Locale::Kg), "Башкы корпус");
        assert_eq!(resolver.resolve(&building, "name", Locale::Ru), "Главный корпус");
    }

    #[test]
    fn test_missing_english_falls_back_to_russian() {
        let building = record(json!({"id": 1, "name_ru": "Корпус"}));
        let resolver = LocalizedFieldResolver::new(FallbackChain::new([Locale::En, Locale::Ru]));

        assert_eq!(resolver.resolve(&building, "name", Locale::En), "Корпус");
    }

    #[test]
    fn test_empty_variant_is_skipped() {
        let item = record(json!({"title_kg": "", "title_ru": "Объявление"}));
        assert_eq!(standard().resolve(&item, "title", Locale::Kg), "Объявление");
    }

    #[test]
    fn test_chain_order_is_respected() {
        let item = record(json!({"title_en": "Notice", "title_kg": "Кулактандыруу"}));

        // Russian is missing: standard chain tries English before Kyrgyz.
        assert_eq!(standard().resolve(&item, "title", Locale::Ru), "Notice");

        let kyrgyz_first = LocalizedFieldResolver::new(FallbackChain::new([Locale::Kg, Locale::En]));
        assert_eq!(kyrgyz_first.resolve(&item, "title", Locale::Ru), "Кулактандыруу");
    }

    #[test]
    fn test_ky_suffix_is_accepted_for_kyrgyz() {
        let item = record(json!({"name_ky": "Жатакана", "name_ru": "Общежитие"}));
        assert_eq!(standard().resolve(&item, "name", Locale::Kg), "Жатакана");
    }

    #[test]
    fn test_nothing_matching_resolves_to_empty() {
        let item = record(json!({"name": "plain", "name_de": "Gebäude", "name_ru": 5}));
        let resolver = standard();

        assert_eq!(resolver.resolve(&item, "name", Locale::En), "");
        assert_eq!(resolver.resolve(&item, "address", Locale::Ru), "");
        assert_eq!(resolver.resolve_or(&item, "address", Locale::Ru, "—"), "—");
    }

    #[test]
    fn test_bare_field_fallback_is_opt_in() {
        let item = record(json!({"name": "plain"}));
        let resolver = standard().with_bare_field_fallback(true);
        assert_eq!(resolver.resolve(&item, "name", Locale::En), "plain");
    }

    #[test]
    fn test_nested_locale_object() {
        let item = record(json!({
            "name": {"ru": "Лекционные залы", "kg": "Лекциялык залдар", "en": ""}
        }));
        let resolver = standard();

        assert_eq!(resolver.resolve(&item, "name", Locale::Kg), "Лекциялык залдар");
        assert_eq!(resolver.resolve(&item, "name", Locale::En), "Лекционные залы");
    }

    #[test]
    fn test_resolve_array_family() {
        let dorm = record(json!({
            "facilities_ru": ["Wi-Fi", "Прачечная"],
            "facilities_en": []
        }));
        let resolver = standard();

        assert_eq!(
            resolver.resolve_array(&dorm, "facilities", Locale::En),
            vec![json!("Wi-Fi"), json!("Прачечная")]
        );
        assert!(resolver.resolve_array(&dorm, "rules", Locale::En).is_empty());
    }

    #[test]
    fn test_localize_replaces_named_fields_only() {
        let item = record(json!({"id": 4, "title_ru": "Заголовок", "pinned": true}));
        let localized = standard().localize(&item, &["title", "description"], Locale::En);

        assert_eq!(localized.get_str("title"), Some("Заголовок"));
        assert_eq!(localized.get_str("description"), Some(""));
        assert!(localized.flag("pinned"));
        assert_eq!(localized.id(), Some("4".to_string()));
    }

    #[test]
    fn test_full_name_order_by_locale() {
        let person = record(json!({
            "last_name_ru": "Салымбеков",
            "first_name_ru": "Аскар",
            "middle_name_ru": "Мааткабылович",
            "last_name_en": "Salymbekov",
            "first_name_en": "Askar"
        }));
        let resolver = standard();

        assert_eq!(
            resolver.full_name(&person, Locale::Ru),
            "Салымбеков Аскар Мааткабылович"
        );
        assert_eq!(resolver.full_name(&person, Locale::En), "Askar Salymbekov");
    }

    #[test]
    fn test_full_name_prefers_full_name_family() {
        let person = record(json!({"full_name_ru": "Иванов Иван", "last_name_ru": "Петров"}));
        assert_eq!(standard().full_name(&person, Locale::Ru), "Иванов Иван");
    }

    #[test]
    fn test_field_families() {
        let item = record(json!({
            "id": 1,
            "name_ru": "a",
            "name_en": "b",
            "address_ky": "c",
            "title": {"ru": "d", "en": "e"},
            "photo": {"url": "/x.jpg"},
            "floors": 5
        }));

        let families: Vec<_> = field_families(&item).into_iter().collect();
        assert_eq!(families, vec!["address", "name", "title"]);
    }
}
