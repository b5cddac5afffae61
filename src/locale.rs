// src/locale.rs

//! Supported locales, fallback chains, and the active-locale state.

use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A locale from the closed set the site is translated into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    #[serde(alias = "ky")]
    Kg,
    En,
}

impl Locale {
    /// Every supported locale, in default fallback order.
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::En, Locale::Kg];

    /// Code used by the site UI and in record keys.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Kg => "kg",
            Locale::En => "en",
        }
    }

    /// Code the backend expects in `Accept-Language` and `lang`.
    pub fn wire_code(self) -> &'static str {
        match self {
            Locale::Kg => "ky",
            other => other.code(),
        }
    }

    /// Key suffixes tried for this locale, most common first.
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            Locale::Ru => &["ru"],
            Locale::Kg => &["kg", "ky"],
            Locale::En => &["en"],
        }
    }

    /// Parse a locale tag such as `ru`, `ky-KG` or `en_US`.
    ///
    /// Only the primary subtag is considered. Returns `None` for anything
    /// outside the supported set.
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "ru" => Some(Locale::Ru),
            "kg" | "ky" => Some(Locale::Kg),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Parse a locale tag, mapping unsupported tags to `default`.
    pub fn from_tag_or_default(tag: &str, default: Locale) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            log::debug!("Unsupported locale tag {tag:?}, using {default}");
            default
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::UnknownLocale(s.to_string()))
    }
}

/// Ordered locales consulted after the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    order: Vec<Locale>,
}

impl FallbackChain {
    /// Build a chain, dropping repeated locales.
    pub fn new(locales: impl IntoIterator<Item = Locale>) -> Self {
        let mut order = Vec::new();
        for locale in locales {
            if !order.contains(&locale) {
                order.push(locale);
            }
        }
        Self { order }
    }

    /// The site-wide chain: Russian, then English, then Kyrgyz.
    pub fn standard() -> Self {
        Self::new(Locale::ALL)
    }

    /// Configured fallback locales, without the active one.
    pub fn locales(&self) -> &[Locale] {
        &self.order
    }

    /// Full lookup order for `active`: the active locale first, then the chain.
    pub fn order_for(&self, active: Locale) -> Vec<Locale> {
        std::iter::once(active)
            .chain(self.order.iter().copied().filter(|l| *l != active))
            .collect()
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// Process-wide active locale.
///
/// Read by every resolver call; written only on explicit user selection.
#[derive(Debug)]
pub struct LocaleState {
    current: RwLock<Locale>,
}

impl LocaleState {
    pub fn new(initial: Locale) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Pick the startup locale: an explicit choice, then a persisted
    /// preference, then the configured default.
    pub fn initialize(explicit: Option<Locale>, persisted: Option<Locale>, default: Locale) -> Self {
        Self::new(explicit.or(persisted).unwrap_or(default))
    }

    /// Like [`LocaleState::initialize`], with the explicit choice given as a
    /// raw tag. An unsupported tag counts as no choice, so a persisted
    /// preference still wins over the default.
    pub fn from_tags(explicit: Option<&str>, persisted: Option<Locale>, default: Locale) -> Self {
        let explicit = explicit.and_then(|tag| {
            let parsed = Locale::parse(tag);
            if parsed.is_none() {
                log::warn!("Unsupported locale tag {tag:?}, ignoring it");
            }
            parsed
        });
        Self::initialize(explicit, persisted, default)
    }

    pub fn get(&self) -> Locale {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch the active locale, returning the previous one.
    pub fn set(&self, locale: Locale) -> Locale {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, locale)
    }
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
