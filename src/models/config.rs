//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::locale::{FallbackChain, Locale};
use crate::models::Endpoint;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Locale defaults and fallback rules
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Listing presentation settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Console output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Endpoint path overrides keyed by endpoint key
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Path for an endpoint, honoring `[endpoints]` overrides.
    pub fn endpoint_path(&self, endpoint: Endpoint) -> &str {
        self.endpoints
            .get(endpoint.key())
            .map(String::as_str)
            .unwrap_or_else(|| endpoint.default_path())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.max_concurrent == 0 {
            return Err(AppError::validation("api.max_concurrent must be > 0"));
        }
        if self.listing.page_size == 0 {
            return Err(AppError::validation("listing.page_size must be > 0"));
        }
        if self.locale.fallback.is_empty() {
            return Err(AppError::validation("locale.fallback must not be empty"));
        }
        for (key, path) in &self.endpoints {
            key.parse::<Endpoint>()
                .map_err(|_| AppError::validation(format!("endpoints.{key} is not an endpoint")))?;
            if !path.starts_with('/') {
                return Err(AppError::validation(format!(
                    "endpoints.{key} must start with '/'"
                )));
            }
        }
        Ok(())
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the backend, optionally with a path prefix
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// How the active locale is sent to the backend
    #[serde(default)]
    pub locale_transport: LocaleTransport,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            locale_transport: LocaleTransport::default(),
        }
    }
}

/// Where the locale travels on each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleTransport {
    /// `Accept-Language` header only
    Header,
    /// `lang` query parameter only
    Query,
    /// Both header and query parameter
    #[default]
    Both,
}

impl LocaleTransport {
    pub fn sends_header(self) -> bool {
        matches!(self, LocaleTransport::Header | LocaleTransport::Both)
    }

    pub fn sends_query(self) -> bool {
        matches!(self, LocaleTransport::Query | LocaleTransport::Both)
    }
}

/// Locale defaults and fallback rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale used when nothing else is chosen
    #[serde(default)]
    pub default: Locale,

    /// Locales tried after the active one, in order
    #[serde(default = "defaults::fallback")]
    pub fallback: Vec<Locale>,

    /// Accept an unsuffixed `field` value when no locale variant matches
    #[serde(default)]
    pub bare_field_fallback: bool,

    /// File holding the persisted locale choice
    #[serde(default = "defaults::preference_file")]
    pub preference_file: String,
}

impl LocaleConfig {
    pub fn chain(&self) -> FallbackChain {
        FallbackChain::new(self.fallback.iter().copied())
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: Locale::default(),
            fallback: defaults::fallback(),
            bare_field_fallback: false,
            preference_file: defaults::preference_file(),
        }
    }
}

/// Listing presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Maximum characters of a field shown in a listing row
    #[serde(default = "defaults::excerpt_length")]
    pub excerpt_length: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            excerpt_length: defaults::excerpt_length(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    use crate::locale::Locale;

    // Api defaults
    pub fn base_url() -> String {
        "http://localhost:8000".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; unisite/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Locale defaults
    pub fn fallback() -> Vec<Locale> {
        Locale::ALL.to_vec()
    }
    pub fn preference_file() -> String {
        "preferences.toml".into()
    }

    // Listing defaults
    pub fn page_size() -> usize {
        6
    }
    pub fn excerpt_length() -> usize {
        120
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.listing.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_endpoint_override() {
        let mut config = Config::default();
        config
            .endpoints
            .insert("gallery".to_string(), "/api/gallery/".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://backend.example.kg"
            locale_transport = "header"

            [locale]
            default = "ky"
            fallback = ["ru"]

            [endpoints]
            news = "/v2/news/"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.locale_transport, LocaleTransport::Header);
        assert_eq!(config.locale.default, Locale::Kg);
        assert_eq!(config.locale.chain().locales(), &[Locale::Ru]);
        assert_eq!(config.listing.page_size, 6);
        assert_eq!(config.endpoint_path(Endpoint::News), "/v2/news/");
        assert_eq!(
            config.endpoint_path(Endpoint::Dormitories),
            "/api/infrastructure/dormitories/"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn transport_flags() {
        assert!(LocaleTransport::Both.sends_header());
        assert!(LocaleTransport::Both.sends_query());
        assert!(!LocaleTransport::Header.sends_query());
        assert!(!LocaleTransport::Query.sends_header());
    }
}
