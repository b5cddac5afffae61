// src/storage/preferences.rs

//! Persisted user preferences.
//!
//! Only the UI locale is stored. The file is read once at startup and
//! written only when the user explicitly switches language.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locale::Locale;
use crate::storage::{read_optional, write_atomic};

/// Contents of the preference file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Locale chosen by the user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

/// TOML-backed preference file.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences; a missing file yields defaults.
    pub async fn load(&self) -> Result<Preferences> {
        match read_optional(&self.path).await? {
            Some(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                Ok(toml::from_str(&text)?)
            }
            None => Ok(Preferences::default()),
        }
    }

    /// Load preferences, warning and falling back to defaults on a bad file.
    pub async fn load_or_default(&self) -> Preferences {
        self.load().await.unwrap_or_else(|e| {
            log::warn!("Ignoring preferences at {:?}: {}", self.path, e);
            Preferences::default()
        })
    }

    pub async fn save(&self, prefs: &Preferences) -> Result<()> {
        let text = toml::to_string_pretty(prefs)?;
        write_atomic(&self.path, text.as_bytes()).await?;
        log::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }

    /// Persist `locale` as the preferred UI locale.
    pub async fn save_locale(&self, locale: Locale) -> Result<()> {
        let mut prefs = self.load_or_default().await;
        prefs.locale = Some(locale);
        self.save(&prefs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp.path().join("preferences.toml"));

        assert_eq!(store.load().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_save_locale_persists() {
        let temp = TempDir::new().unwrap();
        let store = PreferenceStore::new(temp.path().join("preferences.toml"));

        store.save_locale(Locale::Kg).await.unwrap();

        let text = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(text.contains("locale = \"kg\""));
        assert_eq!(store.load().await.unwrap().locale, Some(Locale::Kg));
    }

    #[tokio::test]
    async fn test_accepts_wire_code_alias() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        tokio::fs::write(&path, "locale = \"ky\"\n").await.unwrap();

        let prefs = PreferenceStore::new(&path).load().await.unwrap();
        assert_eq!(prefs.locale, Some(Locale::Kg));
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.toml");
        tokio::fs::write(&path, "locale = \"fr\"\n").await.unwrap();

        let store = PreferenceStore::new(&path);
        assert!(store.load().await.is_err());
        assert_eq!(store.load_or_default().await, Preferences::default());
    }
}
