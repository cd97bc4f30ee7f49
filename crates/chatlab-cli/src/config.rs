//! Studio configuration
//!
//! Resolution order, lowest to highest: built-in defaults, the TOML file,
//! `CHATLAB_*` environment variables, command line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chatlab_model::DEMO_WIDGET_ID;
use chatlab_store::http::{DEFAULT_REQUEST_ATTEMPTS, DEFAULT_TIMEOUT_MS};
use chatlab_store::HttpStoreConfig;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent
pub(crate) const DEFAULT_CONFIG_FILE: &str = "chatlab.toml";

pub(crate) const ENV_API_URL: &str = "CHATLAB_API_URL";
pub(crate) const ENV_TOKEN: &str = "CHATLAB_TOKEN";
pub(crate) const ENV_WIDGET_ID: &str = "CHATLAB_WIDGET_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StudioConfig {
    /// Widget edited when `--widget` is not given
    pub(crate) widget_id: String,
    pub(crate) store: StoreSection,
    pub(crate) preview: PreviewSection,
}

/// `[store]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StoreSection {
    pub(crate) base_url: String,
    pub(crate) timeout_ms: u64,
    pub(crate) request_attempts: usize,
    pub(crate) auth_token: Option<String>,
}

/// `[preview]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PreviewSection {
    /// Restrict preview delivery to this origin; unrestricted when unset
    pub(crate) target_origin: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            widget_id: DEMO_WIDGET_ID.to_string(),
            store: StoreSection::default(),
            preview: PreviewSection::default(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_attempts: DEFAULT_REQUEST_ATTEMPTS,
            auth_token: None,
        }
    }
}

impl StudioConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists
    ///
    /// An explicit path must exist. Environment overrides are applied.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)?
                } else {
                    tracing::debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a TOML file
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Apply `CHATLAB_*` overrides from a variable lookup
    #[must_use]
    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL) {
            self.store.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.store.auth_token = Some(token);
        }
        if let Some(widget_id) = lookup(ENV_WIDGET_ID) {
            self.widget_id = widget_id;
        }
        self
    }

    /// With widget id
    #[inline]
    #[must_use]
    pub(crate) fn with_widget_id(mut self, widget_id: impl Into<String>) -> Self {
        self.widget_id = widget_id.into();
        self
    }

    /// Settings for the HTTP store client
    #[must_use]
    pub(crate) fn http_store(&self) -> HttpStoreConfig {
        let config = HttpStoreConfig::new(self.store.base_url.clone())
            .with_timeout_ms(self.store.timeout_ms)
            .with_request_attempts(self.store.request_attempts);
        match &self.store.auth_token {
            Some(token) => config.with_auth_token(token.clone()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_target_demo_widget() {
        let config = StudioConfig::default();
        assert_eq!(config.widget_id, DEMO_WIDGET_ID);
        assert_eq!(config.store.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.preview.target_origin.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
widget_id = "w42"

[store]
base_url = "https://api.example.com"

[preview]
target_origin = "https://preview.example.com"
"#
        )
        .unwrap();

        let config = StudioConfig::from_file(file.path()).unwrap();

        assert_eq!(config.widget_id, "w42");
        assert_eq!(config.store.base_url, "https://api.example.com");
        assert_eq!(config.store.request_attempts, DEFAULT_REQUEST_ATTEMPTS);
        assert_eq!(
            config.preview.target_origin.as_deref(),
            Some("https://preview.example.com")
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StudioConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "widget_id = [").unwrap();
        let err = StudioConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "https://override.example.com"),
            (ENV_TOKEN, "secret"),
        ]
        .into_iter()
        .collect();

        let config = StudioConfig::default()
            .with_widget_id("w1")
            .with_overrides(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.widget_id, "w1");
        assert_eq!(config.store.base_url, "https://override.example.com");
        assert_eq!(config.http_store().auth_token.as_deref(), Some("secret"));
    }
}
