//! Store contract
//!
//! The durable copy of a widget lives behind [`ConfigStore`]. Writes are
//! whole-value replacements: the style subset replaces the style fields, the
//! domain list replaces the domain list. There is no version token, so
//! concurrent writers resolve as last-write-wins.

use async_trait::async_trait;
use chatlab_model::{PartialWidgetConfig, WidgetConfig};
use serde::{Deserialize, Serialize};

/// Widget document as held by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWidget {
    /// Persisted style fields, possibly incomplete
    #[serde(flatten)]
    pub style: PartialWidgetConfig,

    /// Authorized embedding origins
    #[serde(default)]
    pub whitelisted_domains: Vec<String>,

    /// Billing flag, carried but never edited here
    #[serde(default)]
    pub is_paid: bool,
}

impl StoredWidget {
    /// Create from a full configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            style: PartialWidgetConfig::from(config),
            ..Self::default()
        }
    }

    /// With authorized domains
    #[inline]
    #[must_use]
    pub fn with_domains(mut self, domains: Vec<String>) -> Self {
        self.whitelisted_domains = domains;
        self
    }

    /// Resolve the style fields over defaults
    #[inline]
    #[must_use]
    pub fn config(&self) -> WidgetConfig {
        WidgetConfig::default().merged(&self.style)
    }
}

/// Request body for a domain list replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainsUpdate {
    /// Complete replacement list
    pub domains: Vec<String>,
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No base URL configured
    #[error("store base url missing")]
    BaseUrlMissing,

    /// Request could not be sent or timed out
    #[error("store request failed: {message}")]
    Request {
        /// Transport error text
        message: String,
    },

    /// Response body could not be read
    #[error("store response read failed: {message}")]
    Read {
        /// Transport error text
        message: String,
    },

    /// Non-success status
    #[error("store returned http {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Trimmed response body, `<empty>` when blank
        body: String,
    },

    /// Response body is not a widget document
    #[error("store response decode failed: {message}")]
    Decode {
        /// Decoder error text
        message: String,
    },

    /// Request body could not be serialized
    #[error("store request encode failed: {message}")]
    Encode {
        /// Encoder error text
        message: String,
    },
}

impl StoreError {
    /// Check if error is a transient network failure
    ///
    /// Transient failures are worth a user-visible retry.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request { .. } | Self::Read { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Durable widget configuration store
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the stored document
    ///
    /// Returns `Ok(None)` when no document exists for `widget_id`.
    async fn fetch(&self, widget_id: &str) -> Result<Option<StoredWidget>, StoreError>;

    /// Replace the style fields with `config`
    ///
    /// Domain data is never part of this write.
    async fn update_style(&self, widget_id: &str, config: &WidgetConfig) -> Result<(), StoreError>;

    /// Replace the whole authorized-domain list
    async fn replace_domains(&self, widget_id: &str, domains: &[String]) -> Result<(), StoreError>;
}
