//! Preview wire messages

use chatlab_model::WidgetConfig;
use serde::{Deserialize, Serialize};

/// Message sent from the editor to the preview surface
///
/// Internally tagged on `type`. Every message carries complete data, never a
/// delta, so a receiver needs no memory of earlier messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreviewMessage {
    /// Full configuration snapshot
    #[serde(rename = "CONFIG_UPDATE")]
    ConfigUpdate {
        /// Every field, never a diff
        config: WidgetConfig,
    },

    /// Any kind this build does not know; receivers ignore it
    #[serde(other)]
    Unknown,
}

impl PreviewMessage {
    /// Wire tag for snapshots
    pub const CONFIG_UPDATE: &'static str = "CONFIG_UPDATE";

    /// Create snapshot message
    #[inline]
    #[must_use]
    pub fn config_update(config: &WidgetConfig) -> Self {
        Self::ConfigUpdate {
            config: config.clone(),
        }
    }

    /// Snapshot carried by this message
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&WidgetConfig> {
        match self {
            Self::ConfigUpdate { config } => Some(config),
            Self::Unknown => None,
        }
    }

    /// Encode to JSON text
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode from JSON text
    ///
    /// # Errors
    /// Returns error for malformed JSON or a snapshot with missing fields
    #[inline]
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
