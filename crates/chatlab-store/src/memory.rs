//! In-process configuration store

use std::collections::HashMap;

use async_trait::async_trait;
use chatlab_model::{PartialWidgetConfig, WidgetConfig};
use parking_lot::Mutex;

use crate::store::{ConfigStore, StoreError, StoredWidget};

/// A write accepted by [`MemoryConfigStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// Style subset replaced
    Style {
        /// Target widget
        widget_id: String,
        /// Config as sent
        config: WidgetConfig,
    },
    /// Domain list replaced
    Domains {
        /// Target widget
        widget_id: String,
        /// Full list as sent
        domains: Vec<String>,
    },
}

/// Configuration store held in memory
///
/// Writes upsert the widget document and are recorded in order.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    widgets: Mutex<HashMap<String, StoredWidget>>,
    writes: Mutex<Vec<StoreWrite>>,
}

impl MemoryConfigStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a seeded widget document
    #[must_use]
    pub fn with_widget(self, widget_id: impl Into<String>, widget: StoredWidget) -> Self {
        self.insert(widget_id, widget);
        self
    }

    /// Insert or replace a widget document
    pub fn insert(&self, widget_id: impl Into<String>, widget: StoredWidget) {
        self.widgets.lock().insert(widget_id.into(), widget);
    }

    /// Current document for a widget
    #[must_use]
    pub fn get(&self, widget_id: &str) -> Option<StoredWidget> {
        self.widgets.lock().get(widget_id).cloned()
    }

    /// All writes accepted so far
    #[must_use]
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().clone()
    }

    /// Number of writes accepted so far
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn fetch(&self, widget_id: &str) -> Result<Option<StoredWidget>, StoreError> {
        Ok(self.get(widget_id))
    }

    async fn update_style(&self, widget_id: &str, config: &WidgetConfig) -> Result<(), StoreError> {
        self.widgets
            .lock()
            .entry(widget_id.to_string())
            .or_default()
            .style = PartialWidgetConfig::from(config);
        self.writes.lock().push(StoreWrite::Style {
            widget_id: widget_id.to_string(),
            config: config.clone(),
        });
        Ok(())
    }

    async fn replace_domains(&self, widget_id: &str, domains: &[String]) -> Result<(), StoreError> {
        self.widgets
            .lock()
            .entry(widget_id.to_string())
            .or_default()
            .whitelisted_domains = domains.to_vec();
        self.writes.lock().push(StoreWrite::Domains {
            widget_id: widget_id.to_string(),
            domains: domains.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_missing_is_none() {
        let store = MemoryConfigStore::new();
        assert!(store.fetch("w1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn style_write_keeps_domains() {
        let store = MemoryConfigStore::new().with_widget(
            "w1",
            StoredWidget::default().with_domains(vec!["https://a.com".to_string()]),
        );

        let config = WidgetConfig::default().with_bot_name("Nova");
        store.update_style("w1", &config).await.unwrap();

        let stored = store.get("w1").unwrap();
        assert_eq!(stored.config(), config);
        assert_eq!(stored.whitelisted_domains, vec!["https://a.com".to_string()]);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn domain_write_replaces_whole_list() {
        let store = MemoryConfigStore::new().with_widget(
            "w1",
            StoredWidget::default().with_domains(vec!["https://old.com".to_string()]),
        );

        store
            .replace_domains("w1", &["https://new.com".to_string()])
            .await
            .unwrap();

        assert_eq!(
            store.get("w1").unwrap().whitelisted_domains,
            vec!["https://new.com".to_string()]
        );
        assert!(matches!(store.writes()[0], StoreWrite::Domains { .. }));
    }
}
