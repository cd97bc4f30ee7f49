//! Testing utilities for the chatlab workspace
//!
//! Shared test doubles and fixtures.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chatlab_model::WidgetConfig;
use chatlab_preview::{Delivery, PreviewMessage, PreviewSink, TargetOrigin};
use chatlab_store::{ConfigStore, MemoryConfigStore, StoreError, StoredWidget};
use parking_lot::Mutex;

/// Preview sink that records every delivery
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.deliveries.lock().last().cloned()
    }

    /// Config carried by the last delivered snapshot
    pub fn last_config(&self) -> Option<WidgetConfig> {
        self.last()
            .and_then(|d| d.message.snapshot().cloned())
    }

    pub fn clear(&self) {
        self.deliveries.lock().clear();
    }
}

impl PreviewSink for RecordingSink {
    fn post(&self, message: &PreviewMessage, target: &TargetOrigin) {
        self.deliveries.lock().push(Delivery {
            target: target.clone(),
            message: message.clone(),
        });
    }
}

/// Store whose every call fails with the same error
#[derive(Debug)]
pub struct FailingStore {
    status: Option<u16>,
}

impl FailingStore {
    /// Fails like a dropped connection
    pub fn network() -> Self {
        Self { status: None }
    }

    /// Fails with an HTTP status
    pub fn http(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }

    fn error(&self) -> StoreError {
        match self.status {
            Some(status) => StoreError::Http {
                status,
                body: "rejected".to_string(),
            },
            None => StoreError::Request {
                message: "connection refused".to_string(),
            },
        }
    }
}

#[async_trait]
impl ConfigStore for FailingStore {
    async fn fetch(&self, _widget_id: &str) -> Result<Option<StoredWidget>, StoreError> {
        Err(self.error())
    }

    async fn update_style(&self, _widget_id: &str, _config: &WidgetConfig) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn replace_domains(&self, _widget_id: &str, _domains: &[String]) -> Result<(), StoreError> {
        Err(self.error())
    }
}

/// In-memory store that fails the first `failures` writes
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryConfigStore,
    failures: AtomicUsize,
}

impl FlakyStore {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: MemoryConfigStore::new(),
            failures: AtomicUsize::new(failures),
        }
    }

    pub fn inner(&self) -> &MemoryConfigStore {
        &self.inner
    }

    fn trip(&self) -> Result<(), StoreError> {
        let tripped = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if tripped {
            return Err(StoreError::Http {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FlakyStore {
    async fn fetch(&self, widget_id: &str) -> Result<Option<StoredWidget>, StoreError> {
        self.inner.fetch(widget_id).await
    }

    async fn update_style(&self, widget_id: &str, config: &WidgetConfig) -> Result<(), StoreError> {
        self.trip()?;
        self.inner.update_style(widget_id, config).await
    }

    async fn replace_domains(&self, widget_id: &str, domains: &[String]) -> Result<(), StoreError> {
        self.trip()?;
        self.inner.replace_domains(widget_id, domains).await
    }
}

/// In-memory store whose reads fail while writes go through
#[derive(Debug)]
pub struct UnreadableStore {
    inner: MemoryConfigStore,
}

impl UnreadableStore {
    pub fn new(inner: MemoryConfigStore) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &MemoryConfigStore {
        &self.inner
    }
}

#[async_trait]
impl ConfigStore for UnreadableStore {
    async fn fetch(&self, _widget_id: &str) -> Result<Option<StoredWidget>, StoreError> {
        Err(StoreError::Request {
            message: "operation timed out".to_string(),
        })
    }

    async fn update_style(&self, widget_id: &str, config: &WidgetConfig) -> Result<(), StoreError> {
        self.inner.update_style(widget_id, config).await
    }

    async fn replace_domains(&self, widget_id: &str, domains: &[String]) -> Result<(), StoreError> {
        self.inner.replace_domains(widget_id, domains).await
    }
}

/// Stored widget with a custom bot name and brand color
pub fn branded_widget(bot_name: &str, primary_color: &str) -> StoredWidget {
    StoredWidget::from_config(
        &WidgetConfig::default()
            .with_bot_name(bot_name)
            .with_primary_color(primary_color),
    )
}

/// Memory store seeded with one branded widget under `widget_id`
pub fn seeded_store(widget_id: &str) -> MemoryConfigStore {
    MemoryConfigStore::new().with_widget(
        widget_id,
        branded_widget("Nova", "#112233").with_domains(vec!["https://example.com".to_string()]),
    )
}
