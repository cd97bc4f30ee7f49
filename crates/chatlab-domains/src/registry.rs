//! Authorized-origin registry
//!
//! Provides [`DomainRegistry`], the ordered, deduplicated list of origins a
//! widget may be embedded on.
//!
//! Every mutation writes the **entire** list back to the store. There is no
//! version check, so two sessions editing the same widget overwrite each other
//! with last-write-wins.

use std::sync::Arc;

use chatlab_store::ConfigStore;

use crate::error::DomainError;
use crate::sanitize::{sanitize_detailed, Sanitized};

/// Ordered set of authorized origins for one widget
pub struct DomainRegistry {
    widget_id: String,
    domains: Vec<String>,
    store: Arc<dyn ConfigStore>,
}

impl DomainRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new(widget_id: impl Into<String>, store: Arc<dyn ConfigStore>) -> Self {
        Self::from_domains(widget_id, store, Vec::new())
    }

    /// Create registry seeded with an existing list, taken as-is
    #[inline]
    #[must_use]
    pub fn from_domains(
        widget_id: impl Into<String>,
        store: Arc<dyn ConfigStore>,
        domains: Vec<String>,
    ) -> Self {
        Self {
            widget_id: widget_id.into(),
            domains,
            store,
        }
    }

    /// Load the stored list for a widget
    ///
    /// A widget with no stored document starts empty.
    ///
    /// # Errors
    /// Returns `Store` if the fetch fails
    pub async fn load(
        widget_id: impl Into<String>,
        store: Arc<dyn ConfigStore>,
    ) -> Result<Self, DomainError> {
        let widget_id = widget_id.into();
        let domains = store
            .fetch(&widget_id)
            .await?
            .map(|doc| doc.whitelisted_domains)
            .unwrap_or_default();
        tracing::info!(widget_id = %widget_id, count = domains.len(), "loaded authorized domains");
        Ok(Self::from_domains(widget_id, store, domains))
    }

    /// Widget this registry belongs to
    #[inline]
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Entries in display order
    #[inline]
    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Check for an exact normalized entry
    #[inline]
    #[must_use]
    pub fn contains(&self, origin: &str) -> bool {
        self.domains.iter().any(|d| d == origin)
    }

    /// Add an origin
    ///
    /// Returns `false` without touching the store if the sanitized value is
    /// empty or already present.
    ///
    /// # Errors
    /// Returns `Store` if persisting fails; the entry stays in the local list
    pub async fn add(&mut self, raw: &str) -> Result<bool, DomainError> {
        let clean = Self::clean(raw);
        if clean.is_empty() || self.contains(&clean) {
            tracing::debug!(raw, "domain add is a no-op");
            return Ok(false);
        }
        self.domains.push(clean);
        self.persist().await?;
        Ok(true)
    }

    /// Replace the entry at `index`
    ///
    /// No collision check against other entries is made. Returns the
    /// previous entry.
    ///
    /// # Errors
    /// - `IndexOutOfRange` before any mutation
    /// - `Store` if persisting fails; the replacement stays in the local list
    pub async fn edit(&mut self, index: usize, raw: &str) -> Result<String, DomainError> {
        self.check_index(index)?;
        let clean = Self::clean(raw);
        let previous = std::mem::replace(&mut self.domains[index], clean);
        self.persist().await?;
        Ok(previous)
    }

    /// Remove the entry at `index`, preserving the order of the rest
    ///
    /// # Errors
    /// - `IndexOutOfRange` before any mutation
    /// - `Store` if persisting fails; the entry stays removed locally
    pub async fn remove(&mut self, index: usize) -> Result<String, DomainError> {
        self.check_index(index)?;
        let removed = self.domains.remove(index);
        self.persist().await?;
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.domains.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.domains.len(),
            });
        }
        Ok(())
    }

    fn clean(raw: &str) -> String {
        match sanitize_detailed(raw) {
            Sanitized::Origin(origin) => origin,
            Sanitized::Fallback(value) => {
                if !value.is_empty() {
                    // kept verbatim; the widget host compares it as a plain string
                    tracing::warn!(value = %value, "admitting unparseable domain as-is");
                }
                value
            }
        }
    }

    async fn persist(&self) -> Result<(), DomainError> {
        tracing::debug!(widget_id = %self.widget_id, count = self.domains.len(), "persisting domain list");
        self.store
            .replace_domains(&self.widget_id, &self.domains)
            .await
            .map_err(|e| {
                tracing::warn!(widget_id = %self.widget_id, "domain list persist failed: {}", e);
                DomainError::Store(e)
            })
    }
}

impl std::fmt::Debug for DomainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainRegistry")
            .field("widget_id", &self.widget_id)
            .field("domains", &self.domains)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlab_store::{MemoryConfigStore, StoreWrite, StoredWidget};
    use chatlab_test_utils::FailingStore;
    use pretty_assertions::assert_eq;

    fn registry_with(domains: &[&str]) -> (DomainRegistry, Arc<MemoryConfigStore>) {
        let store = Arc::new(MemoryConfigStore::new());
        let registry = DomainRegistry::from_domains(
            "w1",
            store.clone(),
            domains.iter().map(|d| (*d).to_string()).collect(),
        );
        (registry, store)
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let (mut registry, store) = registry_with(&[]);

        assert!(registry.add("example.com").await.unwrap());
        assert!(!registry.add("example.com").await.unwrap());

        assert_eq!(registry.domains(), &["http://example.com".to_string()]);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn dedupe_is_scheme_sensitive() {
        let (mut registry, _store) = registry_with(&[]);

        registry.add("HTTPS://Example.COM").await.unwrap();
        assert_eq!(registry.domains(), &["https://example.com".to_string()]);

        registry.add("example.com").await.unwrap();
        assert_eq!(
            registry.domains(),
            &["https://example.com".to_string(), "http://example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn add_empty_is_noop() {
        let (mut registry, store) = registry_with(&[]);
        assert!(!registry.add("   ").await.unwrap());
        assert!(registry.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn add_persists_entire_list() {
        let (mut registry, store) = registry_with(&["https://a.com"]);
        registry.add("b.com").await.unwrap();

        assert_eq!(
            store.writes(),
            vec![StoreWrite::Domains {
                widget_id: "w1".to_string(),
                domains: vec!["https://a.com".to_string(), "http://b.com".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn edit_replaces_in_place() {
        let (mut registry, store) = registry_with(&["https://a.com", "https://b.com", "https://c.com"]);

        let previous = registry.edit(1, "https://B2.com/x").await.unwrap();

        assert_eq!(previous, "https://b.com");
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.domains(),
            &[
                "https://a.com".to_string(),
                "https://b2.com".to_string(),
                "https://c.com".to_string()
            ]
        );
        assert_eq!(store.get("w1").unwrap().whitelisted_domains, registry.domains());
    }

    #[tokio::test]
    async fn edit_does_not_check_collisions() {
        let (mut registry, _store) = registry_with(&["https://a.com", "https://b.com"]);
        registry.edit(1, "https://a.com").await.unwrap();
        assert_eq!(
            registry.domains(),
            &["https://a.com".to_string(), "https://a.com".to_string()]
        );
    }

    #[tokio::test]
    async fn remove_preserves_order() {
        let (mut registry, store) = registry_with(&["https://a.com", "https://b.com", "https://c.com"]);

        let removed = registry.remove(0).await.unwrap();

        assert_eq!(removed, "https://a.com");
        assert_eq!(
            registry.domains(),
            &["https://b.com".to_string(), "https://c.com".to_string()]
        );
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn out_of_range_index_is_rejected_without_write() {
        let (mut registry, store) = registry_with(&["https://a.com"]);

        let err = registry.remove(5).await.unwrap_err();
        assert!(matches!(err, DomainError::IndexOutOfRange { index: 5, len: 1 }));
        let err = registry.edit(1, "x.com").await.unwrap_err();
        assert!(matches!(err, DomainError::IndexOutOfRange { index: 1, len: 1 }));

        assert_eq!(registry.len(), 1);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn fallback_value_is_admitted() {
        let (mut registry, _store) = registry_with(&[]);
        assert!(registry.add("Not A Host").await.unwrap());
        assert_eq!(registry.domains(), &["not a host".to_string()]);
    }

    #[tokio::test]
    async fn persist_failure_keeps_local_mutation() {
        let store = Arc::new(FailingStore::network());
        let mut registry = DomainRegistry::new("w1", store);

        let err = registry.add("example.com").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(registry.domains(), &["http://example.com".to_string()]);
    }

    #[tokio::test]
    async fn load_reads_stored_list() {
        let store = Arc::new(MemoryConfigStore::new().with_widget(
            "w1",
            StoredWidget::default().with_domains(vec!["https://a.com".to_string()]),
        ));

        let registry = DomainRegistry::load("w1", store.clone()).await.unwrap();
        assert_eq!(registry.domains(), &["https://a.com".to_string()]);

        let empty = DomainRegistry::load("missing", store).await.unwrap();
        assert!(empty.is_empty());
    }
}
