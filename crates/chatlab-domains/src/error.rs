//! Error types for the domain registry

use chatlab_store::StoreError;

/// Domain registry errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Index does not address an entry
    #[error("domain index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// List length at the time
        len: usize,
    },

    /// Persisting the list failed; the local list keeps the mutation
    #[error("domain list not persisted: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_transient())
    }
}
