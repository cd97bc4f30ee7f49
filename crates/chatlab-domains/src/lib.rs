//! chatlab Domains
//!
//! Authorized embedding origins for a widget.
//!
//! # Core Concepts
//!
//! - [`sanitize`]: raw user input to `scheme://host[:port]`
//! - [`DomainRegistry`]: ordered, deduplicated origin list persisted as a
//!   whole on every mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chatlab_domains::DomainRegistry;
//! use chatlab_store::MemoryConfigStore;
//!
//! let mut registry = DomainRegistry::new("w1", Arc::new(MemoryConfigStore::new()));
//! registry.add("HTTPS://Example.COM/pricing").await?;
//! assert_eq!(registry.domains(), &["https://example.com".to_string()]);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod error;
mod registry;
mod sanitize;

pub use error::DomainError;
pub use registry::DomainRegistry;
pub use sanitize::{display_host, sanitize, sanitize_detailed, Sanitized};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
