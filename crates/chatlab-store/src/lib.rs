//! chatlab Store
//!
//! Contract for the durable widget configuration store, with an HTTP client
//! for the widget API and an in-memory implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatlab_store::{ConfigStore, HttpConfigStore, HttpStoreConfig};
//!
//! let store = HttpConfigStore::new(HttpStoreConfig::new("https://api.example.com"))?;
//! match store.fetch("w1").await? {
//!     Some(doc) => println!("bot: {}", doc.config().bot_name),
//!     None => println!("not provisioned"),
//! }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod http;
mod memory;
mod store;

pub use http::{HttpConfigStore, HttpStoreConfig};
pub use memory::{MemoryConfigStore, StoreWrite};
pub use store::{ConfigStore, DomainsUpdate, StoreError, StoredWidget};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
