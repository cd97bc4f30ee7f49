//! chatlab Model
//!
//! Typed configuration for a deployed chat widget.
//!
//! # Core Concepts
//!
//! - [`WidgetConfig`]: the twelve style/content fields rendered by the widget
//! - [`ConfigField`]: closed set of field keys with wire names
//! - [`color`]: in-progress vs. save-time hex color rules
//! - [`embed`]: the `<script>` snippet that installs the widget
//!
//! # Example
//!
//! ```rust
//! use chatlab_model::{ConfigField, WidgetConfig};
//!
//! let mut config = WidgetConfig::default();
//! config.set(ConfigField::BotName, "Nova");
//! assert!(config.finalized().is_ok());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod color;
mod config;
pub mod embed;
mod error;
mod field;

pub use config::{PartialWidgetConfig, WidgetConfig, DEMO_WIDGET_ID};
pub use error::ValidationError;
pub use field::{ConfigField, FieldKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
