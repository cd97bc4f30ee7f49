//! chatlab Editor
//!
//! Editing session for a widget configuration with live preview.
//!
//! # Flow
//!
//! 1. [`ConfigEditor::load`] fills the draft from the store (or defaults)
//! 2. [`ConfigEditor::set_field`] edits the draft and publishes a snapshot
//! 3. [`ConfigEditor::save`] finalizes colors and persists the style fields
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chatlab_editor::ConfigEditor;
//! use chatlab_model::ConfigField;
//! use chatlab_preview::PreviewChannel;
//! use chatlab_store::MemoryConfigStore;
//!
//! let mut editor = ConfigEditor::new(
//!     Arc::new(MemoryConfigStore::new()),
//!     PreviewChannel::disconnected(),
//! );
//! editor.load("w1").await?;
//! editor.set_field(ConfigField::BotName, "Nova")?;
//! editor.save().await?;
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod editor;
mod error;
mod welcome;

pub use editor::{ConfigEditor, LoadOutcome};
pub use error::EditorError;
pub use welcome::{GenerationError, TemplateWelcome, WelcomeGenerator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
