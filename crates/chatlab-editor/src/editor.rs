//! Editing session
//!
//! [`ConfigEditor`] owns the draft for one widget. Every accepted field edit
//! publishes a complete snapshot to the preview channel, so the preview never
//! needs to merge diffs. Saving writes the style fields only; the authorized
//! domain list is managed elsewhere.

use std::sync::Arc;

use chatlab_model::{color, ConfigField, WidgetConfig, DEMO_WIDGET_ID};
use chatlab_preview::{PreviewChannel, PreviewMessage};
use chatlab_store::ConfigStore;

use crate::error::EditorError;
use crate::welcome::WelcomeGenerator;

/// How the draft was populated by [`ConfigEditor::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored document found and merged over defaults
    Found,
    /// No stored document; draft holds defaults
    NotFound,
    /// Demo widget; store not consulted
    Demo,
}

/// Editing session for one widget configuration
pub struct ConfigEditor {
    store: Arc<dyn ConfigStore>,
    preview: PreviewChannel,
    generator: Option<Arc<dyn WelcomeGenerator>>,
    widget_id: String,
    draft: WidgetConfig,
    saved: WidgetConfig,
}

impl ConfigEditor {
    /// Create session on the demo widget with default configuration
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>, preview: PreviewChannel) -> Self {
        Self {
            store,
            preview,
            generator: None,
            widget_id: DEMO_WIDGET_ID.to_string(),
            draft: WidgetConfig::default(),
            saved: WidgetConfig::default(),
        }
    }

    /// With welcome message generator
    #[inline]
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn WelcomeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Load a widget's configuration into the draft
    ///
    /// Stored fields are merged over defaults. The resulting draft is
    /// published so an attached preview is synchronized.
    ///
    /// # Errors
    /// Returns `Store` if the fetch fails. The draft and its saved baseline
    /// are kept and republished, so unsaved edits survive.
    pub async fn load(&mut self, widget_id: &str) -> Result<LoadOutcome, EditorError> {
        self.widget_id = widget_id.to_string();

        if widget_id == DEMO_WIDGET_ID {
            tracing::info!(widget_id, "demo widget, using defaults");
            self.reset(WidgetConfig::default());
            return Ok(LoadOutcome::Demo);
        }

        match self.store.fetch(widget_id).await {
            Ok(Some(doc)) => {
                tracing::info!(widget_id, "loaded widget configuration");
                self.reset(doc.config());
                Ok(LoadOutcome::Found)
            }
            Ok(None) => {
                tracing::info!(widget_id, "widget not found, using defaults");
                self.reset(WidgetConfig::default());
                Ok(LoadOutcome::NotFound)
            }
            Err(e) => {
                tracing::warn!(widget_id, "failed to load widget configuration: {}", e);
                self.publish();
                Err(e.into())
            }
        }
    }

    /// Set one field and publish the resulting snapshot
    ///
    /// Color fields accept in-progress values (`#`, `#6`, ...). A rejected
    /// value leaves the draft untouched and publishes nothing.
    ///
    /// # Errors
    /// Returns `Validation` for malformed color input
    pub fn set_field(&mut self, field: ConfigField, value: &str) -> Result<(), EditorError> {
        if field.is_color() {
            color::validate_color_input(value).map_err(|e| e.for_field(field.as_str()))?;
        }
        self.draft.set(field, value);
        tracing::debug!(field = %field, "draft field updated");
        self.publish();
        Ok(())
    }

    /// Set one field by wire name, e.g. `primaryColor`
    ///
    /// # Errors
    /// Returns `Validation` for an unknown name or malformed color input
    pub fn set_field_named(&mut self, name: &str, value: &str) -> Result<(), EditorError> {
        let field: ConfigField = name.parse()?;
        self.set_field(field, value)
    }

    /// Replace the welcome message with generated text
    ///
    /// Only `welcomeMessage` changes. Returns the generated text.
    ///
    /// # Errors
    /// - `NoGenerator` if none is configured
    /// - `Generation` if the generator fails; the draft is unchanged
    pub async fn generate_welcome_message(&mut self) -> Result<String, EditorError> {
        let generator = self.generator.clone().ok_or(EditorError::NoGenerator)?;
        let text = generator.generate(&self.draft).await.map_err(|e| {
            tracing::warn!(widget_id = %self.widget_id, "welcome generation failed: {}", e);
            e
        })?;
        self.set_field(ConfigField::WelcomeMessage, &text)?;
        Ok(text)
    }

    /// Persist the draft's style fields
    ///
    /// Colors are normalized to `#rrggbb` first. The demo widget is never
    /// persisted; saving it only marks the draft clean.
    ///
    /// # Errors
    /// - `Validation` if a color is incomplete; nothing is sent
    /// - `Store` if the write fails
    ///
    /// On error the draft is unchanged and stays dirty.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let finalized = self.draft.finalized()?;

        if self.widget_id == DEMO_WIDGET_ID {
            tracing::info!("demo widget, skipping persistence");
        } else {
            self.store
                .update_style(&self.widget_id, &finalized)
                .await
                .map_err(|e| {
                    tracing::warn!(widget_id = %self.widget_id, "save failed: {}", e);
                    e
                })?;
            tracing::info!(widget_id = %self.widget_id, "widget configuration saved");
        }

        let normalized = finalized != self.draft;
        self.draft = finalized.clone();
        self.saved = finalized;
        if normalized {
            self.publish();
        }
        Ok(())
    }

    /// Re-publish the current draft
    pub fn publish(&self) {
        self.preview.publish(&self.draft);
    }

    /// Current draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &WidgetConfig {
        &self.draft
    }

    /// Widget being edited
    #[inline]
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Check if the draft differs from the last loaded or saved state
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    /// Fields changed since the last load or save
    #[must_use]
    pub fn changed_fields(&self) -> Vec<ConfigField> {
        self.draft.changed_fields(&self.saved)
    }

    /// Message that [`publish`](Self::publish) would send
    #[must_use]
    pub fn snapshot(&self) -> PreviewMessage {
        PreviewMessage::config_update(&self.draft)
    }

    fn reset(&mut self, config: WidgetConfig) {
        self.saved = config.clone();
        self.draft = config;
        self.publish();
    }
}

impl std::fmt::Debug for ConfigEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigEditor")
            .field("widget_id", &self.widget_id)
            .field("draft", &self.draft)
            .field("dirty", &self.is_dirty())
            .field("has_generator", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}
