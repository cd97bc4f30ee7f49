//! Welcome message generation seam

use async_trait::async_trait;
use chatlab_model::WidgetConfig;

/// Generator failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("welcome message generation failed: {message}")]
pub struct GenerationError {
    /// Reason reported by the generator
    pub message: String,
}

impl GenerationError {
    /// Create error with a message
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces a welcome message for a widget
///
/// Only the text is used; the editor decides where it lands.
#[async_trait]
pub trait WelcomeGenerator: Send + Sync {
    /// Generate welcome text for the current draft
    async fn generate(&self, config: &WidgetConfig) -> Result<String, GenerationError>;
}

/// Generator that greets with the bot name
///
/// Used when no remote generator is configured but a sensible default is
/// still wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateWelcome;

#[async_trait]
impl WelcomeGenerator for TemplateWelcome {
    async fn generate(&self, config: &WidgetConfig) -> Result<String, GenerationError> {
        let name = config.bot_name.trim();
        if name.is_empty() {
            return Ok("Hi there! How can I help you today?".to_string());
        }
        Ok(format!("Hi, I'm {name}! How can I help you today?"))
    }
}
