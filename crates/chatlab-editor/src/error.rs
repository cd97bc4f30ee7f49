//! Error types for the editing session

use chatlab_model::ValidationError;
use chatlab_store::StoreError;

use crate::welcome::GenerationError;

/// Editing session errors
///
/// None of these end the session; the draft stays usable.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Input rejected before reaching the draft, or save-time check failed
    #[error("invalid value: {0}")]
    Validation(#[from] ValidationError),

    /// Store call failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Welcome generator failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// No welcome generator configured
    #[error("no welcome message generator configured")]
    NoGenerator,
}

impl EditorError {
    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            Self::Generation(_) => true,
            Self::Validation(_) | Self::NoGenerator => false,
        }
    }

    /// Short, dismissible message for the user
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(ValidationError::UnknownField(name)) => {
                format!("Unknown setting: {name}")
            }
            Self::Validation(e @ ValidationError::Incomplete { .. }) => match e.field() {
                Some(field) => format!("{field} must be a full #rrggbb color"),
                None => "Colors must be full #rrggbb values".to_string(),
            },
            Self::Validation(e) => match e.field() {
                Some(field) => format!("{field} must look like #rrggbb"),
                None => "Colors must look like #rrggbb".to_string(),
            },
            Self::Store(StoreError::Http { status: 404, .. }) => {
                "Widget not found".to_string()
            }
            Self::Store(e) if e.is_transient() => {
                "Could not reach the server, please try again".to_string()
            }
            Self::Store(_) => "Saving failed".to_string(),
            Self::Generation(_) => "Could not generate a welcome message".to_string(),
            Self::NoGenerator => "Welcome message generation is unavailable".to_string(),
        }
    }
}
