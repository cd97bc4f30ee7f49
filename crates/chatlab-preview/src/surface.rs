//! Receiving side of the preview protocol
//!
//! [`PreviewSurface`] keeps nothing but the last applied snapshot. Applying a
//! message is a pure function of that message, so duplicates and reordering
//! only ever leave the surface showing one complete configuration.

use std::collections::BTreeMap;

use chatlab_model::{ConfigField, FieldKind, WidgetConfig};

use crate::channel::Delivery;
use crate::message::PreviewMessage;

/// Receiving preview surface
///
/// Holds rendering data only; nothing received here can grant the surface any
/// other capability.
#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    own_origin: Option<String>,
    trusted_sender: Option<String>,
    state: Option<WidgetConfig>,
}

impl PreviewSurface {
    /// Create surface that accepts messages from any sender
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin this surface runs at, matched against delivery targets
    #[inline]
    #[must_use]
    pub fn with_own_origin(mut self, origin: impl Into<String>) -> Self {
        self.own_origin = Some(origin.into());
        self
    }

    /// Only accept messages posted from `origin`
    #[inline]
    #[must_use]
    pub fn with_trusted_sender(mut self, origin: impl Into<String>) -> Self {
        self.trusted_sender = Some(origin.into());
        self
    }

    /// Apply a message
    ///
    /// Returns `true` if the render state was replaced. Messages from an
    /// untrusted sender and unknown kinds are dropped.
    pub fn receive(&mut self, sender_origin: &str, message: &PreviewMessage) -> bool {
        if let Some(trusted) = &self.trusted_sender {
            if trusted != sender_origin {
                tracing::debug!(sender_origin, "dropping preview message from untrusted sender");
                return false;
            }
        }
        match message {
            PreviewMessage::ConfigUpdate { config } => {
                self.state = Some(config.clone());
                true
            }
            PreviewMessage::Unknown => false,
        }
    }

    /// Decode and apply raw JSON text
    ///
    /// Malformed text is dropped.
    pub fn receive_json(&mut self, sender_origin: &str, raw: &str) -> bool {
        match PreviewMessage::from_json(raw) {
            Ok(message) => self.receive(sender_origin, &message),
            Err(error) => {
                tracing::debug!("dropping malformed preview message: {}", error);
                false
            }
        }
    }

    /// Apply a delivery if its target permits this surface
    pub fn accept(&mut self, sender_origin: &str, delivery: &Delivery) -> bool {
        let permitted = self
            .own_origin
            .as_deref()
            .map_or(true, |own| delivery.target.permits(own));
        if !permitted {
            return false;
        }
        self.receive(sender_origin, &delivery.message)
    }

    /// Configuration currently rendered
    #[inline]
    #[must_use]
    pub fn render_state(&self) -> Option<&WidgetConfig> {
        self.state.as_ref()
    }

    /// CSS custom properties for the current render state
    ///
    /// Style fields map to kebab-case names, e.g. `primaryColor` →
    /// `--primary-color`. Text fields are not styles and are left out.
    #[must_use]
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        let Some(config) = &self.state else {
            return BTreeMap::new();
        };
        ConfigField::ALL
            .into_iter()
            .filter(|f| f.kind() != FieldKind::Text)
            .map(|f| (css_variable_name(f), config.get(f).to_string()))
            .collect()
    }
}

/// CSS custom property name for a field
#[must_use]
pub fn css_variable_name(field: ConfigField) -> String {
    let mut name = String::from("--");
    for c in field.as_str().chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
