//! Widget configuration document
//!
//! [`WidgetConfig`] is the complete style/content document rendered by the
//! chat widget. [`PartialWidgetConfig`] is the same document with every field
//! optional, as returned by stores that only persisted some of the fields.

use serde::{Deserialize, Serialize};

use crate::color::finalize_color;
use crate::error::ValidationError;
use crate::field::ConfigField;

/// Widget id of the dashboard demo, never backed by a stored document
pub const DEMO_WIDGET_ID: &str = "demo-123";

/// Complete widget configuration
///
/// Every field is a plain string. Colors may hold partial values while a
/// draft is being edited; [`WidgetConfig::finalized`] enforces the save-time
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Display name shown in the widget header
    pub bot_name: String,
    /// First message the bot shows
    pub welcome_message: String,
    /// Brand color for the header and launcher
    pub primary_color: String,
    /// Background of visitor messages
    pub user_bubble_bg: String,
    /// Text color of visitor messages
    pub user_bubble_text: String,
    /// Background of bot messages
    pub bot_bubble_bg: String,
    /// Text color of bot messages
    pub bot_bubble_text: String,
    /// Text color in the header
    pub header_text_color: String,
    /// Background of the conversation pane
    pub chat_bg: String,
    /// CSS font size, e.g. `14px`
    pub font_size: String,
    /// CSS radius of the widget frame
    pub border_radius: String,
    /// CSS radius of message bubbles
    pub bubble_radius: String,
}

impl WidgetConfig {
    /// Create configuration with default styling
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With bot name
    #[inline]
    #[must_use]
    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// With primary color
    #[inline]
    #[must_use]
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }

    /// Get a field value
    #[must_use]
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::BotName => &self.bot_name,
            ConfigField::WelcomeMessage => &self.welcome_message,
            ConfigField::PrimaryColor => &self.primary_color,
            ConfigField::UserBubbleBg => &self.user_bubble_bg,
            ConfigField::UserBubbleText => &self.user_bubble_text,
            ConfigField::BotBubbleBg => &self.bot_bubble_bg,
            ConfigField::BotBubbleText => &self.bot_bubble_text,
            ConfigField::HeaderTextColor => &self.header_text_color,
            ConfigField::ChatBg => &self.chat_bg,
            ConfigField::FontSize => &self.font_size,
            ConfigField::BorderRadius => &self.border_radius,
            ConfigField::BubbleRadius => &self.bubble_radius,
        }
    }

    /// Mutable access to a field value
    fn slot(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::BotName => &mut self.bot_name,
            ConfigField::WelcomeMessage => &mut self.welcome_message,
            ConfigField::PrimaryColor => &mut self.primary_color,
            ConfigField::UserBubbleBg => &mut self.user_bubble_bg,
            ConfigField::UserBubbleText => &mut self.user_bubble_text,
            ConfigField::BotBubbleBg => &mut self.bot_bubble_bg,
            ConfigField::BotBubbleText => &mut self.bot_bubble_text,
            ConfigField::HeaderTextColor => &mut self.header_text_color,
            ConfigField::ChatBg => &mut self.chat_bg,
            ConfigField::FontSize => &mut self.font_size,
            ConfigField::BorderRadius => &mut self.border_radius,
            ConfigField::BubbleRadius => &mut self.bubble_radius,
        }
    }

    /// Replace a field value without validation
    ///
    /// Returns the previous value.
    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) -> String {
        std::mem::replace(self.slot(field), value.into())
    }

    /// Overlay the present fields of `partial` onto this configuration
    #[must_use]
    pub fn merged(mut self, partial: &PartialWidgetConfig) -> Self {
        for field in ConfigField::ALL {
            if let Some(value) = partial.get(field) {
                self.set(field, value);
            }
        }
        self
    }

    /// Apply save-time rules
    ///
    /// Every color field must be a full 6-digit hex value. Returns a copy with
    /// colors normalized to `#rrggbb`.
    ///
    /// # Errors
    /// Returns the first failing color, tagged with its field name.
    pub fn finalized(&self) -> Result<Self, ValidationError> {
        let mut out = self.clone();
        for field in ConfigField::colors() {
            let color = finalize_color(self.get(field)).map_err(|e| e.for_field(field.as_str()))?;
            out.set(field, color);
        }
        Ok(out)
    }

    /// Fields whose values differ from `other`
    #[must_use]
    pub fn changed_fields(&self, other: &Self) -> Vec<ConfigField> {
        ConfigField::ALL
            .into_iter()
            .filter(|&f| self.get(f) != other.get(f))
            .collect()
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            bot_name: String::new(),
            welcome_message: String::new(),
            primary_color: "#6366f1".to_string(),
            user_bubble_bg: "#6366f1".to_string(),
            user_bubble_text: "#ffffff".to_string(),
            bot_bubble_bg: "#f1f5f9".to_string(),
            bot_bubble_text: "#1e293b".to_string(),
            header_text_color: "#ffffff".to_string(),
            chat_bg: "#ffffff".to_string(),
            font_size: "14px".to_string(),
            border_radius: "20px".to_string(),
            bubble_radius: "16px".to_string(),
        }
    }
}

/// Widget configuration with every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialWidgetConfig {
    /// See [`WidgetConfig::bot_name`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,
    /// See [`WidgetConfig::welcome_message`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    /// See [`WidgetConfig::primary_color`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// See [`WidgetConfig::user_bubble_bg`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_bubble_bg: Option<String>,
    /// See [`WidgetConfig::user_bubble_text`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_bubble_text: Option<String>,
    /// See [`WidgetConfig::bot_bubble_bg`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_bubble_bg: Option<String>,
    /// See [`WidgetConfig::bot_bubble_text`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_bubble_text: Option<String>,
    /// See [`WidgetConfig::header_text_color`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text_color: Option<String>,
    /// See [`WidgetConfig::chat_bg`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_bg: Option<String>,
    /// See [`WidgetConfig::font_size`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// See [`WidgetConfig::border_radius`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// See [`WidgetConfig::bubble_radius`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bubble_radius: Option<String>,
}

impl PartialWidgetConfig {
    /// Get a field value if present
    #[must_use]
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        let value = match field {
            ConfigField::BotName => &self.bot_name,
            ConfigField::WelcomeMessage => &self.welcome_message,
            ConfigField::PrimaryColor => &self.primary_color,
            ConfigField::UserBubbleBg => &self.user_bubble_bg,
            ConfigField::UserBubbleText => &self.user_bubble_text,
            ConfigField::BotBubbleBg => &self.bot_bubble_bg,
            ConfigField::BotBubbleText => &self.bot_bubble_text,
            ConfigField::HeaderTextColor => &self.header_text_color,
            ConfigField::ChatBg => &self.chat_bg,
            ConfigField::FontSize => &self.font_size,
            ConfigField::BorderRadius => &self.border_radius,
            ConfigField::BubbleRadius => &self.bubble_radius,
        };
        value.as_deref()
    }

    /// Check if no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ConfigField::ALL.into_iter().all(|f| self.get(f).is_none())
    }
}

impl From<&WidgetConfig> for PartialWidgetConfig {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            bot_name: Some(config.bot_name.clone()),
            welcome_message: Some(config.welcome_message.clone()),
            primary_color: Some(config.primary_color.clone()),
            user_bubble_bg: Some(config.user_bubble_bg.clone()),
            user_bubble_text: Some(config.user_bubble_text.clone()),
            bot_bubble_bg: Some(config.bot_bubble_bg.clone()),
            bot_bubble_text: Some(config.bot_bubble_text.clone()),
            header_text_color: Some(config.header_text_color.clone()),
            chat_bg: Some(config.chat_bg.clone()),
            font_size: Some(config.font_size.clone()),
            border_radius: Some(config.border_radius.clone()),
            bubble_radius: Some(config.bubble_radius.clone()),
        }
    }
}
