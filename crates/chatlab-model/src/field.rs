//! Configuration field keys

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Value category of a field, selects validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text
    Text,
    /// `#rrggbb` color
    Color,
    /// CSS length such as `14px`
    Length,
}

/// A key of [`WidgetConfig`](crate::WidgetConfig)
///
/// Serializes to the camelCase wire name used by the store and the preview
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigField {
    /// `botName`
    BotName,
    /// `welcomeMessage`
    WelcomeMessage,
    /// `primaryColor`
    PrimaryColor,
    /// `userBubbleBg`
    UserBubbleBg,
    /// `userBubbleText`
    UserBubbleText,
    /// `botBubbleBg`
    BotBubbleBg,
    /// `botBubbleText`
    BotBubbleText,
    /// `headerTextColor`
    HeaderTextColor,
    /// `chatBg`
    ChatBg,
    /// `fontSize`
    FontSize,
    /// `borderRadius`
    BorderRadius,
    /// `bubbleRadius`
    BubbleRadius,
}

impl ConfigField {
    /// All fields in wire order
    pub const ALL: [Self; 12] = [
        Self::BotName,
        Self::WelcomeMessage,
        Self::PrimaryColor,
        Self::UserBubbleBg,
        Self::UserBubbleText,
        Self::BotBubbleBg,
        Self::BotBubbleText,
        Self::HeaderTextColor,
        Self::ChatBg,
        Self::FontSize,
        Self::BorderRadius,
        Self::BubbleRadius,
    ];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BotName => "botName",
            Self::WelcomeMessage => "welcomeMessage",
            Self::PrimaryColor => "primaryColor",
            Self::UserBubbleBg => "userBubbleBg",
            Self::UserBubbleText => "userBubbleText",
            Self::BotBubbleBg => "botBubbleBg",
            Self::BotBubbleText => "botBubbleText",
            Self::HeaderTextColor => "headerTextColor",
            Self::ChatBg => "chatBg",
            Self::FontSize => "fontSize",
            Self::BorderRadius => "borderRadius",
            Self::BubbleRadius => "bubbleRadius",
        }
    }

    /// Value category
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::BotName | Self::WelcomeMessage => FieldKind::Text,
            Self::FontSize | Self::BorderRadius | Self::BubbleRadius => FieldKind::Length,
            _ => FieldKind::Color,
        }
    }

    /// Check if field holds a color
    #[inline]
    #[must_use]
    pub const fn is_color(self) -> bool {
        matches!(self.kind(), FieldKind::Color)
    }

    /// Iterate over color fields
    pub fn colors() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|f| f.is_color())
    }
}

impl Display for ConfigField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}
