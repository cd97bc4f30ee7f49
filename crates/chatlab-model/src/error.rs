//! Validation errors for widget configuration input

/// Rejected configuration input
///
/// Raised at the input boundary, before a value reaches the draft. Color
/// variants carry the wire name of the field once tagged with
/// [`ValidationError::for_field`]; it is empty until then.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Color value does not start with `#`
    #[error("color{} must start with '#': {value:?}", label(.field))]
    MissingHash {
        /// Field the value was meant for
        field: String,
        /// Rejected input
        value: String,
    },

    /// Color value contains a non-hex character
    #[error("invalid hex digit {found:?} in color{} {value:?}", label(.field))]
    InvalidHexDigit {
        /// Field the value was meant for
        field: String,
        /// Rejected input
        value: String,
        /// First offending character
        found: char,
    },

    /// Color value has more than six hex digits
    #[error("color{} has {digits} hex digits, at most 6 allowed: {value:?}", label(.field))]
    TooLong {
        /// Field the value was meant for
        field: String,
        /// Rejected input
        value: String,
        /// Number of digits after the `#`
        digits: usize,
    },

    /// Color value is not a complete 6-digit hex value
    #[error("color{} is incomplete: {value:?} (expected #rrggbb)", label(.field))]
    Incomplete {
        /// Field the value was meant for
        field: String,
        /// Rejected input
        value: String,
    },

    /// Key does not name a configuration field
    #[error("unknown configuration field: {0}")]
    UnknownField(String),
}

impl ValidationError {
    /// Attach the field name to a color error
    #[inline]
    #[must_use]
    pub fn for_field(mut self, name: &str) -> Self {
        match &mut self {
            Self::MissingHash { field, .. }
            | Self::InvalidHexDigit { field, .. }
            | Self::TooLong { field, .. }
            | Self::Incomplete { field, .. } => *field = name.to_string(),
            Self::UnknownField(_) => {}
        }
        self
    }

    /// Field a color error was tagged with
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingHash { field, .. }
            | Self::InvalidHexDigit { field, .. }
            | Self::TooLong { field, .. }
            | Self::Incomplete { field, .. } => Some(field.as_str()).filter(|f| !f.is_empty()),
            Self::UnknownField(_) => None,
        }
    }
}

fn label(field: &str) -> String {
    if field.is_empty() {
        String::new()
    } else {
        format!(" {field}")
    }
}
