//! One-shot status messages carried between a redirect and the next page.

use serde::{Deserialize, Serialize};

/// Severity of a transient message; doubles as the CSS class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Info,
    Success,
    Danger,
}

impl FlashLevel {
    /// Lowercase name used in markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// A message queued for display on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Styling category.
    pub level: FlashLevel,
    /// Message shown to the user, escaped on render.
    pub text: String,
}

impl Flash {
    /// Neutral notice, such as a login prompt.
    pub fn info(text: impl Into<String>) -> Self {
        Self::with_level(FlashLevel::Info, text)
    }

    /// Confirmation that an action completed.
    pub fn success(text: impl Into<String>) -> Self {
        Self::with_level(FlashLevel::Success, text)
    }

    /// Rejected input or a failed action.
    pub fn danger(text: impl Into<String>) -> Self {
        Self::with_level(FlashLevel::Danger, text)
    }

    fn with_level(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}
