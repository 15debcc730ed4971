//! Toast notifications shown once on the next rendered page.

use serde::{Deserialize, Serialize};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    /// A success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// An error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// CSS modifier class for the toast element.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}
