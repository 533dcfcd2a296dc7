//! Transient, dismissible notices raised by the entity managers.

use std::time::Duration;

/// How long a shell should keep a notice visible before hiding it.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_secs(6);

/// A message the shell surfaces until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    /// Build a notice carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Text to display.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Suggested display duration.
    pub fn auto_hide(&self) -> Duration {
        AUTO_HIDE_AFTER
    }
}
