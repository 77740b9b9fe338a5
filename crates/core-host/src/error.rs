//! Host bridge failures.

use thiserror::Error;

/// Editor error code raised when text may not change while completion is
/// resolving (the transient text lock).
pub const TEXT_LOCK_CODE: &str = "E565";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Buffer mutation refused while completion holds the text lock.
    #[error("E565: text is locked while completion is active")]
    TextLocked,
    #[error("host call `{call}` failed: {message}")]
    Call {
        call: &'static str,
        message: String,
    },
    #[error("host call `{call}` returned an unexpected reply (expected {expected})")]
    UnexpectedReply {
        call: &'static str,
        expected: &'static str,
    },
}

impl HostError {
    /// Classify a raw bridge error message.
    pub fn from_message(call: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(TEXT_LOCK_CODE) {
            Self::TextLocked
        } else {
            Self::Call { call, message }
        }
    }

    pub fn is_text_locked(&self) -> bool {
        matches!(self, Self::TextLocked)
    }
}
