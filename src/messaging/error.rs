//! Messaging provider error types

use thiserror::Error;

/// Messaging error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MessagingError {
    pub kind: MessagingErrorKind,
    pub message: String,
}

impl MessagingError {
    pub fn new(kind: MessagingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::Network, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::Rejected, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::Auth, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(MessagingErrorKind::Unknown, message)
    }
}

/// Where a send went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagingErrorKind {
    /// Provider unreachable, timeouts, broken connections
    Network,
    /// Provider answered and refused the message (4xx other than auth, 5xx)
    Rejected,
    /// Credentials refused (401, 403)
    Auth,
    /// Anything that could not be classified, e.g. an unparseable answer
    Unknown,
}
