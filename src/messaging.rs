//! Outbound messaging provider abstraction
//!
//! Replies to users go through a [`MessagingService`]; the runtime reduces
//! its typed result to delivered / not delivered.

mod error;
mod twilio;

pub use error::{MessagingError, MessagingErrorKind};
pub use twilio::{TwilioConfig, TwilioMessenger};

use async_trait::async_trait;
use std::sync::Arc;

/// Transport prefix used by the WhatsApp channel
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// A message the provider accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Provider-issued message identifier
    pub sid: String,
}

/// Common interface for messaging providers
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Send `body` to `destination` (bare or transport-prefixed)
    async fn send(&self, destination: &str, body: &str) -> Result<SentMessage, MessagingError>;
}

#[async_trait]
impl<T: MessagingService + ?Sized> MessagingService for Arc<T> {
    async fn send(&self, destination: &str, body: &str) -> Result<SentMessage, MessagingError> {
        (**self).send(destination, body).await
    }
}

/// Address `destination` on the WhatsApp channel unless it already is
pub fn whatsapp_address(destination: &str) -> String {
    if destination.starts_with(WHATSAPP_PREFIX) {
        destination.to_string()
    } else {
        format!("{WHATSAPP_PREFIX}{destination}")
    }
}

/// Remove every transport prefix from an inbound sender
pub fn strip_transport_prefix(sender: &str) -> String {
    sender.replace(WHATSAPP_PREFIX, "")
}

/// Logging wrapper for messaging providers
pub struct LoggingMessenger {
    inner: Arc<dyn MessagingService>,
}

impl LoggingMessenger {
    pub fn new(inner: Arc<dyn MessagingService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MessagingService for LoggingMessenger {
    async fn send(&self, destination: &str, body: &str) -> Result<SentMessage, MessagingError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(destination, body).await;
        let duration = start.elapsed();

        match &result {
            Ok(sent) => {
                tracing::info!(
                    to = %destination,
                    sid = %sent.sid,
                    duration_ms = %duration.as_millis(),
                    "Message sent"
                );
            }
            Err(e) => {
                tracing::error!(
                    to = %destination,
                    kind = ?e.kind,
                    error = %e.message,
                    duration_ms = %duration.as_millis(),
                    "Message send failed"
                );
            }
        }

        result
    }
}
