//! Twilio WhatsApp messaging provider

use super::{whatsapp_address, MessagingError, MessagingService, SentMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Credentials and sender for the Twilio Messages API
#[derive(Debug, Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sending number, already in `whatsapp:+…` form
    pub from_number: String,
    pub api_base: Option<String>,
}

impl TwilioConfig {
    pub fn is_complete(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

/// Twilio messaging service implementation
pub struct TwilioMessenger {
    client: Client,
    config: TwilioConfig,
    messages_url: String,
}

impl TwilioMessenger {
    pub fn new(config: TwilioConfig) -> Self {
        let base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        let messages_url = format!(
            "{base}/2010-04-01/Accounts/{}/Messages.json",
            config.account_sid
        );

        Self {
            client: Client::new(),
            config,
            messages_url,
        }
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> MessagingError {
        let message = serde_json::from_str::<TwilioErrorResponse>(body)
            .map(|e| match e.code {
                Some(code) => format!("{} (code {code})", e.message),
                None => e.message,
            })
            .unwrap_or_else(|_| body.to_string());

        match status.as_u16() {
            401 | 403 => MessagingError::auth(format!("Authentication failed: {message}")),
            _ => MessagingError::rejected(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl MessagingService for TwilioMessenger {
    async fn send(&self, destination: &str, body: &str) -> Result<SentMessage, MessagingError> {
        let to = whatsapp_address(destination);
        let params = [
            ("From", self.config.from_number.as_str()),
            ("To", to.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MessagingError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    MessagingError::network(format!("Connection failed: {e}"))
                } else {
                    MessagingError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MessagingError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &text));
        }

        let created: TwilioMessageResponse = serde_json::from_str(&text).map_err(|e| {
            MessagingError::unknown(format!("Failed to parse response: {e} - body: {text}"))
        })?;

        Ok(SentMessage { sid: created.sid })
    }
}

// Twilio API types

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    code: Option<i64>,
    message: String,
}
