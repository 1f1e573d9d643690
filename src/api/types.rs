//! API request and response types

use serde::{Deserialize, Serialize};

/// Fields posted by the messaging provider. They may arrive in the form
/// body or the query string.
#[derive(Debug, Default, Deserialize)]
pub struct InboundMessageForm {
    /// Sender, transport-prefixed (`whatsapp:+49…`)
    #[serde(rename = "From")]
    pub from: Option<String>,
    /// Message text as typed by the user
    #[serde(rename = "Body")]
    pub body: Option<String>,
}

impl InboundMessageForm {
    /// Fill fields missing here from `fallback`
    pub fn or(self, fallback: Self) -> Self {
        Self {
            from: self.from.or(fallback.from),
            body: self.body.or(fallback.body),
        }
    }

    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Response for a handled message
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_fields_take_precedence() {
        let query = InboundMessageForm {
            from: Some("whatsapp:+491234".to_string()),
            body: None,
        };
        let form = InboundMessageForm {
            from: Some("whatsapp:+490000".to_string()),
            body: Some("menu".to_string()),
        };

        let merged = query.or(form);
        assert_eq!(merged.sender(), "whatsapp:+491234");
        assert_eq!(merged.text(), "menu");
        assert_eq!(InboundMessageForm::default().sender(), "");
    }
}
