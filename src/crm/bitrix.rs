//! Bitrix24 inbound-webhook lead backend

use super::{CrmError, Lead, LeadSink};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Submits leads via a Bitrix24 `crm.lead.add` webhook URL
pub struct BitrixLeadSink {
    client: Client,
    webhook_url: Option<String>,
}

impl BitrixLeadSink {
    /// A sink without a URL never touches the network
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
        }
    }

    fn build_request(lead: &Lead) -> BitrixLeadRequest {
        BitrixLeadRequest {
            fields: BitrixLeadFields {
                title: format!("Лид из WhatsApp: {}", lead.name),
                name: lead.name.clone(),
                phone: vec![BitrixPhone {
                    value: lead.phone.clone(),
                    value_type: "WORK".to_string(),
                }],
                comments: lead.comments(),
            },
        }
    }
}

#[async_trait]
impl LeadSink for BitrixLeadSink {
    async fn submit(&self, lead: &Lead) -> Result<(), CrmError> {
        let Some(url) = self.webhook_url.as_deref() else {
            return Err(CrmError::NotConfigured);
        };

        let response = self
            .client
            .post(url)
            .json(&Self::build_request(lead))
            .send()
            .await
            .map_err(|e| CrmError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(CrmError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

// Bitrix24 API types

#[derive(Debug, Serialize)]
struct BitrixLeadRequest {
    fields: BitrixLeadFields,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct BitrixLeadFields {
    title: String,
    name: String,
    phone: Vec<BitrixPhone>,
    comments: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct BitrixPhone {
    value: String,
    value_type: String,
}
