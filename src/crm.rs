//! Lead submission to the CRM
//!
//! Provides a common interface for CRM backends and the lead record they
//! accept.

mod bitrix;
mod error;

pub use bitrix::BitrixLeadSink;
pub use error::CrmError;

use crate::state_machine::state::{ConsultFormat, Goal};
use async_trait::async_trait;
use std::sync::Arc;

/// A completed questionnaire, handed to the CRM once and then discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub city: String,
    pub format: ConsultFormat,
    /// Goal code, "1" through "4"
    pub goal: String,
    /// Bare user identifier
    pub phone: String,
}

impl Lead {
    pub fn goal_label(&self) -> &'static str {
        Goal::label_for_code(&self.goal)
    }

    /// Free-text notes combining city, format and goal
    pub fn comments(&self) -> String {
        format!(
            "Город: {}\nФормат: {}\nЦель: {}",
            self.city,
            self.format.label(),
            self.goal_label()
        )
    }
}

/// Common interface for CRM backends
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Submit a lead. `Ok` only when the CRM confirmed acceptance.
    async fn submit(&self, lead: &Lead) -> Result<(), CrmError>;
}

#[async_trait]
impl<T: LeadSink + ?Sized> LeadSink for Arc<T> {
    async fn submit(&self, lead: &Lead) -> Result<(), CrmError> {
        (**self).submit(lead).await
    }
}

/// Logging wrapper for CRM backends
pub struct LoggingLeadSink {
    inner: Arc<dyn LeadSink>,
}

impl LoggingLeadSink {
    pub fn new(inner: Arc<dyn LeadSink>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LeadSink for LoggingLeadSink {
    async fn submit(&self, lead: &Lead) -> Result<(), CrmError> {
        let start = std::time::Instant::now();
        let result = self.inner.submit(lead).await;
        let duration = start.elapsed();

        match &result {
            Ok(()) => {
                tracing::info!(
                    phone = %lead.phone,
                    goal = lead.goal_label(),
                    duration_ms = %duration.as_millis(),
                    "Lead submitted to CRM"
                );
            }
            Err(e) if e.is_skip() => {
                tracing::warn!(phone = %lead.phone, "CRM webhook not configured, lead not submitted");
            }
            Err(e) => {
                tracing::error!(
                    phone = %lead.phone,
                    duration_ms = %duration.as_millis(),
                    error = %e,
                    "Lead submission failed"
                );
            }
        }

        result
    }
}
