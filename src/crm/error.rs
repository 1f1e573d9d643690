//! CRM error types

use thiserror::Error;

/// Why a lead did not reach the CRM
#[derive(Debug, Error)]
pub enum CrmError {
    /// No webhook URL configured; nothing was sent
    #[error("CRM webhook is not configured")]
    NotConfigured,
    /// The CRM answered with something other than 200
    #[error("CRM rejected lead (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
    /// The request never got an answer
    #[error("CRM unreachable: {0}")]
    Network(String),
}

impl CrmError {
    /// Skips are expected in setups without a CRM and only warrant a warning
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}
