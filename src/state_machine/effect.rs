//! Effects produced by state transitions

use crate::crm::Lead;
use crate::replies::Reply;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a reply to the user the conversation is with
    SendReply { reply: Reply },

    /// Submit a completed questionnaire to the CRM
    SubmitLead { lead: Lead },
}

impl Effect {
    pub fn reply(reply: Reply) -> Self {
        Effect::SendReply { reply }
    }

    pub fn submit_lead(lead: Lead) -> Self {
        Effect::SubmitLead { lead }
    }
}
