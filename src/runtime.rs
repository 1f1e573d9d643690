//! Runtime for handling inbound messages
//!
//! Normalizes the inbound message, runs the pure transition against the
//! sender's session and executes the resulting effects. Messages from the
//! same sender are handled one at a time.

#[cfg(test)]
pub mod testing;

use crate::crm::LeadSink;
use crate::messaging::{strip_transport_prefix, MessagingService};
use crate::session::{SessionStore, StoreError};
use crate::state_machine::event::normalize_text;
use crate::state_machine::state::Stage;
use crate::state_machine::{transition, ConvContext, ConvState, Effect, Event, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;

/// Errors that abort handling of a single inbound message
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Inbound message has no sender")]
    MissingSender,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened while handling one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub phone: String,
    pub from_stage: Stage,
    pub to_stage: Stage,
    /// Reply ids in send order, with whether the provider accepted each
    pub replies: Vec<(&'static str, bool)>,
    /// Set when a lead was handed to the CRM; `true` if it was accepted
    pub lead_accepted: Option<bool>,
}

/// Per-identifier locks serializing dispatch for the same sender
#[derive(Default)]
struct UserLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    async fn acquire(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Forget locks nobody is holding or waiting on
    async fn prune(&self) {
        self.locks
            .lock()
            .await
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

/// Dispatches inbound messages through the conversation state machine
pub struct ConversationRuntime {
    sessions: Arc<dyn SessionStore>,
    messenger: Arc<dyn MessagingService>,
    crm: Arc<dyn LeadSink>,
    user_locks: UserLocks,
}

impl ConversationRuntime {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        messenger: Arc<dyn MessagingService>,
        crm: Arc<dyn LeadSink>,
    ) -> Self {
        Self {
            sessions,
            messenger,
            crm,
            user_locks: UserLocks::default(),
        }
    }

    /// Handle one inbound webhook message. `from` may carry the transport
    /// prefix; `body` is the raw text.
    pub async fn handle_inbound(
        &self,
        from: &str,
        body: &str,
    ) -> Result<DispatchReport, DispatchError> {
        let phone = strip_transport_prefix(from).trim().to_string();
        if phone.is_empty() {
            return Err(DispatchError::MissingSender);
        }
        let text = normalize_text(body);

        let _guard = self.user_locks.acquire(&phone).await;

        let session = self.sessions.get_or_create(&phone).await?;
        let context = ConvContext::new(phone.clone());
        let result = transition(&session.state, &context, Event::from_text(&text));

        let from_stage = session.stage();
        let to_stage = result.new_state.stage();
        tracing::debug!(phone = %phone, data = ?result.new_state.data(), "Session answers");

        // Persist before any provider I/O
        if result.new_state == ConvState::default() {
            self.sessions.reset(&phone).await?;
        } else {
            self.sessions
                .save(
                    &phone,
                    Session {
                        state: result.new_state,
                    },
                )
                .await?;
        }

        let mut report = DispatchReport {
            phone,
            from_stage,
            to_stage,
            replies: Vec::new(),
            lead_accepted: None,
        };

        for effect in result.effects {
            self.execute_effect(effect, &mut report).await;
        }

        tracing::info!(
            phone = %report.phone,
            from_stage = %report.from_stage,
            to_stage = %report.to_stage,
            replies = report.replies.len(),
            lead_accepted = ?report.lead_accepted,
            "Message handled"
        );

        Ok(report)
    }

    /// Failures are logged by the service wrappers and only recorded here
    async fn execute_effect(&self, effect: Effect, report: &mut DispatchReport) {
        match effect {
            Effect::SendReply { reply } => {
                let delivered = self
                    .messenger
                    .send(&report.phone, &reply.text())
                    .await
                    .is_ok();
                report.replies.push((reply.id(), delivered));
            }
            Effect::SubmitLead { lead } => {
                let accepted = self.crm.submit(&lead).await.is_ok();
                report.lead_accepted = Some(accepted);
            }
        }
    }

    /// Evict idle sessions and their locks
    pub async fn sweep_idle(&self, max_idle: Duration) -> Result<usize, StoreError> {
        let evicted = self.sessions.evict_idle(max_idle).await?;
        self.user_locks.prune().await;
        Ok(evicted)
    }

    /// Periodically evict sessions idle for longer than `max_idle`
    pub fn spawn_sweeper(self: Arc<Self>, max_idle: Duration) -> JoinHandle<()> {
        let period = (max_idle / 2).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                match self.sweep_idle(max_idle).await {
                    Ok(0) => {}
                    Ok(evicted) => tracing::info!(evicted, "Evicted idle sessions"),
                    Err(e) => tracing::warn!(error = %e, "Session sweep failed"),
                }
            }
        })
    }
}
