//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use crate::crm::{CrmError, Lead, LeadSink};
use crate::messaging::{MessagingError, MessagingService, SentMessage};
use crate::session::{SessionStore, StoreError};
use crate::state_machine::Session;
use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock Messenger
// ============================================================================

/// Mock messaging provider that records every send
pub struct MockMessenger {
    fail: bool,
    /// Record of (destination, body) pairs
    pub sent: Mutex<Vec<(String, String)>>,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A provider that records, then rejects every message
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn recorded(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, body)| body.clone())
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingService for MockMessenger {
    async fn send(&self, destination: &str, body: &str) -> Result<SentMessage, MessagingError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((destination.to_string(), body.to_string()));
        if self.fail {
            return Err(MessagingError::rejected("mock provider rejects everything"));
        }
        Ok(SentMessage {
            sid: format!("SM{:04}", sent.len()),
        })
    }
}

/// Messaging provider that panics, for exercising the webhook's panic guard
pub struct PanickingMessenger;

#[async_trait]
impl MessagingService for PanickingMessenger {
    async fn send(&self, _destination: &str, _body: &str) -> Result<SentMessage, MessagingError> {
        panic!("provider client blew up");
    }
}

// ============================================================================
// Mock Lead Sink
// ============================================================================

type ErrorFactory = Box<dyn Fn() -> CrmError + Send + Sync>;

/// Mock CRM that records leads and answers with a fixed outcome
pub struct MockLeadSink {
    error: Option<ErrorFactory>,
    pub leads: Mutex<Vec<Lead>>,
}

impl MockLeadSink {
    pub fn accepting() -> Self {
        Self {
            error: None,
            leads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: impl Fn() -> CrmError + Send + Sync + 'static) -> Self {
        Self {
            error: Some(Box::new(error)),
            leads: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_leads(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadSink for MockLeadSink {
    async fn submit(&self, lead: &Lead) -> Result<(), CrmError> {
        self.leads.lock().unwrap().push(lead.clone());
        match &self.error {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Failing Session Store
// ============================================================================

/// Session backend that is always down
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn get_or_create(&self, _id: &str) -> Result<Session, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn save(&self, _id: &str, _session: Session) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn reset(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn evict_idle(&self, _max_idle: Duration) -> Result<usize, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

// ============================================================================
// Stub HTTP servers
// ============================================================================

/// Requests seen by a stub server
#[derive(Clone, Default)]
pub struct StubHits {
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl StubHits {
    pub fn record(&self, body: Value) {
        self.bodies.lock().unwrap().push(body);
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }
}

/// Serve `app` on an ephemeral localhost port; returns its base URL
pub async fn spawn_stub_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
