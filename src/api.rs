//! HTTP API: the messaging provider's webhook

mod handlers;
mod types;

pub use handlers::create_router;

use crate::runtime::ConversationRuntime;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ConversationRuntime>,
}

impl AppState {
    pub fn new(runtime: Arc<ConversationRuntime>) -> Self {
        Self { runtime }
    }
}
