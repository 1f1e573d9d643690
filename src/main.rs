//! Lead bot - WhatsApp consultation booking
//!
//! Receives WhatsApp messages through a provider webhook, walks each user
//! through a short questionnaire and hands the result to the CRM.

mod api;
mod config;
mod crm;
mod messaging;
mod replies;
mod runtime;
mod session;
mod state_machine;

use api::{create_router, AppState};
use config::Config;
use crm::{BitrixLeadSink, LoggingLeadSink};
use messaging::{LoggingMessenger, TwilioMessenger};
use runtime::ConversationRuntime;
use session::InMemorySessionStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the real environment still applies
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    if !config.twilio.is_complete() {
        tracing::warn!(
            "Twilio is not fully configured. Set TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_WHATSAPP_NUMBER."
        );
    }
    if config.crm_webhook_url.is_none() {
        tracing::warn!("BITRIX_WEBHOOK_URL not set; leads will not be submitted");
    }

    let messenger = LoggingMessenger::new(Arc::new(TwilioMessenger::new(config.twilio.clone())));
    let crm = LoggingLeadSink::new(Arc::new(BitrixLeadSink::new(
        config.crm_webhook_url.clone(),
    )));
    let runtime = Arc::new(ConversationRuntime::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(messenger),
        Arc::new(crm),
    ));

    match config.session_idle_ttl {
        Some(ttl) => {
            tracing::info!(ttl_secs = ttl.as_secs(), "Idle session eviction enabled");
            runtime.clone().spawn_sweeper(ttl);
        }
        None => tracing::info!("Idle session eviction disabled; sessions live until restart"),
    }

    let app = create_router(AppState::new(runtime));

    // Start server
    let addr = config.listen_addr();
    tracing::info!("Lead bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
