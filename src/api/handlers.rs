//! HTTP request handlers

use super::types::{ErrorResponse, InboundMessageForm, StatusResponse};
use super::AppState;
use crate::runtime::DispatchError;
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

const LIVENESS_TEXT: &str = "WhatsApp Bot is running! 🤖";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(liveness).post(receive_message))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

// ============================================================
// Webhook
// ============================================================

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn receive_message(
    State(state): State<AppState>,
    query: Result<Query<InboundMessageForm>, QueryRejection>,
    form: Result<Form<InboundMessageForm>, FormRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let form = match form {
        Ok(Form(form)) => form,
        // No form body; fields may still be in the query string
        Err(FormRejection::InvalidFormContentType(_)) => InboundMessageForm::default(),
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };
    let message = query.or(form);
    let (from, body) = (message.sender(), message.text());

    tracing::info!(from = %from, body = %body, "Inbound message");

    match state.runtime.handle_inbound(from, body).await {
        Ok(_) => {}
        Err(DispatchError::MissingSender) => {
            tracing::warn!(from = %from, body = %body, "Inbound message has no sender, skipped");
        }
        Err(e) => {
            tracing::error!(from = %from, error = %e, "Webhook processing failed");
            return Err(AppError::Internal(e.to_string()));
        }
    }

    Ok(Json(StatusResponse::ok()))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

/// Turn a panic inside request handling into the same 500 body as any
/// other processing failure
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Webhook handler panicked");
    AppError::Internal(detail).into_response()
}
