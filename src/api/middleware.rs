//! The three request-pipeline gates.
//!
//! Composed explicitly at router construction, outermost first:
//! `transaction_log(with_account(require_auth(handler)))`. The audit record
//! is opened even for requests that later fail resolution or
//! authentication, and not-found is decided before the credential is
//! examined.

use axum::extract::{Path, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;
use uuid::Uuid;

use crate::audit::AuditEntry;
use crate::error::ApiError;

use super::ApiState;

/// Audit gate. Records intent on entry and the outcome status after the
/// inner chain completes, without touching request or response content.
/// Sink failures are reported and swallowed.
pub async fn transaction_log(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    req: Request,
    next: Next,
) -> Response {
    let action = format!("{} {}", req.method(), req.uri().path());
    let entry = AuditEntry::open(Uuid::new_v4(), action, raw_id.parse().ok());

    if let Err(e) = state.audit.record(&entry) {
        warn!("audit entry dropped: {}", e);
    }

    let response = next.run(req).await;

    if let Err(e) = state.audit.record(&entry.completed(response.status().as_u16())) {
        warn!("audit entry dropped: {}", e);
    }

    response
}

/// Resolution gate. Loads the target account by path id and injects it into
/// the request; absent accounts short-circuit with 404 before any business
/// logic or credential check runs.
pub async fn with_account(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Response {
    let Ok(id) = raw_id.parse::<u64>() else {
        return ApiError::NotFound.into_response();
    };
    let Some(account) = state.accounts.get(id) else {
        return ApiError::NotFound.into_response();
    };

    req.extensions_mut().insert(account);
    next.run(req).await
}

/// Authentication gate. Short-circuits with 401 unless the authenticator
/// accepts the bearer credential.
pub async fn require_auth(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    let credential = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if !state.auth.verify(credential) {
        return ApiError::Unauthorized.into_response();
    }

    next.run(req).await
}
