//! Endpoint orchestration for the account routes.
//!
//! The gates have already resolved the account and vetted the caller by the
//! time a handler runs. Every lock-state decision is nevertheless re-checked
//! inside `with_mut`, under the store lock: the resolved copy in the request
//! extensions is only trusted for existence and for the read path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::{debug, info};

use crate::account::{Account, AccountView};
use crate::error::ApiError;
use crate::store::Entity;

use super::types::{LockResponse, UnlockRequest, UnlockResponse, UpdateRequest};
use super::ApiState;

/// POST /accounts/:id/lock
pub async fn post_lock(
    State(state): State<ApiState>,
    Extension(account): Extension<Account>,
) -> Result<Json<LockResponse>, ApiError> {
    let id = account.id();
    let mut outcome: Result<String, ApiError> = Err(ApiError::NotFound);

    state.accounts.with_mut(id, &mut |acct| {
        outcome = if acct.is_locked() {
            Err(ApiError::conflict("resource already locked"))
        } else {
            Ok(acct.acquire())
        };
    });

    let lock = outcome?;
    debug!("account {} locked", id);

    Ok(Json(LockResponse {
        id,
        is_locked: true,
        lock,
    }))
}

/// POST /accounts/:id/unlock
pub async fn post_unlock(
    State(state): State<ApiState>,
    Extension(account): Extension<Account>,
    body: Option<Json<UnlockRequest>>,
) -> Result<Json<UnlockResponse>, ApiError> {
    let id = account.id();
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let mut outcome: Result<(), ApiError> = Err(ApiError::NotFound);

    state.accounts.with_mut(id, &mut |acct| {
        outcome = if !acct.is_locked() {
            Err(ApiError::conflict("resource already unlocked"))
        } else if req.force || req.lock.as_deref().is_some_and(|t| acct.verify_lock(t)) {
            acct.release();
            Ok(())
        } else {
            Err(ApiError::validation("could not unlock resource"))
        };
    });

    outcome?;
    if req.force {
        info!("account {} force-unlocked", id);
    } else {
        debug!("account {} unlocked", id);
    }

    Ok(Json(UnlockResponse {
        id,
        is_locked: false,
    }))
}

/// GET /accounts/:id: public view, no token required.
pub async fn get_account(
    Extension(account): Extension<Account>,
) -> Result<Json<AccountView>, ApiError> {
    Ok(Json(account.view()))
}

/// PUT /accounts/:id: balance write, gated on the current lock token.
pub async fn put_account(
    State(state): State<ApiState>,
    Extension(account): Extension<Account>,
    body: Option<Json<UpdateRequest>>,
) -> Result<Json<AccountView>, ApiError> {
    let id = account.id();
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let mut outcome: Result<AccountView, ApiError> = Err(ApiError::NotFound);

    state.accounts.with_mut(id, &mut |acct| {
        outcome = match req.lock.as_deref() {
            Some(token) if acct.verify_lock(token) => {
                if let Some(balance) = req.balance {
                    acct.set_balance(balance);
                }
                Ok(acct.view())
            }
            _ => Err(ApiError::validation("either lock not supplied or invalid")),
        };
    });

    let view = outcome?;
    debug!("account {} balance written", id);
    Ok(Json(view))
}

/// POST /accounts/_seed: fresh unlocked accounts with a fixed balance.
pub async fn post_seed(State(state): State<ApiState>) -> StatusCode {
    for _ in 0..state.seed.count {
        state.accounts.add(Account::new(state.seed.starting_balance));
    }
    info!(
        "seeded {} accounts at balance {}",
        state.seed.count, state.seed.starting_balance
    );
    StatusCode::NO_CONTENT
}

/// POST /accounts/_clear: bulk reset, when the backend supports it.
pub async fn post_clear(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    state.accounts.clear()?;
    info!("account store cleared");
    Ok(StatusCode::NO_CONTENT)
}
