// Request/response schemas for the account endpoints.
use serde::{Deserialize, Serialize};

use crate::store::EntityId;

#[derive(Serialize, Debug)]
pub struct LockResponse {
    pub id: EntityId,
    pub is_locked: bool,
    pub lock: String,
}

#[derive(Serialize, Debug)]
pub struct UnlockResponse {
    pub id: EntityId,
    pub is_locked: bool,
}

/// Unlock body. Both fields are optional: an absent body means "no token,
/// no force" and fails validation unless the account check says otherwise.
#[derive(Deserialize, Debug, Default)]
pub struct UnlockRequest {
    pub lock: Option<String>,
    #[serde(default)]
    pub force: bool,
}

/// Balance write. Only `balance` is ever written by this path; a missing
/// `balance` leaves the stored value unchanged.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateRequest {
    pub lock: Option<String>,
    pub balance: Option<f64>,
}
