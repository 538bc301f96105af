//! Account entity and the public view exposed over the API.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::store::{Entity, EntityId};

/// A bank account record. The lock token is a capability, not observable
/// state: it is handed out once, by `acquire`, and no read path ever
/// returns it again.
#[derive(Debug, Clone)]
pub struct Account {
    id: EntityId,
    balance: f64,
    lock_token: Option<String>,
}

/// Serialization view of an account: id, balance, lock status. Never the
/// token itself.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccountView {
    pub id: EntityId,
    pub balance: f64,
    pub is_locked: bool,
}

impl Account {
    /// Create an unlocked account with an initial balance. The repository
    /// assigns the id on insertion.
    pub fn new(balance: f64) -> Self {
        Self {
            id: 0,
            balance,
            lock_token: None,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Balance writes are token-gated at the handler; the entity itself
    /// stays a plain record.
    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    pub fn is_locked(&self) -> bool {
        self.lock_token.is_some()
    }

    /// Generate a fresh lock token, store it, and return it to the caller.
    /// A previous token, if any, is overwritten and thereby invalidated.
    /// Callers are expected to have checked `is_locked` first.
    pub fn acquire(&mut self) -> String {
        let token = generate_token();
        self.lock_token = Some(token.clone());
        token
    }

    /// True iff the account is locked and `candidate` matches the stored
    /// token exactly. Pure; no side effect.
    pub fn verify_lock(&self, candidate: &str) -> bool {
        match &self.lock_token {
            Some(stored) => fixed_eq(stored.as_bytes(), candidate.as_bytes()),
            None => false,
        }
    }

    /// Clear the lock token, marking the account unlocked.
    pub fn release(&mut self) {
        self.lock_token = None;
    }

    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            balance: self.balance,
            is_locked: self.is_locked(),
        }
    }
}

impl Entity for Account {
    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// Derive an unguessable token from fresh OS entropy. SHA-256 over 32
/// random bytes, hex-encoded.
fn generate_token() -> String {
    let mut entropy = [0u8; 32];
    let mut csprng = OsRng;
    csprng.fill_bytes(&mut entropy);
    hex::encode(Sha256::digest(entropy))
}

// Visits every byte regardless of where a mismatch occurs, so the mismatch
// position is not observable from timing.
fn fixed_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_account_is_unlocked() {
        let account = Account::new(1000.0);
        assert!(!account.is_locked());
        assert_eq!(account.balance(), 1000.0);
    }

    #[test]
    fn test_acquire_then_verify() {
        let mut account = Account::new(1000.0);
        let token = account.acquire();

        assert!(account.is_locked());
        assert!(account.verify_lock(&token));
        assert!(!account.verify_lock("not-the-token"));
        assert!(!account.verify_lock(""));
    }

    #[test]
    fn test_release_invalidates_token() {
        let mut account = Account::new(1000.0);
        let token = account.acquire();

        account.release();
        assert!(!account.is_locked());
        assert!(!account.verify_lock(&token));
    }

    #[test]
    fn test_reacquire_overwrites_previous_token() {
        let mut account = Account::new(1000.0);
        let first = account.acquire();
        account.release();
        let second = account.acquire();

        assert_ne!(first, second);
        assert!(!account.verify_lock(&first));
        assert!(account.verify_lock(&second));
    }

    #[test]
    fn test_tokens_are_unique_across_many_acquisitions() {
        let mut account = Account::new(1000.0);
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            let token = account.acquire();
            assert!(seen.insert(token), "token collision");
            account.release();
        }
    }

    #[test]
    fn test_lock_state_and_token_stay_consistent() {
        let mut account = Account::new(1000.0);
        assert_eq!(account.is_locked(), account.lock_token.is_some());

        account.acquire();
        assert_eq!(account.is_locked(), account.lock_token.is_some());

        account.release();
        assert_eq!(account.is_locked(), account.lock_token.is_some());
    }

    #[test]
    fn test_view_never_exposes_token() {
        let mut account = Account::new(500.0);
        let token = account.acquire();

        let json = serde_json::to_string(&account.view()).unwrap();
        assert!(!json.contains(&token));
        assert!(json.contains("\"is_locked\":true"));
    }

    #[test]
    fn test_view_fields() {
        let account = Account::new(1000.0);
        let view = account.view();
        assert_eq!(view.balance, 1000.0);
        assert!(!view.is_locked);
    }
}
