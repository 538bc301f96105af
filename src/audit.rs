//! Transaction audit trail.
//!
//! Entries are fire-and-forget: the sink is best-effort and a failure to
//! record must never turn into a request failure.

use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// One structured audit record. Written once on entry (no outcome yet) and
/// once after the request completes, carrying the response status.
#[derive(Serialize, Debug, Clone)]
pub struct AuditEntry {
    pub request_id: Uuid,
    pub action: String,
    pub resource_id: Option<u64>,
    pub outcome: Option<u16>,
}

impl AuditEntry {
    pub fn open(request_id: Uuid, action: impl Into<String>, resource_id: Option<u64>) -> Self {
        Self {
            request_id,
            action: action.into(),
            resource_id,
            outcome: None,
        }
    }

    pub fn completed(&self, outcome: u16) -> Self {
        Self {
            outcome: Some(outcome),
            ..self.clone()
        }
    }
}

pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

/// Default sink: structured events under the `audit` log target.
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        info!(
            target: "audit",
            request_id = %entry.request_id,
            action = %entry.action,
            resource_id = entry.resource_id,
            outcome = entry.outcome,
            "transaction"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_preserves_identity() {
        let entry = AuditEntry::open(Uuid::new_v4(), "POST /accounts/1/lock", Some(1));
        let done = entry.completed(200);

        assert_eq!(done.request_id, entry.request_id);
        assert_eq!(done.action, entry.action);
        assert_eq!(done.resource_id, Some(1));
        assert_eq!(done.outcome, Some(200));
        assert_eq!(entry.outcome, None);
    }

    #[test]
    fn test_log_sink_accepts_entries() {
        let sink = LogAuditSink;
        let entry = AuditEntry::open(Uuid::new_v4(), "GET /accounts/3", Some(3));
        assert!(sink.record(&entry).is_ok());
    }
}
