//! Audit logging: structured record of every gated lab decision.
//!
//! Scan requests, vulnerability tests and redactions are recorded with
//! their outcome so a lab session can be reviewed afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A single audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
    pub actor: String,
    pub target: String,
    pub outcome: AuditOutcome,
    pub details: Option<String>,
}

/// Types of auditable lab events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A mock network scan was requested
    ScanRequested,
    /// A mock API vulnerability test was requested
    VulnerabilityTest { prompts: usize },
    /// Sensitive keys were stripped from a record
    Redaction { removed: Vec<String> },
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// Where audit entries are forwarded in addition to the in-memory log.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

/// In-memory audit logger that also forwards entries to its sinks.
pub struct AuditLogger {
    entries: Mutex<Vec<AuditEntry>>,
    sinks: Vec<Box<dyn AuditSink>>,
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("entry_count", &self.count())
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLogger {
    pub fn new() -> Self {
        Self::with_sinks(Vec::new())
    }

    pub fn with_sinks(sinks: Vec<Box<dyn AuditSink>>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            sinks,
        }
    }

    /// Record an audit event.
    pub fn log(
        &self,
        event: AuditEvent,
        actor: &str,
        target: &str,
        outcome: AuditOutcome,
        details: Option<String>,
    ) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            event,
            actor: actor.into(),
            target: target.into(),
            outcome,
            details,
        };

        self.lock().push(entry.clone());

        for sink in &self.sinks {
            sink.record(&entry);
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.lock().clone()
    }

    pub fn entries_by_outcome(&self, outcome: &AuditOutcome) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .filter(|e| &e.outcome == outcome)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    // A panic mid-push cannot leave the Vec half-written, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<AuditEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A tracing-based audit sink that logs entries via `tracing::info!`.
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, entry: &AuditEntry) {
        tracing::info!(
            event = ?entry.event,
            actor = %entry.actor,
            target = %entry.target,
            outcome = ?entry.outcome,
            details = ?entry.details,
            "AUDIT"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn log_and_retrieve_entries() {
        let logger = AuditLogger::new();
        logger.log(
            AuditEvent::ScanRequested,
            "lab",
            "127.0.0.1",
            AuditOutcome::Success,
            None,
        );
        logger.log(
            AuditEvent::ScanRequested,
            "lab",
            "malicious.com",
            AuditOutcome::Denied,
            Some("not in allowlist".into()),
        );

        assert_eq!(logger.count(), 2);
        let entries = logger.entries();
        assert_eq!(entries[0].target, "127.0.0.1");
        assert_eq!(entries[1].target, "malicious.com");
        assert_eq!(entries[1].details.as_deref(), Some("not in allowlist"));
    }

    #[test]
    fn filter_by_outcome() {
        let logger = AuditLogger::new();
        logger.log(AuditEvent::ScanRequested, "lab", "localhost", AuditOutcome::Success, None);
        logger.log(
            AuditEvent::VulnerabilityTest { prompts: 0 },
            "lab",
            "http://fake-url",
            AuditOutcome::Denied,
            None,
        );
        logger.log(
            AuditEvent::Redaction { removed: vec!["api_key".into()] },
            "lab",
            "record",
            AuditOutcome::Success,
            None,
        );

        assert_eq!(logger.entries_by_outcome(&AuditOutcome::Success).len(), 2);
        let denied = logger.entries_by_outcome(&AuditOutcome::Denied);
        assert_eq!(denied.len(), 1);
        assert_eq!(denied[0].target, "http://fake-url");
    }

    #[test]
    fn clear_entries() {
        let logger = AuditLogger::default();
        logger.log(AuditEvent::ScanRequested, "lab", "::1", AuditOutcome::Success, None);
        assert_eq!(logger.count(), 1);
        logger.clear();
        assert_eq!(logger.count(), 0);
    }

    #[test]
    fn audit_entry_serialization() {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            event: AuditEvent::Redaction {
                removed: vec!["password".into(), "token".into()],
            },
            actor: "lab".into(),
            target: "record".into(),
            outcome: AuditOutcome::Success,
            details: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""type":"redaction""#));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.event, entry.event);
        assert_eq!(deserialized.outcome, AuditOutcome::Success);
    }

    #[test]
    fn custom_sink_receives_events() {
        struct TestSink {
            received: Arc<Mutex<Vec<String>>>,
        }

        impl AuditSink for TestSink {
            fn record(&self, entry: &AuditEntry) {
                self.received.lock().unwrap().push(entry.target.clone());
            }
        }

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = TestSink {
            received: received.clone(),
        };
        let logger = AuditLogger::with_sinks(vec![Box::new(sink), Box::new(TracingSink)]);

        logger.log(AuditEvent::ScanRequested, "lab", "localhost", AuditOutcome::Success, None);

        let sink_entries = received.lock().unwrap();
        assert_eq!(sink_entries.as_slice(), ["localhost"]);
    }

    #[test]
    fn debug_format() {
        let logger = AuditLogger::new();
        let debug_str = format!("{logger:?}");
        assert!(debug_str.contains("AuditLogger"));
        assert!(debug_str.contains("entry_count"));
    }
}
