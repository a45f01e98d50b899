//! Security module for DefenseLab: target allowlists, redaction, and audit logging.
//!
//! Provides:
//! - **Allowlists**: Target membership checks and the scan gate
//! - **Redaction**: Removal of sensitive keys from records
//! - **Audit logging**: Structured record of every gated decision

pub mod allowlist;
pub mod audit;
pub mod redact;

pub use allowlist::{TargetAllowlist, TargetCheckResult};
pub use audit::{AuditEntry, AuditEvent, AuditLogger, AuditOutcome, AuditSink, TracingSink};
pub use redact::Redactor;
