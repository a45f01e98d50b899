//! `DefenseLab`: the four lab operations over a configuration snapshot.
//!
//! Configuration is read once, when the lab is built. Later changes to the
//! environment are not observed; build a new lab (or use [`crate::env`])
//! to pick them up.

use std::collections::BTreeSet;

use defenselab_config::{ConfigError, LabConfig, TargetPolicy};
use defenselab_core::error::LabError;
use defenselab_core::record::Record;
use defenselab_core::report::{render, ScanReport, VulnerabilityReport};
use defenselab_security::{AuditEvent, AuditLogger, AuditOutcome, Redactor, TargetAllowlist};

use crate::scanner::scan;
use crate::vuln_test::test_api;

const DEFAULT_ACTOR: &str = "defenselab";

#[derive(Debug)]
pub struct DefenseLab {
    allowlist: TargetAllowlist,
    redactor: Redactor,
    policy: TargetPolicy,
    audit: AuditLogger,
    actor: String,
}

impl DefenseLab {
    pub fn from_config(config: &LabConfig) -> Self {
        Self {
            allowlist: TargetAllowlist::from_config(config),
            redactor: Redactor::from_config(config),
            policy: config.scan_policy,
            audit: AuditLogger::new(),
            actor: DEFAULT_ACTOR.into(),
        }
    }

    /// Build from `~/.defenselab/config.toml` plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config = LabConfig::load()?;
        tracing::info!(
            allowed_targets = config.allowed_targets.len(),
            sensitive_keys = config.sensitive_keys.len(),
            policy = ?config.scan_policy,
            "DefenseLab configured"
        );
        Ok(Self::from_config(&config))
    }

    /// Replace the audit logger, e.g. to attach sinks.
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = audit;
        self
    }

    /// Name recorded as the actor on audit entries.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn allowlist(&self) -> &TargetAllowlist {
        &self.allowlist
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn policy(&self) -> TargetPolicy {
        self.policy
    }

    /// Strict membership in the configured allowlist.
    pub fn is_allowed_target(&self, target: &str) -> bool {
        self.allowlist.is_allowed(target)
    }

    /// Configured targets plus the safe defaults.
    pub fn get_allowed_targets(&self) -> BTreeSet<String> {
        self.allowlist.scan_targets()
    }

    /// Copy of `data` without sensitive keys. Audited when anything is removed.
    pub fn redact_sensitive(&self, data: &Record) -> Record {
        let removed = self.redactor.removed_keys(data);
        if !removed.is_empty() {
            self.audit.log(
                AuditEvent::Redaction {
                    removed: removed.iter().map(|k| k.to_string()).collect(),
                },
                &self.actor,
                "record",
                AuditOutcome::Success,
                None,
            );
        }
        self.redactor.redact(data)
    }

    pub fn scan(&self, target: &str) -> Result<ScanReport, LabError> {
        let outcome = scan(target, &self.allowlist, self.policy);
        match &outcome {
            Ok(_) => self.audit.log(
                AuditEvent::ScanRequested,
                &self.actor,
                target,
                AuditOutcome::Success,
                None,
            ),
            Err(e) => self.audit.log(
                AuditEvent::ScanRequested,
                &self.actor,
                target,
                AuditOutcome::Denied,
                Some(e.to_string()),
            ),
        }
        outcome
    }

    /// Mock scan rendered as a record.
    pub fn stub_scan_network(&self, target: &str) -> Record {
        render(&self.scan(target))
    }

    pub fn test_api<S: AsRef<str>>(
        &self,
        url: &str,
        api_key: Option<&str>,
        prompts: &[S],
    ) -> Result<VulnerabilityReport, LabError> {
        let outcome = test_api(url, api_key, prompts);
        let event = AuditEvent::VulnerabilityTest {
            prompts: prompts.len(),
        };
        match &outcome {
            Ok(_) => self
                .audit
                .log(event, &self.actor, url, AuditOutcome::Success, None),
            Err(e) => self.audit.log(
                event,
                &self.actor,
                url,
                AuditOutcome::Denied,
                Some(e.to_string()),
            ),
        }
        outcome
    }

    /// Mock vulnerability test rendered as a record.
    pub fn mock_test_api_vulnerabilities<S: AsRef<str>>(
        &self,
        url: &str,
        api_key: Option<&str>,
        prompts: &[S],
    ) -> Record {
        render(&self.test_api(url, api_key, prompts))
    }
}

impl Default for DefenseLab {
    fn default() -> Self {
        Self::from_config(&LabConfig::default())
    }
}
