//! Environment-driven entry points.
//!
//! Each call re-reads `ALLOWED_TARGETS`, `SENSITIVE_KEYS` and
//! `DEFENSELAB_SCAN_POLICY`, so changes to the environment apply on the
//! next call. No config file is consulted.

use std::collections::BTreeSet;

use defenselab_config::LabConfig;
use defenselab_core::record::Record;
use defenselab_core::report::render;
use defenselab_security::{Redactor, TargetAllowlist};

use crate::scanner::scan;
use crate::vuln_test::test_api;

/// `false` when `ALLOWED_TARGETS` is unset or empty; otherwise exact
/// membership in its trimmed entries.
pub fn is_allowed_target(target: &str) -> bool {
    TargetAllowlist::from_env().is_allowed(target)
}

/// `ALLOWED_TARGETS` entries plus `127.0.0.1`, `localhost` and `::1`.
pub fn get_allowed_targets() -> BTreeSet<String> {
    TargetAllowlist::from_env().scan_targets()
}

pub fn redact_sensitive(data: &Record) -> Record {
    Redactor::from_env().redact(data)
}

pub fn stub_scan_network(target: &str) -> Record {
    let config = LabConfig::from_env();
    let allowlist = TargetAllowlist::from_config(&config);
    render(&scan(target, &allowlist, config.scan_policy))
}

/// The credential only needs to be present; prompts are only counted.
pub fn mock_test_api_vulnerabilities<S: AsRef<str>>(
    url: &str,
    api_key: Option<&str>,
    prompts: &[S],
) -> Record {
    render(&test_api(url, api_key, prompts))
}
