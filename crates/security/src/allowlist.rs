//! Target allowlists: which hosts the lab may "scan".
//!
//! Entries are matched exactly and case-sensitively. There is no wildcard,
//! suffix, or CIDR matching.

use std::collections::BTreeSet;

use defenselab_config::{LabConfig, TargetPolicy, SAFE_DEFAULT_TARGETS};

/// Result of checking a target against the allowlist.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetCheckResult {
    /// Target is allowed
    Allowed,
    /// Target is denied
    Denied { target: String, reason: String },
    /// No allowlist configured under the strict policy (deny by default)
    NoConfig,
}

impl TargetCheckResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Configured targets plus the loopback safe defaults.
///
/// The safe set always contains `SAFE_DEFAULT_TARGETS`; extra entries can
/// only add to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAllowlist {
    allowed: BTreeSet<String>,
    safe_defaults: BTreeSet<String>,
}

impl TargetAllowlist {
    /// Build from raw entries. Entries are trimmed and blanks dropped.
    pub fn new<A>(allowed: A) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            allowed: normalize(allowed),
            safe_defaults: normalize(SAFE_DEFAULT_TARGETS),
        }
    }

    /// Add targets to the safe set on top of the fixed loopback defaults.
    pub fn with_safe_targets<S>(mut self, extra: S) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        self.safe_defaults.extend(normalize(extra));
        self
    }

    pub fn from_config(config: &LabConfig) -> Self {
        Self::new(&config.allowed_targets).with_safe_targets(&config.extra_safe_targets)
    }

    /// Snapshot of the allowlist as the environment defines it right now.
    pub fn from_env() -> Self {
        Self::from_config(&LabConfig::from_env())
    }

    /// True when no target is explicitly allowed.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Strict membership: only explicitly allowed targets pass.
    ///
    /// An empty allowlist denies everything, including loopback.
    pub fn is_allowed(&self, target: &str) -> bool {
        self.allowed.contains(target)
    }

    /// Every target the scanner accepts under `TargetPolicy::SafeDefaults`.
    pub fn scan_targets(&self) -> BTreeSet<String> {
        self.allowed.union(&self.safe_defaults).cloned().collect()
    }

    /// Check a scan target under the given policy.
    ///
    /// Rules:
    /// - Explicitly allowed targets always pass
    /// - `SafeDefaults` additionally admits the safe default targets
    /// - `Strict` with an empty allowlist → `NoConfig` (deny by default)
    pub fn check(&self, target: &str, policy: TargetPolicy) -> TargetCheckResult {
        if self.allowed.contains(target) {
            return TargetCheckResult::Allowed;
        }

        match policy {
            TargetPolicy::SafeDefaults if self.safe_defaults.contains(target) => {
                TargetCheckResult::Allowed
            }
            TargetPolicy::Strict if self.allowed.is_empty() => TargetCheckResult::NoConfig,
            _ => TargetCheckResult::Denied {
                target: target.into(),
                reason: format!(
                    "Target '{}' not in allowlist ({} targets configured)",
                    target,
                    self.allowed.len()
                ),
            },
        }
    }
}

impl Default for TargetAllowlist {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

fn normalize<I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist(entries: &[&str]) -> TargetAllowlist {
        TargetAllowlist::new(entries)
    }

    fn fixed_defaults() -> BTreeSet<String> {
        SAFE_DEFAULT_TARGETS.into_iter().map(String::from).collect()
    }

    #[test]
    fn exact_match_allowed() {
        let list = allowlist(&["127.0.0.1", "localhost"]);
        assert!(list.is_allowed("127.0.0.1"));
        assert!(list.is_allowed("localhost"));
        assert!(!list.is_allowed("malicious.com"));
    }

    #[test]
    fn entries_are_trimmed_but_matching_is_exact() {
        let list = allowlist(&["  scanme.lab ", "", " "]);
        assert!(list.is_allowed("scanme.lab"));
        assert!(!list.is_allowed("SCANME.LAB"));
        assert!(!list.is_allowed("sub.scanme.lab"));
        assert_eq!(list.scan_targets().len(), 4);
    }

    #[test]
    fn empty_allowlist_denies_all() {
        let list = allowlist(&[]);
        assert!(list.is_empty());
        assert!(!list.is_allowed("127.0.0.1"));
        assert!(!list.is_allowed("localhost"));
    }

    #[test]
    fn scan_targets_always_include_safe_defaults() {
        let empty = allowlist(&[]);
        let expected: BTreeSet<String> = ["127.0.0.1", "localhost", "::1"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(empty.scan_targets(), expected);

        let list = allowlist(&["10.0.0.5", "localhost"]);
        let targets = list.scan_targets();
        assert_eq!(targets.len(), 4);
        assert!(targets.contains("10.0.0.5"));
        assert!(targets.contains("::1"));
    }

    #[test]
    fn safe_defaults_policy_admits_loopback() {
        let list = allowlist(&[]);
        assert_eq!(
            list.check("127.0.0.1", TargetPolicy::SafeDefaults),
            TargetCheckResult::Allowed
        );
        assert_eq!(
            list.check("::1", TargetPolicy::SafeDefaults),
            TargetCheckResult::Allowed
        );
    }

    #[test]
    fn strict_policy_without_config_is_no_config() {
        let list = allowlist(&[]);
        assert_eq!(
            list.check("127.0.0.1", TargetPolicy::Strict),
            TargetCheckResult::NoConfig
        );
    }

    #[test]
    fn strict_policy_ignores_safe_defaults() {
        let list = allowlist(&["10.0.0.5"]);
        assert!(list.check("10.0.0.5", TargetPolicy::Strict).is_allowed());
        match list.check("localhost", TargetPolicy::Strict) {
            TargetCheckResult::Denied { target, reason } => {
                assert_eq!(target, "localhost");
                assert!(reason.contains("1 targets configured"));
            }
            other => panic!("Expected denied, got {other:?}"),
        }
    }

    #[test]
    fn unknown_target_denied_under_either_policy() {
        let list = allowlist(&["10.0.0.5"]);
        for policy in [TargetPolicy::Strict, TargetPolicy::SafeDefaults] {
            let result = list.check("malicious.com", policy);
            assert!(!result.is_allowed());
            assert!(matches!(result, TargetCheckResult::Denied { .. }));
        }
    }

    #[test]
    fn from_config_uses_both_lists() {
        let config = LabConfig {
            allowed_targets: vec!["scanme.lab".into()],
            extra_safe_targets: vec!["192.168.56.10".into()],
            ..LabConfig::default()
        };
        let list = TargetAllowlist::from_config(&config);
        assert!(list.is_allowed("scanme.lab"));
        assert!(!list.is_allowed("192.168.56.10"));
        assert!(list.check("192.168.56.10", TargetPolicy::SafeDefaults).is_allowed());
        assert_eq!(list.scan_targets().len(), 5);
    }

    #[test]
    fn extra_safe_targets_never_drop_fixed_defaults() {
        let subset = LabConfig {
            extra_safe_targets: vec!["127.0.0.1".into()],
            ..LabConfig::default()
        };
        assert_eq!(TargetAllowlist::from_config(&subset).scan_targets(), fixed_defaults());

        let strict_empty = LabConfig {
            extra_safe_targets: vec![],
            scan_policy: TargetPolicy::Strict,
            ..LabConfig::default()
        };
        assert_eq!(
            TargetAllowlist::from_config(&strict_empty).scan_targets(),
            fixed_defaults()
        );

        assert_eq!(TargetAllowlist::default().scan_targets(), fixed_defaults());
    }
}
