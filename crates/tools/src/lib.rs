//! Mock lab operations for DefenseLab.
//!
//! - [`scanner`]: allowlist-gated mock network scan
//! - [`vuln_test`]: credential-gated mock API vulnerability test
//! - [`lab`]: [`DefenseLab`], all operations over one configuration snapshot
//! - [`env`]: the same operations reading the environment on every call
//!
//! Nothing here touches the network. Every successful scan or test returns
//! a fixed literal result.

pub mod env;
pub mod lab;
pub mod scanner;

use defenselab_config::LabConfig;
use defenselab_core::tool::ToolRegistry;
use defenselab_security::TargetAllowlist;

pub use lab::DefenseLab;
pub use scanner::{scan, NetworkScanTool};
pub use vuln_test::{test_api, ApiVulnTestTool};

/// Create a tool registry with both mock tools, gated by `config`.
pub fn default_registry(config: &LabConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(NetworkScanTool::new(
        TargetAllowlist::from_config(config),
        config.scan_policy,
    )));
    registry.register(Box::new(ApiVulnTestTool));
    registry
}
