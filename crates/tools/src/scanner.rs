//! Network scan tool: stub that returns a canned scan result.
//!
//! No packets are sent. The only real work is the allowlist gate; a target
//! that passes it always "has" ports 80, 443 and 22 open.

use async_trait::async_trait;
use defenselab_config::TargetPolicy;
use defenselab_core::error::{LabError, ToolError};
use defenselab_core::report::{render, ScanReport};
use defenselab_core::tool::{Tool, ToolResult};
use defenselab_security::TargetAllowlist;

/// Gate `target` through the allowlist and return the mock scan report.
pub fn scan(
    target: &str,
    allowlist: &TargetAllowlist,
    policy: TargetPolicy,
) -> Result<ScanReport, LabError> {
    let check = allowlist.check(target, policy);
    if !check.is_allowed() {
        tracing::debug!(scan_target = %target, ?policy, ?check, "Scan target rejected");
        return Err(LabError::TargetNotAllowed {
            target: target.into(),
        });
    }

    Ok(ScanReport::completed(target))
}

pub struct NetworkScanTool {
    allowlist: TargetAllowlist,
    policy: TargetPolicy,
}

impl NetworkScanTool {
    pub fn new(allowlist: TargetAllowlist, policy: TargetPolicy) -> Self {
        Self { allowlist, policy }
    }
}

#[async_trait]
impl Tool for NetworkScanTool {
    fn name(&self) -> &str {
        "network_scan"
    }

    fn description(&self) -> &str {
        "Run a simulated port scan against an allowlisted host. \
         Returns the open ports found, or an error if the host is not allowed."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "target": {
                    "type": "string",
                    "description": "Hostname or IP address to scan (must be allowlisted)"
                }
            },
            "required": ["target"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let target = arguments["target"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'target' argument".into()))?;

        let outcome = scan(target, &self.allowlist, self.policy);
        let record = render(&outcome);

        Ok(ToolResult {
            call_id: String::new(),
            success: outcome.is_ok(),
            output: serde_json::to_string_pretty(&record).unwrap_or_default(),
            data: Some(serde_json::Value::Object(record)),
        })
    }
}
