//! Mock result types and their rendering into [`Record`]s.

use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::record::{error_record, Record};

/// Ports every mock scan reports as open.
pub const MOCK_OPEN_PORTS: [u16; 3] = [80, 443, 22];

/// Result of a mock network scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: String,
    pub open_ports: Vec<u16>,
    pub status: String,
}

impl ScanReport {
    /// The canned "scan complete" report for `target`.
    pub fn completed(target: &str) -> Self {
        Self {
            target: target.to_string(),
            open_ports: MOCK_OPEN_PORTS.to_vec(),
            status: "scan_complete".into(),
        }
    }
}

/// Result of a mock API vulnerability test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityReport {
    pub url: String,
    pub vulnerabilities: Vec<String>,
    pub leaks: Vec<String>,
    pub prompts_tested: usize,
    pub status: String,
}

impl VulnerabilityReport {
    /// The canned "completed" report: nothing found, every prompt counted.
    pub fn completed(url: &str, prompts_tested: usize) -> Self {
        Self {
            url: url.to_string(),
            vulnerabilities: vec![],
            leaks: vec![],
            prompts_tested,
            status: "completed".into(),
        }
    }
}

/// Render a typed outcome into its mapping shape.
///
/// Success serializes the report field by field; failure yields
/// `{"error": <message>}` and nothing else. A report that cannot be
/// rendered as an object is reported through the error shape as well.
pub fn render<T: Serialize>(outcome: &Result<T, LabError>) -> Record {
    match outcome {
        Ok(report) => match serde_json::to_value(report) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(other) => {
                tracing::warn!(value = %other, "Report did not serialize to an object");
                error_record(format!("report did not serialize to an object: {other}"))
            }
            Err(e) => error_record(e.to_string()),
        },
        Err(e) => error_record(e.to_string()),
    }
}
