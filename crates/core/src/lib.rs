//! # DefenseLab Core
//!
//! Domain types, traits, and error definitions for the DefenseLab policy
//! and mock layer. Every other crate in the workspace depends inward on
//! this one.
//!
//! - [`Record`]: the ordered string-keyed mapping every operation returns
//! - [`ScanReport`] / [`VulnerabilityReport`]: the literal mock results
//! - [`Tool`] / [`ToolRegistry`]: the seam used to expose mocks as tools

pub mod error;
pub mod record;
pub mod report;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{LabError, ToolError};
pub use record::Record;
pub use report::{render, ScanReport, VulnerabilityReport};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
