//! Error types for the DefenseLab domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

/// Policy failures of the mock operations.
///
/// The `Display` text is part of the public contract: it is exactly the
/// `error` field of the rendered record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    #[error("Target not in allowed list")]
    TargetNotAllowed { target: String },

    #[error("API key is required")]
    ApiKeyRequired,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
