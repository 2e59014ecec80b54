//! Tool invocation error types.

use thiserror::Error;

/// Errors that can occur when calling a business tool.
///
/// These represent tool *failures* — distinct from the `Unhandled`
/// tool status, which means no tool was mapped to an intent at all.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for tool call results.
pub type ToolCallResult<T> = Result<T, ToolError>;
