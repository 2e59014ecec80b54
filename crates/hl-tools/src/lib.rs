//! Business tools for the Helpline support agent.
//!
//! Defines the `SupportTool` trait the pipeline dispatches against, plus
//! mock implementations of the three backends (order status lookup,
//! refund initiation, ticket creation). The pipeline only sees the
//! `call(input) -> ToolResult` contract, so real backends can replace
//! the mocks without touching the core.

pub mod error;
pub mod tools;
pub mod types;

pub use error::{ToolCallResult, ToolError};
pub use tools::all_tools;
pub use types::{SupportTool, ToolInput};
