//! The `SupportTool` trait and its input type.

use async_trait::async_trait;

use hl_protocol::ToolResult;

use crate::error::ToolCallResult;

/// Input handed to a tool: the normalized user text plus any entity
/// hints the extraction stage detected.
///
/// Mock tools derive their own identifiers from the text; the dispatcher
/// treats extracted entities as ground truth and overrides afterwards.
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    /// Normalized user message.
    pub text: String,
    /// Extracted order identifier, if any.
    pub order_id: Option<String>,
    /// Extracted email address, if any.
    pub email: Option<String>,
}

impl ToolInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            order_id: None,
            email: None,
        }
    }
}

/// Trait for business action handlers (order lookup, refund, ticketing).
#[async_trait]
pub trait SupportTool: Send + Sync {
    /// Tool name (e.g., "check_order_status").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Invoke the tool. A successful result carries a non-empty message
    /// suitable for direct inclusion in the user-facing response.
    async fn call(&self, input: &ToolInput) -> ToolCallResult<ToolResult>;
}
