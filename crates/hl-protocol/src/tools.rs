//! Tool invocation results.
//!
//! One `ToolResult` per resolved intent, in intent order. `Unhandled`
//! (no tool mapping) and `Error` (tool failure) are distinct outcomes
//! and must not be conflated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// Tool handled the intent and produced a message.
    Ok,
    /// No tool is mapped to the intent (first-class outcome, not an error).
    Unhandled,
    /// Tool was invoked but failed.
    Error,
}

/// Structured result of dispatching one intent to a tool.
///
/// Invariant: `status == Ok` requires a non-empty `message` whenever the
/// result feeds response synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name (`"none"` for unhandled intents).
    pub tool: String,
    pub status: ToolStatus,
    /// Intent that produced this result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Human-readable outcome, fed to response synthesis when `Ok`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    // Tool-specific fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

impl ToolResult {
    /// Base result for a tool, with no message or extra fields yet.
    pub fn new(tool: impl Into<String>, status: ToolStatus) -> Self {
        Self {
            tool: tool.into(),
            status,
            intent: None,
            message: None,
            order_id: None,
            shipped: None,
            estimated_delivery: None,
            refund_id: None,
            ticket_id: None,
        }
    }

    /// Result for an intent with no mapped tool.
    pub fn unhandled(intent: impl Into<String>) -> Self {
        let mut res = Self::new("none", ToolStatus::Unhandled);
        res.intent = Some(intent.into());
        res
    }

    /// Result for a tool invocation that failed.
    pub fn failed(
        tool: impl Into<String>,
        intent: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let mut res = Self::new(tool, ToolStatus::Error);
        res.intent = Some(intent.into());
        res.message = Some(error.to_string());
        res
    }

    pub fn is_ok(&self) -> bool {
        self.status == ToolStatus::Ok
    }
}
