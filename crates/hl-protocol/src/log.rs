//! Log-sink snapshot types.
//!
//! `InteractionRecord` is the flattened form of a finished `RequestState`
//! that the caller hands to the log store. Feedback arrives later, keyed
//! by the store-assigned row id.

use serde::{Deserialize, Serialize};

use crate::state::{RequestState, Sentiment, Urgency};
use crate::tools::ToolResult;

/// End-user feedback on a logged interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Up,
    Down,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Flattened snapshot of a finished request, ready for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Verbatim user input.
    pub input: String,
    pub intents: Vec<String>,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    pub actions: Vec<ToolResult>,
    pub response: String,
    pub escalation: bool,
    /// Side-channel metadata (entities, escalation payload).
    pub meta: serde_json::Value,
    /// Set by a later feedback update, never at save time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl InteractionRecord {
    /// Flatten a fully populated request state.
    pub fn from_state(state: &RequestState) -> Self {
        Self {
            input: state.raw_input.clone(),
            intents: state.intents.clone(),
            sentiment: state.sentiment,
            urgency: state.urgency,
            actions: state.action_results.clone(),
            response: state.response_text.clone(),
            escalation: state.escalation_flag,
            meta: state.metadata(),
            feedback: None,
        }
    }
}
