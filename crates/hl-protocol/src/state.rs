//! Per-request pipeline state.
//!
//! `RequestState` is the single record threaded through one `process`
//! invocation. Each pipeline stage writes exactly one group of fields;
//! downstream stages only read what earlier stages wrote. The fully
//! populated record is handed to the caller as an immutable snapshot —
//! persistence is the caller's job, never the pipeline's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::tools::ToolResult;

// ── Sentiment & Urgency ───────────────────────────────────────

/// Sentiment of the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently the user needs a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Entities ──────────────────────────────────────────────────

/// Structured tokens detected in the normalized input.
///
/// An absent field means "not detected" — never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Entities {
    /// Order identifier, normalized to uppercase (e.g. "ORD12345").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Email address, normalized to lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.order_id.is_none() && self.email.is_none()
    }
}

// ── Escalation payload ────────────────────────────────────────

/// Fixed annotation attached to every auto-escalation handoff.
pub const ESCALATION_NOTE: &str =
    "Auto-escalation due to low confidence or unhandled tools.";

/// Structured handoff payload for human follow-up (CRM, agent queue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationPayload {
    /// Verbatim user text that triggered the escalation.
    pub original_input: String,
    /// Intents as resolved by the pipeline.
    pub intents: Vec<String>,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    /// Tool results gathered before the escalation decision.
    pub action_results: Vec<ToolResult>,
    /// Fixed annotation note (see `ESCALATION_NOTE`).
    pub notes: String,
}

// ── Request state ─────────────────────────────────────────────

/// The single mutable record threaded through the pipeline for one
/// user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestState {
    /// Unique request ID (UUIDv7 for time-sortability).
    pub request_id: Uuid,
    /// Verbatim user text; immutable once set.
    pub raw_input: String,
    /// Whitespace-collapsed, trimmed form used by all downstream stages.
    pub normalized_input: String,
    /// Entities detected during extraction; read-only downstream.
    #[serde(default)]
    pub entities: Entities,
    /// Canonicalized intents, unique in order of first appearance.
    /// Non-empty after resolution (at least `"unknown"`).
    pub intents: Vec<String>,
    /// Intent-resolution confidence in [0, 1]; drives escalation.
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    /// One entry per intent, in intent order.
    pub action_results: Vec<ToolResult>,
    /// Final user-facing message; never empty after synthesis.
    pub response_text: String,
    pub escalation_flag: bool,
    /// Present iff `escalation_flag` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<EscalationPayload>,
    /// When the request entered the pipeline.
    pub created_at: DateTime<Utc>,
}

impl RequestState {
    /// Create the empty state at the start of `process(raw_input)`.
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            raw_input: raw_input.into(),
            normalized_input: String::new(),
            entities: Entities::default(),
            intents: Vec::new(),
            confidence: 0.0,
            sentiment: Sentiment::Neutral,
            urgency: Urgency::Low,
            action_results: Vec::new(),
            response_text: String::new(),
            escalation_flag: false,
            escalation: None,
            created_at: Utc::now(),
        }
    }

    /// Side-channel metadata for the external logger/UI: entities plus
    /// the escalation payload, as one JSON object. The pipeline never
    /// re-interprets this.
    pub fn metadata(&self) -> serde_json::Value {
        let mut meta = json!({ "entities": self.entities });
        if let Some(esc) = &self.escalation {
            meta["escalation_payload"] = json!(esc);
        }
        meta
    }
}
