//! Response synthesis — three-tier precedence.
//!
//! 1. Tool tier: space-joined messages of successful tool results.
//! 2. Canned tier: combined canned replies for the resolved intents.
//! 3. Generative tier: model free-form reply, with a fixed safe fallback
//!    when the model is unavailable.
//!
//! The cheap deterministic tiers always win over the generative one; the
//! generative tier is the only one that can itself fail, and its failure
//! text is fixed so the escalation verifier has something to check
//! against (it is not, by itself, an escalation signal).

use hl_protocol::{Sentiment, ToolResult, Urgency};

use crate::canned::combine_canned;
use crate::llm::LlmClient;

/// Fixed safe fallback when the generative tier cannot reach the model.
pub const UNAVAILABLE_FALLBACK: &str = "Sorry, I'm temporarily unable to generate a \
     detailed reply. I've escalated this to a human agent who will follow up shortly.";

fn response_prompt(
    user: &str,
    intents: &[String],
    action_results: &[ToolResult],
    sentiment: Sentiment,
    urgency: Urgency,
) -> String {
    let serialized =
        serde_json::to_string(action_results).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a helpful and empathetic customer support assistant.\n\
         User message:\n{user}\n\n\
         Detected intents: {intents}\n\
         Action results (JSON): {serialized}\n\
         Sentiment: {sentiment} | Urgency: {urgency}\n\n\
         Produce a concise, friendly response tailored to the sentiment and \
         urgency, referencing any action results when appropriate.\n",
        intents = intents.join(", ")
    )
}

/// Produce the user-facing response text. Never empty.
///
/// `canned_enabled` gates tier 2: when intent classification never ran
/// (model unreachable), the `unknown` placeholder must not produce a
/// confident canned answer.
pub async fn synthesize(
    llm: &LlmClient,
    original_text: &str,
    intents: &[String],
    action_results: &[ToolResult],
    sentiment: Sentiment,
    urgency: Urgency,
    canned_enabled: bool,
) -> String {
    // Tier 1: aggregate successful tool messages, in order.
    let tool_messages: Vec<&str> = action_results
        .iter()
        .filter(|r| r.is_ok())
        .filter_map(|r| r.message.as_deref())
        .filter(|m| !m.is_empty())
        .collect();
    if !tool_messages.is_empty() {
        return tool_messages.join(" ");
    }

    // Tier 2: canned replies for lightweight intents.
    if canned_enabled && let Some(canned) = combine_canned(intents) {
        return canned;
    }

    // Tier 3: generative fallback.
    let prompt = response_prompt(original_text, intents, action_results, sentiment, urgency);
    match llm.generate(&prompt, 300, 0.2).await {
        Ok(out) if !out.is_empty() => out,
        Ok(_) => {
            tracing::debug!("generative tier returned empty text");
            UNAVAILABLE_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "generative tier unavailable");
            UNAVAILABLE_FALLBACK.to_string()
        }
    }
}
