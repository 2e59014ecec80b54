//! Escalation verification.
//!
//! A pure decision function over confidence, tool outcomes, and response
//! content. Never calls external services. The default branch escalates:
//! absence of a known-safe signal is never interpreted as success, even
//! at high confidence.

use hl_protocol::ToolResult;

use crate::canned::CANNED_REPLIES;

/// Decide whether to hand off to a human. First match wins:
/// 1. any successful tool result → do not escalate
/// 2. response contains a canned reply (including "unknown") → do not escalate
/// 3. confidence below threshold → escalate
/// 4. default → escalate
pub fn verify(
    confidence: f64,
    action_results: &[ToolResult],
    response_text: &str,
    threshold: f64,
) -> bool {
    // 1. A tool handled the request successfully.
    if action_results.iter().any(ToolResult::is_ok) {
        return false;
    }

    // 2. A known-safe canned response was produced.
    if !response_text.is_empty()
        && CANNED_REPLIES
            .iter()
            .any(|(_, reply)| response_text.contains(reply))
    {
        return false;
    }

    // 3. Low confidence with nothing safe handling the request.
    if confidence < threshold {
        return true;
    }

    // 4. Unrecognized state: escalate.
    true
}
