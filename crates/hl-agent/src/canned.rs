//! Canned replies and the intent synonym table.
//!
//! Canned replies are fixed strings keyed by canonical intent. The
//! escalation verifier substring-matches against this exact table, so
//! the strings here are load-bearing — change them and the "known-safe
//! response" check changes with them.

/// Canned reply per canonical intent, in presentation order.
pub const CANNED_REPLIES: &[(&str, &str)] = &[
    ("greeting", "👋 Hi there! How can I help you today?"),
    (
        "thank_you",
        "🙏 You're welcome! Let me know if you need anything else.",
    ),
    ("goodbye", "👋 Goodbye! Have a great day!"),
    (
        "smalltalk",
        "😊 I hear you! How can I assist you with your account or order?",
    ),
    ("apology", "😅 No worries at all!"),
    ("affirmation", "✅ Got it!"),
    ("negation", "❌ Okay, I won't proceed with that."),
    ("confirmation", "👍 Noted! Let's continue."),
    (
        "unknown",
        "🤔 I'm not sure I understood that fully. Could you clarify?",
    ),
];

/// Map variant intent labels to canonical ones. Unmapped labels pass
/// through unchanged.
pub fn canonical_intent(intent: &str) -> &str {
    match intent {
        "casual_greeting" | "hey_there" | "hello" => "greeting",
        "thanks" | "appreciation" => "thank_you",
        "farewell" | "see_you" => "goodbye",
        "chitchat" | "casual_chat" => "smalltalk",
        other => other,
    }
}

/// The canned reply for an intent (after canonicalization), if one exists.
pub fn canned_reply(intent: &str) -> Option<&'static str> {
    let canon = canonical_intent(intent);
    CANNED_REPLIES
        .iter()
        .find(|(name, _)| *name == canon)
        .map(|(_, reply)| *reply)
}

/// Combine canned replies for multiple lightweight intents into one
/// message: order-preserving, deduplicating, space-joined. Returns None
/// when no intent has a canned reply.
pub fn combine_canned(intents: &[String]) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for intent in intents {
        if let Some(reply) = canned_reply(intent)
            && !parts.contains(&reply)
        {
            parts.push(reply);
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
