//! Input normalization and entity extraction.
//!
//! Pure functions, no failure mode. Extraction detects at most one order
//! identifier and one email-like token; partial matches (digits without
//! the ORD prefix) are never treated as identifiers.

use std::sync::LazyLock;

use regex::Regex;

use hl_protocol::Entities;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Order id: literal ORD prefix + 3 or more digits, case-insensitive.
static ORDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bORD\d{3,}\b").expect("valid order-id regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w.-]+@[\w.-]+\.\w{2,}\b").expect("valid email regex"));

/// Trim and collapse internal whitespace. Punctuation is kept — entity
/// extraction needs it. Idempotent.
pub fn normalize(user_input: &str) -> String {
    WHITESPACE_RE
        .replace_all(user_input.trim(), " ")
        .into_owned()
}

/// Scan normalized text for structured tokens.
///
/// Order ids are normalized to uppercase, emails to lowercase. Returns
/// empty entities if nothing matched.
pub fn extract_entities(normalized_text: &str) -> Entities {
    let mut entities = Entities::default();
    if let Some(m) = ORDER_ID_RE.find(normalized_text) {
        entities.order_id = Some(m.as_str().to_uppercase());
    }
    if let Some(m) = EMAIL_RE.find(normalized_text) {
        entities.email = Some(m.as_str().to_lowercase());
    }
    entities
}
