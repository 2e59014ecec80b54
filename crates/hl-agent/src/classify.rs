//! Two-phase intent resolution.
//!
//! Phase 1 asks the model to pick labels from the static catalog. When
//! that comes back empty or below the confidence threshold, phase 2 asks
//! for open-vocabulary snake_case labels and filters out nonsense. A
//! model failure at either phase short-circuits to `["unknown"]` with
//! zero confidence — fatal for classification on this request, never
//! retried.

use serde::Deserialize;

use crate::canned::canonical_intent;
use crate::llm::LlmClient;

/// Which path produced the resolution. `ServiceFailure` means the
/// classifier never ran — the `unknown` label is a placeholder, not a
/// classification, and downstream stages treat it accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Static catalog match at or above the threshold.
    Static,
    /// Open-vocabulary fallback produced acceptable labels.
    Dynamic,
    /// Model responded but nothing acceptable came back.
    NoMatch,
    /// Model unreachable; classification did not happen.
    ServiceFailure,
}

/// Outcome of intent resolution for one request.
#[derive(Debug, Clone)]
pub struct IntentResolution {
    /// Canonicalized labels, unique in first-seen order; never empty.
    pub intents: Vec<String>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub source: ResolutionSource,
}

impl IntentResolution {
    fn service_failure() -> Self {
        Self {
            intents: vec!["unknown".into()],
            confidence: 0.0,
            source: ResolutionSource::ServiceFailure,
        }
    }

    fn no_match() -> Self {
        Self {
            intents: vec!["unknown".into()],
            // Fixed "low but non-zero": no match, but a model responded.
            confidence: 0.5,
            source: ResolutionSource::NoMatch,
        }
    }
}

/// Confidence assumed for dynamic labels when the model omits the field.
const DYNAMIC_DEFAULT_CONFIDENCE: f64 = 0.8;

fn static_prompt(text: &str, known_intents: &[String]) -> String {
    format!(
        "You are an intent classification model.\n\n\
         User message:\n{text}\n\n\
         Available intents (user may express more than one):\n{list}, unknown\n\n\
         Rules:\n\
         - Choose one or more intents that match.\n\
         - If no clear match exists, use 'unknown'.\n\
         - If multiple intents are present, include all of them.\n\
         - Only use intents from the provided list.\n\n\
         Return JSON strictly in this format:\n\
         {{\"intents\": [\"<intent1>\", \"<intent2>\"], \"confidence\": 0.92}}\n",
        list = known_intents.join(", ")
    )
}

fn dynamic_prompt(text: &str) -> String {
    format!(
        "You are an intent extraction model.\n\n\
         User message:\n{text}\n\n\
         If it does not clearly match known intents, create one or more \
         descriptive new intent labels in snake_case. Keep them concise \
         (1-2 words).\n\n\
         Reject pure nonsense words (like 'blibberblop') and instead \
         return [\"unknown\"].\n\n\
         Return JSON strictly in this format:\n\
         {{\"intents\": [\"<intent1>\", \"<intent2>\"], \"confidence\": 0.8}}\n"
    )
}

/// Model output: `intents` (or legacy `intent`), as a list or a single
/// string, plus an optional confidence.
#[derive(Deserialize, Default)]
struct RawClassification {
    #[serde(default, alias = "intent")]
    intents: Labels,
    confidence: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Labels {
    One(String),
    Many(Vec<String>),
}

impl Default for Labels {
    fn default() -> Self {
        Labels::Many(Vec::new())
    }
}

impl Labels {
    fn into_vec(self) -> Vec<String> {
        match self {
            Labels::One(s) if !s.is_empty() => vec![s],
            Labels::One(_) => Vec::new(),
            Labels::Many(v) => v.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

/// Unparseable model output is the same as an empty result.
fn parse_or_empty(out: &str) -> RawClassification {
    serde_json::from_str(out).unwrap_or_default()
}

/// Canonicalize labels through the synonym table, deduplicating while
/// preserving first-seen order.
fn canonicalize_dedupe(labels: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for label in labels {
        let canon = canonical_intent(&label).to_string();
        if !unique.contains(&canon) {
            unique.push(canon);
        }
    }
    unique
}

/// Nonsense filter for dynamic labels: a token passes if it is already a
/// known label (or "unknown"), or contains a vowel and is longer than 3
/// characters. Coarse on purpose — tightening it changes observable
/// classification behavior.
fn is_acceptable_label(label: &str, known_intents: &[String]) -> bool {
    label == "unknown"
        || known_intents.iter().any(|k| k == label)
        || (label.chars().any(|c| "aeiou".contains(c)) && label.len() > 3)
}

/// Resolve intents for one normalized message.
pub async fn resolve(
    llm: &LlmClient,
    text: &str,
    known_intents: &[String],
    threshold: f64,
) -> IntentResolution {
    // ── Phase 1: static catalog classification ──────────────────
    let out = match llm.generate(&static_prompt(text, known_intents), 256, 0.0).await {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!(error = %e, "static classification unavailable");
            return IntentResolution::service_failure();
        }
    };

    let parsed = parse_or_empty(&out);
    let confidence = parsed.confidence.unwrap_or(0.0);
    let intents = parsed.intents.into_vec();

    // ── Phase 2: dynamic fallback on low confidence or no labels ─
    if confidence < threshold || intents.is_empty() {
        let out_dyn = match llm.generate(&dynamic_prompt(text), 128, 0.0).await {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!(error = %e, "dynamic classification unavailable");
                return IntentResolution::service_failure();
            }
        };

        let parsed_dyn = parse_or_empty(&out_dyn);
        let dyn_confidence = parsed_dyn
            .confidence
            .unwrap_or(DYNAMIC_DEFAULT_CONFIDENCE);

        let clean: Vec<String> = parsed_dyn
            .intents
            .into_vec()
            .into_iter()
            .filter(|label| is_acceptable_label(label, known_intents))
            .collect();

        if clean.is_empty() {
            tracing::debug!(text, "dynamic classification rejected all labels");
            return IntentResolution::no_match();
        }

        return IntentResolution {
            intents: canonicalize_dedupe(clean),
            confidence: dyn_confidence.clamp(0.0, 1.0),
            source: ResolutionSource::Dynamic,
        };
    }

    IntentResolution {
        intents: canonicalize_dedupe(intents),
        confidence: confidence.clamp(0.0, 1.0),
        source: ResolutionSource::Static,
    }
}
