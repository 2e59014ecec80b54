//! Sentiment and urgency classification.
//!
//! Asks the model for a structured classification; on service failure or
//! malformed output, falls back to a fixed keyword heuristic. The
//! heuristic never produces `positive` — a known asymmetry to preserve,
//! not a bug.

use serde::Deserialize;

use hl_protocol::{Sentiment, Urgency};

use crate::llm::LlmClient;

const NEGATIVE_WORDS: &[&str] = &["not", "never", "hate", "angry", "frustrat"];
const URGENCY_WORDS: &[&str] = &["now", "immediately", "asap", "urgent"];

fn sentiment_prompt(text: &str) -> String {
    format!(
        "Classify the sentiment and urgency of the following message.\n\n\
         Message: '''{text}'''\n\n\
         Return JSON: {{\"sentiment\": \"positive|neutral|negative\", \
         \"urgency\": \"low|medium|high\"}}"
    )
}

#[derive(Deserialize)]
struct RawSentiment {
    #[serde(default)]
    sentiment: Sentiment,
    #[serde(default)]
    urgency: Urgency,
}

/// Deterministic keyword fallback used whenever the model is unavailable
/// or returns something unparseable.
fn heuristic(text: &str) -> (Sentiment, Urgency) {
    let lower = text.to_lowercase();
    let sentiment = if NEGATIVE_WORDS.iter().any(|w| lower.contains(w)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };
    let urgency = if URGENCY_WORDS.iter().any(|w| lower.contains(w)) {
        Urgency::High
    } else {
        Urgency::Low
    };
    (sentiment, urgency)
}

/// Classify sentiment and urgency for one normalized message.
pub async fn analyze(llm: &LlmClient, text: &str) -> (Sentiment, Urgency) {
    let out = match llm.generate(&sentiment_prompt(text), 64, 0.0).await {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!(error = %e, "sentiment model unavailable, using heuristic");
            return heuristic(text);
        }
    };

    match serde_json::from_str::<RawSentiment>(&out) {
        Ok(parsed) => (parsed.sentiment, parsed.urgency),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable sentiment output, using heuristic");
            heuristic(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(LlmConfig {
            host: server.uri(),
            model: "gemma3:1b".into(),
            timeout_secs: 2,
        })
    }

    async fn mount(server: &MockServer, content: &str) {
        let body = format!(
            "{}\n{}\n",
            json!({"response": content, "done": false}),
            json!({"done": true})
        );
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn model_classification_is_used() {
        let server = MockServer::start().await;
        mount(&server, r#"{"sentiment": "positive", "urgency": "medium"}"#).await;

        let (s, u) = analyze(&client_for(&server), "love it, but ship soon").await;
        assert_eq!(s, Sentiment::Positive);
        assert_eq!(u, Urgency::Medium);
    }

    #[tokio::test]
    async fn malformed_output_uses_heuristic() {
        let server = MockServer::start().await;
        mount(&server, "the user seems quite upset").await;

        let (s, u) = analyze(&client_for(&server), "I hate this, fix it NOW").await;
        assert_eq!(s, Sentiment::Negative);
        assert_eq!(u, Urgency::High);
    }

    #[tokio::test]
    async fn unreachable_model_uses_heuristic() {
        let client = LlmClient::new(LlmConfig {
            host: "http://127.0.0.1:9".into(),
            model: "gemma3:1b".into(),
            timeout_secs: 1,
        });

        let (s, u) = analyze(&client, "just checking in").await;
        assert_eq!(s, Sentiment::Neutral);
        assert_eq!(u, Urgency::Low);
    }

    #[test]
    fn heuristic_never_positive() {
        let (s, _) = heuristic("this is absolutely wonderful, thank you so much");
        assert_eq!(s, Sentiment::Neutral);
    }

    #[test]
    fn heuristic_detects_negative_and_urgent() {
        assert_eq!(
            heuristic("so frustrated, refund me immediately"),
            (Sentiment::Negative, Urgency::High)
        );
        assert_eq!(heuristic("hello there"), (Sentiment::Neutral, Urgency::Low));
    }
}
