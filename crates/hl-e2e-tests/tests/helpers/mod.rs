//! Shared test harness for E2E pipeline tests.
//!
//! Runs the real `SupportAgent` against a wiremock Ollama server. The
//! three pipeline prompts are told apart by a distinctive phrase each,
//! so one server can script the classifier, the sentiment model, and
//! the generative tier independently.

// Not every suite uses every mock helper.
#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hl_agent::config::AgentConfig;
use hl_agent::llm::LlmConfig;
use hl_agent::pipeline::SupportAgent;

/// Harness owning the mock Ollama server and the agent wired to it.
pub struct TestHarness {
    pub server: MockServer,
}

impl TestHarness {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Build an agent (mock tools, threshold 0.6) pointed at the server.
    pub fn agent(&self) -> SupportAgent {
        SupportAgent::new(AgentConfig {
            ollama: LlmConfig {
                host: self.server.uri(),
                model: "gemma3:1b".into(),
                timeout_secs: 2,
            },
            ..AgentConfig::default()
        })
    }

    /// Script the static-classification prompt.
    pub async fn mock_static_classifier(&self, content: &str) {
        self.mount("intent classification model", content).await;
    }

    /// Script the dynamic-fallback prompt.
    pub async fn mock_dynamic_classifier(&self, content: &str) {
        self.mount("intent extraction model", content).await;
    }

    /// Script the sentiment prompt.
    pub async fn mock_sentiment(&self, content: &str) {
        self.mount("Classify the sentiment and urgency", content)
            .await;
    }

    /// Script the generative response prompt.
    pub async fn mock_generative(&self, content: &str) {
        self.mount("customer support assistant", content).await;
    }

    async fn mount(&self, prompt_phrase: &str, content: &str) {
        // Split the payload into two stream chunks to exercise the
        // client's chunk concatenation on every test.
        let mid = content.len() / 2;
        let body = format!(
            "{}\n{}\n{}\n",
            json!({"response": &content[..mid], "done": false}),
            json!({"response": &content[mid..], "done": false}),
            json!({"done": true})
        );
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_string_contains(prompt_phrase))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .mount(&self.server)
            .await;
    }
}
