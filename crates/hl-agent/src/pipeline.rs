//! Per-request orchestration.
//!
//! Sequences extract → classify → dispatch → sentiment → respond →
//! verify over one `RequestState`. Every stage has a degraded
//! continuation, so `process` always returns a usable record — the user
//! never sees a raw service error. Persistence is the caller's
//! responsibility; the pipeline holds no shared mutable state, so
//! concurrent `process` calls are independent.

use hl_protocol::{EscalationPayload, RequestState, ESCALATION_NOTE};

use crate::classify::{self, ResolutionSource};
use crate::config::AgentConfig;
use crate::dispatch::ToolRegistry;
use crate::llm::LlmClient;
use crate::{extract, respond, sentiment, verify};

/// Fixed human-handoff sentence shown instead of the synthesized
/// response when escalating.
pub const HANDOFF_RESPONSE: &str = "I couldn't confidently resolve this automatically. \
     I'm escalating to a human agent who will follow up shortly.";

/// The support agent: owns the model client and tool registry, and runs
/// the whole pipeline for one message at a time.
pub struct SupportAgent {
    config: AgentConfig,
    llm: LlmClient,
    registry: ToolRegistry,
}

impl SupportAgent {
    pub fn new(config: AgentConfig) -> Self {
        let llm = LlmClient::new(config.ollama.clone());
        let registry = if config.use_mock {
            ToolRegistry::with_mock_tools()
        } else {
            ToolRegistry::disconnected()
        };
        Self {
            config,
            llm,
            registry,
        }
    }

    /// Replace the tool registry (tests, custom backends).
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Resolve one user message into a final response plus an escalation
    /// decision. Infallible by design: internal failures degrade into
    /// heuristics, canned text, or the handoff path.
    pub async fn process(&self, raw_input: &str) -> RequestState {
        let mut state = RequestState::new(raw_input);

        // 1. Preprocessing: normalize, then extract entities.
        state.normalized_input = extract::normalize(raw_input);
        state.entities = extract::extract_entities(&state.normalized_input);

        // 2. Intent resolution (static catalog, then dynamic fallback).
        let resolution = classify::resolve(
            &self.llm,
            &state.normalized_input,
            &self.config.intents,
            self.config.confidence_threshold,
        )
        .await;
        tracing::info!(
            request_id = %state.request_id,
            intents = ?resolution.intents,
            confidence = resolution.confidence,
            source = ?resolution.source,
            "intents resolved"
        );
        state.intents = resolution.intents;
        state.confidence = resolution.confidence;

        // 3. Tool dispatch, one result per intent.
        state.action_results = self
            .registry
            .dispatch(&state.intents, &state.normalized_input, &state.entities)
            .await;

        // 4. Sentiment and urgency.
        let (sentiment, urgency) =
            sentiment::analyze(&self.llm, &state.normalized_input).await;
        state.sentiment = sentiment;
        state.urgency = urgency;

        // 5. Response synthesis. When classification never ran, the
        // "unknown" placeholder must not yield a confident canned reply.
        let canned_enabled = resolution.source != ResolutionSource::ServiceFailure;
        state.response_text = respond::synthesize(
            &self.llm,
            raw_input,
            &state.intents,
            &state.action_results,
            state.sentiment,
            state.urgency,
            canned_enabled,
        )
        .await;

        // 6. Escalation decision.
        state.escalation_flag = verify::verify(
            state.confidence,
            &state.action_results,
            &state.response_text,
            self.config.confidence_threshold,
        );

        // 7. On escalation: structured handoff payload, fixed response.
        if state.escalation_flag {
            tracing::info!(request_id = %state.request_id, "escalating to human agent");
            state.escalation = Some(EscalationPayload {
                original_input: state.raw_input.clone(),
                intents: state.intents.clone(),
                sentiment: state.sentiment,
                urgency: state.urgency,
                action_results: state.action_results.clone(),
                notes: ESCALATION_NOTE.into(),
            });
            state.response_text = HANDOFF_RESPONSE.to_string();
        }

        state
    }
}
