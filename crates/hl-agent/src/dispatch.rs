//! Tool dispatch — maps each resolved intent to a tool invocation.
//!
//! One `ToolResult` per intent, in intent order. Intents with no mapped
//! tool (or a registry without that tool) come back `Unhandled`; tool
//! failures come back `Error` — the two are never conflated. Extracted
//! entities are ground truth over tool-internal heuristics: a differing
//! tool-derived order id is overridden and the message rewritten.

use std::collections::HashMap;

use hl_protocol::{Entities, ToolResult};
use hl_tools::{SupportTool, ToolInput};

/// Tool category mapped to an intent, if any. At most one per intent.
fn tool_for_intent(intent: &str) -> Option<&'static str> {
    match intent {
        "order_status" => Some("check_order_status"),
        "refund" => Some("initiate_refund"),
        "technical_issue" => Some("open_ticket"),
        _ => None,
    }
}

/// Name-indexed registry of business tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn SupportTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn SupportTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Registry with the full mock tool set.
    pub fn with_mock_tools() -> Self {
        Self::new(hl_tools::all_tools())
    }

    /// Empty registry: every mapped intent dispatches as `Unhandled`.
    /// Used when running without backends (`use_mock = false`).
    pub fn disconnected() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn get(&self, name: &str) -> Option<&dyn SupportTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Dispatch every intent to its mapped tool, in order.
    pub async fn dispatch(
        &self,
        intents: &[String],
        normalized_text: &str,
        entities: &Entities,
    ) -> Vec<ToolResult> {
        let input = ToolInput {
            text: normalized_text.to_string(),
            order_id: entities.order_id.clone(),
            email: entities.email.clone(),
        };

        let mut results = Vec::with_capacity(intents.len());
        for intent in intents {
            results.push(self.dispatch_one(intent, &input, entities).await);
        }
        results
    }

    async fn dispatch_one(
        &self,
        intent: &str,
        input: &ToolInput,
        entities: &Entities,
    ) -> ToolResult {
        let Some(tool_name) = tool_for_intent(intent) else {
            return ToolResult::unhandled(intent);
        };
        let Some(tool) = self.get(tool_name) else {
            tracing::debug!(intent, tool = tool_name, "tool not registered");
            return ToolResult::unhandled(intent);
        };

        let mut res = match tool.call(input).await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(intent, tool = tool_name, error = %e, "tool call failed");
                return ToolResult::failed(tool_name, intent, e);
            }
        };
        res.intent = Some(intent.to_string());

        // Extracted entities win over tool-internal heuristics.
        if let Some(extracted) = &entities.order_id {
            match intent {
                "order_status" if res.order_id.as_ref() != Some(extracted) => {
                    res.order_id = Some(extracted.clone());
                    res.message = Some(format!(
                        "Order {extracted} status adjusted based on extracted entity."
                    ));
                }
                // A refund does not need an order id, but a detected one
                // is always attached.
                "refund" => {
                    res.order_id = Some(extracted.clone());
                }
                _ => {}
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hl_protocol::ToolStatus;
    use hl_tools::{ToolCallResult, ToolError};

    /// Tool that always fails, for exercising the `Error` status path.
    struct FailingTool;

    #[async_trait]
    impl SupportTool for FailingTool {
        fn name(&self) -> &str {
            "initiate_refund"
        }
        fn description(&self) -> &str {
            "always fails"
        }
        async fn call(&self, _input: &ToolInput) -> ToolCallResult<ToolResult> {
            Err(ToolError::Unreachable("refund backend down".into()))
        }
    }

    fn intents(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_result_per_intent_in_order() {
        let registry = ToolRegistry::with_mock_tools();
        let results = registry
            .dispatch(
                &intents(&["greeting", "order_status", "unknown"]),
                "hi, where is ORD1234?",
                &Entities::default(),
            )
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, ToolStatus::Unhandled);
        assert_eq!(results[0].intent.as_deref(), Some("greeting"));
        assert_eq!(results[1].status, ToolStatus::Ok);
        assert_eq!(results[1].tool, "check_order_status");
        assert_eq!(results[2].status, ToolStatus::Unhandled);
    }

    #[tokio::test]
    async fn extracted_order_id_overrides_tool_heuristic() {
        let registry = ToolRegistry::with_mock_tools();
        let entities = Entities {
            order_id: Some("ORD77777".into()),
            email: None,
        };
        // Text carries no order id, so the mock invents one — the
        // extracted entity must win.
        let results = registry
            .dispatch(&intents(&["order_status"]), "order status please", &entities)
            .await;

        assert_eq!(results[0].order_id.as_deref(), Some("ORD77777"));
        assert_eq!(
            results[0].message.as_deref(),
            Some("Order ORD77777 status adjusted based on extracted entity.")
        );
        assert_eq!(results[0].status, ToolStatus::Ok);
    }

    #[tokio::test]
    async fn matching_order_id_keeps_tool_message() {
        let registry = ToolRegistry::with_mock_tools();
        let entities = Entities {
            order_id: Some("ORD1234".into()),
            email: None,
        };
        let results = registry
            .dispatch(&intents(&["order_status"]), "where is ORD1234?", &entities)
            .await;

        assert_eq!(results[0].order_id.as_deref(), Some("ORD1234"));
        assert!(!results[0].message.as_deref().unwrap().contains("adjusted"));
    }

    #[tokio::test]
    async fn refund_attaches_extracted_order_id() {
        let registry = ToolRegistry::with_mock_tools();
        let entities = Entities {
            order_id: Some("ORD4242".into()),
            email: None,
        };
        let results = registry
            .dispatch(&intents(&["refund"]), "I want my money back", &entities)
            .await;

        assert_eq!(results[0].status, ToolStatus::Ok);
        assert_eq!(results[0].order_id.as_deref(), Some("ORD4242"));
    }

    #[tokio::test]
    async fn tool_failure_is_error_not_unhandled() {
        let registry = ToolRegistry::new(vec![Box::new(FailingTool)]);
        let results = registry
            .dispatch(&intents(&["refund"]), "refund me", &Entities::default())
            .await;

        assert_eq!(results[0].status, ToolStatus::Error);
        assert!(results[0].message.as_deref().unwrap().contains("backend down"));
    }

    #[tokio::test]
    async fn disconnected_registry_yields_unhandled() {
        let registry = ToolRegistry::disconnected();
        assert!(registry.is_empty());

        let results = registry
            .dispatch(
                &intents(&["order_status", "refund"]),
                "anything",
                &Entities::default(),
            )
            .await;

        assert!(results.iter().all(|r| r.status == ToolStatus::Unhandled));
    }
}
