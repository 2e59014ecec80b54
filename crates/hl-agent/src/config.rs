//! Agent configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) yields a
//! working local setup: mock tools, local Ollama, threshold 0.6.

use serde::Deserialize;

use crate::llm::LlmConfig;

/// Top-level configuration for the support agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Escalation confidence threshold in [0, 1].
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f64,
    /// Static intent catalog, read-only input to the resolver.
    #[serde(default = "default_intents")]
    pub intents: Vec<String>,
    /// Use the mock business tools. When false, tool dispatch runs
    /// against an empty registry and every mapped intent is unhandled.
    #[serde(default = "default_use_mock")]
    pub use_mock: bool,
    /// SQLite database path for the caller-side interaction log.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Ollama endpoint settings.
    #[serde(default)]
    pub ollama: LlmConfig,
}

fn default_threshold() -> f64 {
    0.6
}

fn default_use_mock() -> bool {
    true
}

fn default_db_path() -> String {
    "data/agent_logs.db".into()
}

fn default_intents() -> Vec<String> {
    [
        "order_status",
        "refund",
        "technical_issue",
        "greeting",
        "thank_you",
        "goodbye",
        "smalltalk",
        "apology",
        "affirmation",
        "negation",
        "confirmation",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_threshold(),
            intents: default_intents(),
            use_mock: default_use_mock(),
            db_path: default_db_path(),
            ollama: LlmConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.confidence_threshold, 0.6);
        assert!(config.use_mock);
        assert_eq!(config.db_path, "data/agent_logs.db");
        assert!(config.intents.contains(&"order_status".to_string()));
        assert_eq!(config.ollama.model, "gemma3:1b");
    }

    #[test]
    fn full_toml_overrides_defaults() {
        let toml_str = r#"
confidence_threshold = 0.75
intents = ["order_status", "refund"]
use_mock = false
db_path = "/tmp/helpline.db"

[ollama]
host = "http://192.168.1.50:11434"
model = "phi3:mini"
timeout_secs = 10
"#;
        let config: AgentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.confidence_threshold, 0.75);
        assert_eq!(config.intents.len(), 2);
        assert!(!config.use_mock);
        assert_eq!(config.db_path, "/tmp/helpline.db");
        assert_eq!(config.ollama.host, "http://192.168.1.50:11434");
        assert_eq!(config.ollama.timeout_secs, 10);
    }

    #[test]
    fn partial_ollama_section_keeps_other_defaults() {
        let toml_str = r#"
[ollama]
model = "gemma:2b"
"#;
        let config: AgentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.model, "gemma:2b");
        assert_eq!(config.ollama.host, "http://localhost:11434");
        assert_eq!(config.confidence_threshold, 0.6);
    }
}
