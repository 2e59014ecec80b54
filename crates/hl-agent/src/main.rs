//! Helpline agent CLI — one support request per input line.
//!
//! Reads user messages from stdin, runs each through the pipeline, and
//! prints the response. The finished record is persisted here, by the
//! caller, so the returned log id can be associated with the
//! conversation — the pipeline itself never touches storage.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use hl_agent::config::AgentConfig;
use hl_agent::pipeline::SupportAgent;
use hl_logstore::LogStore;
use hl_protocol::InteractionRecord;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hl-agent starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => AgentConfig::from_file(&path)?,
        None => AgentConfig::default(),
    };
    tracing::info!(
        model = %config.ollama.model,
        threshold = config.confidence_threshold,
        use_mock = config.use_mock,
        intent_count = config.intents.len(),
        "config loaded"
    );

    // ── Log store (caller-side persistence) ─────────────────────
    if let Some(parent) = std::path::Path::new(&config.db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let store = LogStore::connect(&format!("sqlite://{}?mode=rwc", config.db_path)).await?;
    tracing::info!(db_path = %config.db_path, "log store ready");

    let agent = SupportAgent::new(config);

    // ── Request loop: one message per line ──────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let state = agent.process(&line).await;
        println!("{}", state.response_text);

        match store.save(&InteractionRecord::from_state(&state)).await {
            Ok(log_id) => tracing::info!(
                request_id = %state.request_id,
                log_id,
                escalated = state.escalation_flag,
                "interaction logged"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to persist interaction"),
        }
    }

    Ok(())
}
