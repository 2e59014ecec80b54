//! Helpline support agent — library crate for the per-request pipeline.
//!
//! One `process` call resolves a single end-user message into a final
//! response plus an escalation decision. Stages run in a fixed order:
//! extract → classify → dispatch → sentiment → respond → verify.
//! Re-exports all modules so external crates (e.g. `hl-e2e-tests`) can
//! use `SupportAgent`, `LlmClient`, and the individual stages directly.

pub mod canned;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod respond;
pub mod sentiment;
pub mod verify;

pub use config::AgentConfig;
pub use llm::{LlmClient, LlmConfig, LlmError};
pub use pipeline::SupportAgent;
