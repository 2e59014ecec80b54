//! SQLite log sink for finished support interactions.
//!
//! The pipeline never persists anything; the caller flattens a finished
//! `RequestState` into an `InteractionRecord` and hands it here. `save`
//! returns the row id, which keys later feedback updates.

pub mod error;
pub mod store;

pub use error::{LogStoreError, LogStoreResult};
pub use store::LogStore;
