//! SQLite-backed interaction log.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use hl_protocol::{Feedback, InteractionRecord};

use crate::error::{LogStoreError, LogStoreResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    input TEXT NOT NULL,
    intents TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    urgency TEXT NOT NULL,
    actions TEXT NOT NULL,
    response TEXT NOT NULL,
    escalation INTEGER NOT NULL,
    meta TEXT NOT NULL,
    feedback TEXT
)";

/// Interaction log backed by a SQLite database.
pub struct LogStore {
    pool: SqlitePool,
}

/// Parse a lowercase enum column back through its serde representation.
fn enum_from_column<T: serde::de::DeserializeOwned>(value: &str) -> LogStoreResult<T> {
    Ok(serde_json::from_value(serde_json::Value::String(
        value.to_string(),
    ))?)
}

impl LogStore {
    /// Open (or create) the log database and ensure the schema exists.
    ///
    /// Accepts any SQLite URL, e.g. `sqlite://data/agent_logs.db?mode=rwc`
    /// or `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> LogStoreResult<Self> {
        // Single connection: an in-memory database exists per connection,
        // and the file store has no concurrent writers.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::debug!(url, "log store schema ensured");
        Ok(Self { pool })
    }

    /// Persist a flattened interaction snapshot; returns the row id that
    /// keys later feedback updates.
    pub async fn save(&self, record: &InteractionRecord) -> LogStoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO logs \
             (input, intents, sentiment, urgency, actions, response, escalation, meta, feedback) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.input)
        .bind(serde_json::to_string(&record.intents)?)
        .bind(record.sentiment.as_str())
        .bind(record.urgency.as_str())
        .bind(serde_json::to_string(&record.actions)?)
        .bind(&record.response)
        .bind(record.escalation)
        .bind(record.meta.to_string())
        .bind(record.feedback.map(|f| f.as_str()))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Attach feedback to a previously saved interaction.
    pub async fn save_feedback(&self, id: i64, feedback: Feedback) -> LogStoreResult<()> {
        let result = sqlx::query("UPDATE logs SET feedback = ? WHERE id = ?")
            .bind(feedback.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LogStoreError::NotFound(id));
        }
        Ok(())
    }

    /// Fetch a saved interaction by row id.
    pub async fn fetch(&self, id: i64) -> LogStoreResult<Option<InteractionRecord>> {
        let Some(row) = sqlx::query(
            "SELECT input, intents, sentiment, urgency, actions, response, \
             escalation, meta, feedback FROM logs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let feedback = row
            .get::<Option<String>, _>("feedback")
            .map(|f| enum_from_column(&f))
            .transpose()?;

        Ok(Some(InteractionRecord {
            input: row.get("input"),
            intents: serde_json::from_str(row.get::<String, _>("intents").as_str())?,
            sentiment: enum_from_column(row.get::<String, _>("sentiment").as_str())?,
            urgency: enum_from_column(row.get::<String, _>("urgency").as_str())?,
            actions: serde_json::from_str(row.get::<String, _>("actions").as_str())?,
            response: row.get("response"),
            escalation: row.get("escalation"),
            meta: serde_json::from_str(row.get::<String, _>("meta").as_str())?,
            feedback,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_protocol::{RequestState, Sentiment, ToolResult, ToolStatus, Urgency};

    async fn memory_store() -> LogStore {
        LogStore::connect("sqlite::memory:").await.unwrap()
    }

    fn sample_record() -> InteractionRecord {
        let mut state = RequestState::new("where is ORD1234?");
        state.normalized_input = "where is ORD1234?".into();
        state.intents = vec!["order_status".into()];
        state.confidence = 0.9;
        state.sentiment = Sentiment::Neutral;
        state.urgency = Urgency::Low;
        let mut res = ToolResult::new("check_order_status", ToolStatus::Ok);
        res.message = Some("Order ORD1234 is shipped.".into());
        res.order_id = Some("ORD1234".into());
        state.action_results = vec![res];
        state.response_text = "Order ORD1234 is shipped.".into();
        InteractionRecord::from_state(&state)
    }

    #[tokio::test]
    async fn save_returns_monotonic_row_ids() {
        let store = memory_store().await;
        let first = store.save(&sample_record()).await.unwrap();
        let second = store.save(&sample_record()).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn save_then_fetch_roundtrips() {
        let store = memory_store().await;
        let record = sample_record();
        let id = store.save(&record).await.unwrap();

        let fetched = store.fetch(id).await.unwrap().unwrap();
        assert_eq!(fetched.input, record.input);
        assert_eq!(fetched.intents, vec!["order_status".to_string()]);
        assert_eq!(fetched.sentiment, Sentiment::Neutral);
        assert_eq!(fetched.actions[0].order_id.as_deref(), Some("ORD1234"));
        assert!(!fetched.escalation);
        assert!(fetched.feedback.is_none());
    }

    #[tokio::test]
    async fn feedback_update_roundtrips() {
        let store = memory_store().await;
        let id = store.save(&sample_record()).await.unwrap();

        store.save_feedback(id, Feedback::Up).await.unwrap();
        let fetched = store.fetch(id).await.unwrap().unwrap();
        assert_eq!(fetched.feedback, Some(Feedback::Up));

        store.save_feedback(id, Feedback::Down).await.unwrap();
        let fetched = store.fetch(id).await.unwrap().unwrap();
        assert_eq!(fetched.feedback, Some(Feedback::Down));
    }

    #[tokio::test]
    async fn feedback_for_missing_row_is_not_found() {
        let store = memory_store().await;
        let err = store.save_feedback(999, Feedback::Up).await.unwrap_err();
        assert!(matches!(err, LogStoreError::NotFound(999)));
    }

    #[tokio::test]
    async fn fetch_missing_row_is_none() {
        let store = memory_store().await;
        assert!(store.fetch(42).await.unwrap().is_none());
    }
}
