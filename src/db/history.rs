use anyhow::{Context, Result};
use log::warn;
use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::models::Session;

/// Single key under which the whole session history lives, serialized as
/// one JSON array and rewritten wholesale on every mutation. O(n) per
/// write, which is fine at personal-log scale.
const HISTORY_KEY: &str = "session_history";

impl Database {
    pub async fn load_session_history(&self) -> Result<Vec<Session>> {
        self.execute(move |conn| {
            let blob: Option<String> = conn
                .query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    params![HISTORY_KEY],
                    |row| row.get(0),
                )
                .optional()
                .with_context(|| "failed to read session history")?;

            match blob {
                Some(raw) => match serde_json::from_str(&raw) {
                    Ok(history) => Ok(history),
                    Err(err) => {
                        warn!("Discarding unreadable session history blob: {err}");
                        Ok(Vec::new())
                    }
                },
                None => Ok(Vec::new()),
            }
        })
        .await
    }

    pub async fn save_session_history(&self, history: &[Session]) -> Result<()> {
        let blob =
            serde_json::to_string(history).context("failed to encode session history")?;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![HISTORY_KEY, blob],
            )
            .with_context(|| "failed to write session history")?;
            Ok(())
        })
        .await
    }
}
