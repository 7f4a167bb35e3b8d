//! Session-related data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single meditation session.
///
/// A session is "active" from check-in until check-out; `checked_out_at`
/// stays empty while it is in progress. Mood and reflection are attached
/// after the fact, and only ever to the most recently completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meditation_type: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub reflection: Option<String>,
}

impl Session {
    /// Start a new session. The id is derived from the check-in timestamp
    /// (millisecond epoch), matching the persisted history format.
    pub fn begin(checked_in_at: DateTime<Utc>, meditation_type: Option<String>) -> Self {
        Self {
            id: checked_in_at.timestamp_millis().to_string(),
            checked_in_at,
            checked_out_at: None,
            meditation_type,
            mood: None,
            reflection: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.checked_out_at.is_none()
    }

    /// Elapsed time between check-in and check-out, once completed.
    pub fn duration_ms(&self) -> Option<i64> {
        self.checked_out_at
            .map(|out| (out - self.checked_in_at).num_milliseconds())
    }
}
