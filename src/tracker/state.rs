use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Session;

/// Precondition failures of the session state machine.
///
/// The original app swallowed these silently; surfacing them lets callers
/// give feedback (e.g. a duplicate check-in tap). None of the variants
/// leave the state altered.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("a session is already checked in")]
    AlreadyCheckedIn,
    #[error("no session is checked in")]
    NotCheckedIn,
    #[error("session history is empty")]
    EmptyHistory,
    #[error("failed to persist session history")]
    Persist(#[source] anyhow::Error),
}

/// Pure Idle/Active state machine over the active session and the
/// completed-session history. All timestamps are passed in; no I/O.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    active: Option<Session>,
    history: Vec<Session>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<Session>) -> Self {
        Self {
            active: None,
            history,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Completed sessions, most recent first.
    pub fn history(&self) -> &[Session] {
        &self.history
    }

    /// Idle -> Active. Fails without side effects while a session is
    /// already in progress.
    pub fn check_in(
        &mut self,
        meditation_type: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&Session, TrackerError> {
        if self.active.is_some() {
            return Err(TrackerError::AlreadyCheckedIn);
        }
        Ok(self.active.insert(Session::begin(now, meditation_type)))
    }

    /// Active -> Idle. Stamps the check-out time and prepends the
    /// completed session to history, returning a copy of it.
    pub fn check_out(&mut self, now: DateTime<Utc>) -> Result<Session, TrackerError> {
        let mut session = self.active.take().ok_or(TrackerError::NotCheckedIn)?;
        // Clamp against wall-clock adjustments so checked_out_at never
        // precedes checked_in_at.
        session.checked_out_at = Some(now.max(session.checked_in_at));
        self.history.insert(0, session.clone());
        Ok(session)
    }

    /// Attach mood and reflection to the most recently completed session.
    /// Repeated calls overwrite the same head entry.
    pub fn add_mood(
        &mut self,
        mood: impl Into<String>,
        reflection: Option<String>,
    ) -> Result<&Session, TrackerError> {
        let head = self
            .history
            .first_mut()
            .ok_or(TrackerError::EmptyHistory)?;
        head.mood = Some(mood.into());
        head.reflection = reflection;
        Ok(head)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
