use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::info;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::Session;

use super::{TrackerError, TrackerState};

/// Process-wide session tracker.
///
/// Serializes the Idle/Active state machine behind a mutex, stamps wall
/// clock time at the edge, and rewrites the persisted history blob after
/// every mutation. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionTracker {
    state: Arc<Mutex<TrackerState>>,
    db: Database,
}

impl SessionTracker {
    /// Load any previously persisted history and start idle.
    pub async fn new(db: Database) -> Result<Self> {
        let history = db.load_session_history().await?;
        info!("Session tracker loaded {} completed session(s)", history.len());
        Ok(Self {
            state: Arc::new(Mutex::new(TrackerState::with_history(history))),
            db,
        })
    }

    pub async fn is_active(&self) -> bool {
        self.state.lock().await.is_active()
    }

    pub async fn active_session(&self) -> Option<Session> {
        self.state.lock().await.active_session().cloned()
    }

    /// Completed sessions, most recent first.
    pub async fn history(&self) -> Vec<Session> {
        self.state.lock().await.history().to_vec()
    }

    pub async fn check_in(
        &self,
        meditation_type: Option<String>,
    ) -> Result<Session, TrackerError> {
        let mut state = self.state.lock().await;
        let session = state.check_in(meditation_type, Utc::now())?.clone();
        info!("Checked in session {}", session.id);
        Ok(session)
    }

    pub async fn check_out(&self) -> Result<Session, TrackerError> {
        let mut state = self.state.lock().await;
        let session = state.check_out(Utc::now())?;
        self.persist(&state).await?;
        info!(
            "Checked out session {} after {}ms",
            session.id,
            session.duration_ms().unwrap_or(0)
        );
        Ok(session)
    }

    pub async fn add_mood(
        &self,
        mood: impl Into<String>,
        reflection: Option<String>,
    ) -> Result<Session, TrackerError> {
        let mut state = self.state.lock().await;
        let session = state.add_mood(mood, reflection)?.clone();
        self.persist(&state).await?;
        Ok(session)
    }

    pub async fn clear_history(&self) -> Result<(), TrackerError> {
        let mut state = self.state.lock().await;
        state.clear_history();
        self.persist(&state).await?;
        info!("Session history cleared");
        Ok(())
    }

    /// Whole-blob rewrite of the history. The in-memory state is kept even
    /// if the write fails; the next successful mutation rewrites everything.
    async fn persist(&self, state: &TrackerState) -> Result<(), TrackerError> {
        self.db
            .save_session_history(state.history())
            .await
            .map_err(TrackerError::Persist)
    }
}
