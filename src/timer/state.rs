use std::cmp;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Finished,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Countdown,
    OpenEnded,
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Countdown
    }
}

/// In-memory state of the meditation timer.
///
/// Elapsed time is anchored to a monotonic instant while running, so wall
/// clock adjustments never distort the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub mode: TimerMode,
    pub meditation_type: Option<String>,
    pub target_ms: u64,
    pub elapsed_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    running_anchor: Option<Instant>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            status: TimerStatus::Idle,
            mode: TimerMode::Countdown,
            meditation_type: None,
            target_ms: 0,
            elapsed_ms: 0,
            started_at: None,
            running_anchor: None,
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left in countdown mode, elapsed time in open-ended mode.
    pub fn remaining_ms(&self) -> i64 {
        match (self.status, self.mode) {
            (TimerStatus::Idle, _) => 0,
            (_, TimerMode::Countdown) => {
                let remaining = self.target_ms as i64 - self.current_elapsed_ms() as i64;
                cmp::max(remaining, 0)
            }
            // Open-ended has no end; report elapsed time instead.
            (_, TimerMode::OpenEnded) => self.current_elapsed_ms() as i64,
        }
    }

    pub fn current_elapsed_ms(&self) -> u64 {
        if let (TimerStatus::Running, Some(anchor)) = (self.status, self.running_anchor) {
            anchor.elapsed().as_millis() as u64
        } else {
            self.elapsed_ms
        }
    }

    pub fn sync_elapsed_from_anchor(&mut self) {
        if let (TimerStatus::Running, Some(anchor)) = (self.status, self.running_anchor) {
            self.elapsed_ms = anchor.elapsed().as_millis() as u64;
        }
    }

    pub fn begin(
        &mut self,
        mode: TimerMode,
        target_ms: u64,
        meditation_type: Option<String>,
        start_at: DateTime<Utc>,
        now: Instant,
    ) {
        *self = Self {
            status: TimerStatus::Running,
            mode,
            meditation_type,
            target_ms,
            elapsed_ms: 0,
            started_at: Some(start_at),
            running_anchor: Some(now),
        };
    }

    pub fn finish(&mut self) {
        self.sync_elapsed_from_anchor();
        if self.mode == TimerMode::Countdown {
            self.elapsed_ms = self.elapsed_ms.min(self.target_ms);
        }
        self.status = TimerStatus::Finished;
        self.running_anchor = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_has_no_remaining_time() {
        let state = TimerState::new();
        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.remaining_ms(), 0);
    }

    #[test]
    fn countdown_counts_down_from_target() {
        let mut state = TimerState::new();
        state.begin(
            TimerMode::Countdown,
            600_000,
            Some("Breathing".into()),
            Utc::now(),
            Instant::now(),
        );
        assert_eq!(state.status, TimerStatus::Running);
        let remaining = state.remaining_ms();
        assert!(remaining > 0 && remaining <= 600_000);
    }

    #[test]
    fn finish_clamps_elapsed_to_target() {
        let mut state = TimerState::new();
        state.begin(TimerMode::Countdown, 0, None, Utc::now(), Instant::now());
        state.finish();
        assert_eq!(state.status, TimerStatus::Finished);
        assert_eq!(state.elapsed_ms, 0);
        assert_eq!(state.remaining_ms(), 0);
    }

    #[test]
    fn open_ended_reports_elapsed_time() {
        let mut state = TimerState::new();
        state.begin(TimerMode::OpenEnded, 0, None, Utc::now(), Instant::now());
        assert!(state.remaining_ms() >= 0);
        state.finish();
        assert_eq!(state.status, TimerStatus::Finished);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut state = TimerState::new();
        state.begin(TimerMode::OpenEnded, 0, None, Utc::now(), Instant::now());
        state.reset();
        assert_eq!(state.status, TimerStatus::Idle);
        assert!(state.started_at.is_none());
        assert!(state.meditation_type.is_none());
    }
}
