use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use log::info;
use serde::Serialize;
use thiserror::Error;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time,
};

use super::{TimerMode, TimerSettingsStore, TimerState, TimerStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer is already running")]
    AlreadyRunning,
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,
}

#[derive(Debug, Serialize, Clone)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_ms: i64,
}

/// Drives the timer state with a one-second ticker task and publishes
/// snapshots on a watch channel for the frontend to observe. Cheap to
/// clone; clones share state.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
    updates: watch::Sender<TimerSnapshot>,
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerController {
    pub fn new() -> Self {
        let initial = TimerState::new();
        let (updates, _) = watch::channel(TimerSnapshot {
            remaining_ms: initial.remaining_ms(),
            state: initial.clone(),
        });

        Self {
            state: Arc::new(Mutex::new(initial)),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
            updates,
        }
    }

    /// Observe snapshot updates; one is published per tick and on every
    /// state transition.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }

    pub async fn get_state(&self) -> TimerState {
        let mut guard = self.state.lock().await;
        guard.sync_elapsed_from_anchor();
        guard.clone()
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        let mut guard = self.state.lock().await;
        guard.sync_elapsed_from_anchor();
        TimerSnapshot {
            remaining_ms: guard.remaining_ms(),
            state: guard.clone(),
        }
    }

    /// Start the timer from the shared settings: a countdown over the
    /// picked duration, or open-ended when the infinite flag is set.
    pub async fn start(&self, settings: &TimerSettingsStore) -> Result<TimerState, TimerError> {
        let settings = settings.snapshot();

        let mode = if settings.infinite {
            TimerMode::OpenEnded
        } else {
            TimerMode::Countdown
        };
        let target_ms = match mode {
            TimerMode::Countdown => {
                let target_ms = settings.duration.total_ms();
                if target_ms == 0 {
                    return Err(TimerError::ZeroDuration);
                }
                target_ms
            }
            TimerMode::OpenEnded => 0,
        };
        let meditation_type = if settings.meditation_type.is_empty() {
            None
        } else {
            Some(settings.meditation_type)
        };

        {
            let mut state = self.state.lock().await;
            if state.status == TimerStatus::Running {
                return Err(TimerError::AlreadyRunning);
            }
            state.begin(mode, target_ms, meditation_type, Utc::now(), Instant::now());
        }

        info!("Timer started ({mode:?}, target {target_ms}ms)");
        self.spawn_ticker().await;
        self.publish().await;

        Ok(self.get_state().await)
    }

    /// End the timer early (or acknowledge a finished one) and cancel the
    /// ticker. A no-op while idle.
    pub async fn stop(&self) -> TimerState {
        {
            let mut state = self.state.lock().await;
            if state.status == TimerStatus::Running {
                state.finish();
            }
        }
        self.cancel_ticker().await;
        self.publish().await;
        self.get_state().await
    }

    /// Drop any finished or running timer and return to idle. Used when
    /// the timer screen is torn down.
    pub async fn reset(&self) {
        {
            let mut state = self.state.lock().await;
            state.reset();
        }
        self.cancel_ticker().await;
        self.publish().await;
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let updates = self.updates.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            loop {
                interval.tick().await;

                let snapshot = {
                    let mut guard = state.lock().await;
                    if guard.status != TimerStatus::Running {
                        break;
                    }
                    guard.sync_elapsed_from_anchor();

                    let finished =
                        guard.mode == TimerMode::Countdown && guard.remaining_ms() <= 0;
                    if finished {
                        guard.finish();
                        info!("Timer finished after {}ms", guard.elapsed_ms);
                    }

                    TimerSnapshot {
                        remaining_ms: guard.remaining_ms(),
                        state: guard.clone(),
                    }
                };

                let done = snapshot.state.status != TimerStatus::Running;
                let _ = updates.send(snapshot);
                if done {
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    async fn publish(&self) {
        let mut guard = self.state.lock().await;
        guard.sync_elapsed_from_anchor();
        let _ = self.updates.send(TimerSnapshot {
            remaining_ms: guard.remaining_ms(),
            state: guard.clone(),
        });
    }
}
