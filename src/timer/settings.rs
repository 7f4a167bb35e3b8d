use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Timer duration as picked on the duration screen. Values are stored as
/// given; the picker constrains the input range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimerDuration {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_ms(&self) -> u64 {
        (u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds))
            * 1000
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub duration: TimerDuration,
    pub meditation_type: String,
    /// When set, the timer runs without a fixed end and `duration` is
    /// ignored.
    pub infinite: bool,
}

/// Shared timer configuration for the duration-selection and timer
/// screens. In-memory only; deliberately not persisted across restarts.
pub struct TimerSettingsStore {
    data: RwLock<TimerSettings>,
}

impl Default for TimerSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSettingsStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(TimerSettings::default()),
        }
    }

    pub fn snapshot(&self) -> TimerSettings {
        self.data.read().unwrap().clone()
    }

    pub fn duration(&self) -> TimerDuration {
        self.data.read().unwrap().duration
    }

    pub fn set_duration(&self, duration: TimerDuration) {
        self.data.write().unwrap().duration = duration;
    }

    pub fn meditation_type(&self) -> String {
        self.data.read().unwrap().meditation_type.clone()
    }

    pub fn set_meditation_type(&self, meditation_type: impl Into<String>) {
        self.data.write().unwrap().meditation_type = meditation_type.into();
    }

    pub fn is_infinite(&self) -> bool {
        self.data.read().unwrap().infinite
    }

    pub fn set_infinite(&self, infinite: bool) {
        self.data.write().unwrap().infinite = infinite;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_converts_to_milliseconds() {
        assert_eq!(TimerDuration::new(0, 0, 0).total_ms(), 0);
        assert_eq!(TimerDuration::new(0, 10, 30).total_ms(), 630_000);
        assert_eq!(TimerDuration::new(1, 0, 0).total_ms(), 3_600_000);
    }

    #[test]
    fn setters_replace_unconditionally() {
        let store = TimerSettingsStore::new();
        assert_eq!(store.duration(), TimerDuration::default());

        store.set_duration(TimerDuration::new(0, 20, 0));
        store.set_duration(TimerDuration::new(0, 5, 0));
        assert_eq!(store.duration(), TimerDuration::new(0, 5, 0));

        store.set_meditation_type("Body Scan");
        assert_eq!(store.meditation_type(), "Body Scan");

        store.set_infinite(true);
        assert!(store.is_infinite());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.duration, TimerDuration::new(0, 5, 0));
        assert!(snapshot.infinite);
    }
}
