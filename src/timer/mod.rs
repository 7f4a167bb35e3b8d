pub mod controller;
pub mod settings;
pub mod state;

pub use controller::{TimerController, TimerError, TimerSnapshot};
pub use settings::{TimerDuration, TimerSettings, TimerSettingsStore};
pub use state::{TimerMode, TimerState, TimerStatus};
