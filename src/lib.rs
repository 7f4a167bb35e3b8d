pub mod catalog;
pub mod db;
pub mod logging;
pub mod models;
pub mod storage;
pub mod timer;
pub mod tracker;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use db::Database;
use timer::{TimerController, TimerSettingsStore};
use tracker::SessionTracker;

/// Everything a frontend drives, wired from a single data directory and
/// passed by reference into the view layer.
pub struct AppContext {
    pub db: Database,
    pub tracker: SessionTracker,
    pub timer: TimerController,
    pub timer_settings: Arc<TimerSettingsStore>,
}

impl AppContext {
    pub async fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let db = Database::new(data_dir.join("stillpoint.sqlite3"))?;
        let tracker = SessionTracker::new(db.clone()).await?;

        info!("App context ready in {}", data_dir.display());

        Ok(Self {
            db,
            tracker,
            timer: TimerController::new(),
            timer_settings: Arc::new(TimerSettingsStore::new()),
        })
    }
}
