use stillpoint::db::Database;
use stillpoint::tracker::{SessionTracker, TrackerError};
use stillpoint::AppContext;

#[tokio::test]
async fn check_in_out_mood_clear_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("stillpoint.sqlite3")).unwrap();
    let tracker = SessionTracker::new(db).await.unwrap();

    assert!(!tracker.is_active().await);
    assert!(tracker.history().await.is_empty());

    let active = tracker.check_in(Some("Breathing".into())).await.unwrap();
    assert!(tracker.is_active().await);
    assert!(active.is_active());

    let completed = tracker.check_out().await.unwrap();
    assert!(!tracker.is_active().await);
    assert_eq!(completed.id, active.id);
    assert!(completed.checked_out_at.unwrap() >= completed.checked_in_at);

    let annotated = tracker.add_mood("😊", Some("calm".into())).await.unwrap();
    assert_eq!(annotated.mood.as_deref(), Some("😊"));
    assert_eq!(annotated.reflection.as_deref(), Some("calm"));

    let history = tracker.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mood.as_deref(), Some("😊"));

    tracker.clear_history().await.unwrap();
    assert!(tracker.history().await.is_empty());
}

#[tokio::test]
async fn precondition_failures_are_typed_and_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("stillpoint.sqlite3")).unwrap();
    let tracker = SessionTracker::new(db).await.unwrap();

    assert!(matches!(
        tracker.check_out().await,
        Err(TrackerError::NotCheckedIn)
    ));
    assert!(matches!(
        tracker.add_mood("😊", None).await,
        Err(TrackerError::EmptyHistory)
    ));

    let first = tracker.check_in(None).await.unwrap();
    assert!(matches!(
        tracker.check_in(Some("Body Scan".into())).await,
        Err(TrackerError::AlreadyCheckedIn)
    ));

    // The rejected check-in must not have touched the active session.
    let active = tracker.active_session().await.unwrap();
    assert_eq!(active.id, first.id);
    assert!(active.meditation_type.is_none());
}

#[tokio::test]
async fn history_survives_a_restart_but_the_active_session_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stillpoint.sqlite3");

    let completed_id = {
        let db = Database::new(path.clone()).unwrap();
        let tracker = SessionTracker::new(db).await.unwrap();

        tracker.check_in(Some("Breathing".into())).await.unwrap();
        let completed = tracker.check_out().await.unwrap();

        // Leave a second session running when the process "dies".
        tracker.check_in(None).await.unwrap();
        completed.id
    };

    let db = Database::new(path).unwrap();
    let tracker = SessionTracker::new(db).await.unwrap();

    assert!(!tracker.is_active().await);
    let history = tracker.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, completed_id);
    assert_eq!(history[0].meditation_type.as_deref(), Some("Breathing"));
}

#[tokio::test]
async fn app_context_wires_everything_from_one_directory() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = AppContext::new(dir.path()).await.unwrap();

    assert!(!ctx.tracker.is_active().await);
    ctx.tracker.check_in(None).await.unwrap();
    ctx.tracker.check_out().await.unwrap();
    assert_eq!(ctx.tracker.history().await.len(), 1);

    assert!(!ctx.timer_settings.is_infinite());
}
