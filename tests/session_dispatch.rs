#[cfg(test)]
mod tests {
    use lifeos::db::db::Db;
    use lifeos::db::focus_sessions::FocusSessions;
    use lifeos::db::users::{UpsertUser, Users};
    use lifeos::libs::error::StoreError;
    use lifeos::libs::controller::{FocusController, FocusTimer};
    use lifeos::libs::focus_session::{SessionDraft, SessionStore};
    use lifeos::libs::outbox::{DispatchPolicy, DispatchReport, Dispatcher, Outbox};
    use lifeos::libs::timer::{Phase, TimerDurations};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn open_store(temp_dir: &TempDir) -> Arc<Mutex<FocusSessions>> {
        let path = temp_dir.path().join("lifeos.db");
        let mut users = Users::open(Db::open(&path).unwrap());
        users
            .upsert(&UpsertUser {
                id: "ada".to_string(),
                ..Default::default()
            })
            .unwrap();
        Arc::new(Mutex::new(FocusSessions::open(Db::open(&path).unwrap())))
    }

    fn dispatcher(store: &Arc<Mutex<FocusSessions>>) -> Dispatcher<FocusSessions> {
        let policy = DispatchPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(10),
        };
        Dispatcher::new(store.clone(), "ada", policy)
    }

    async fn flush(timer: &mut FocusTimer, store: &Arc<Mutex<FocusSessions>>) -> Vec<DispatchReport> {
        let mut outbox = Outbox::new();
        outbox.extend(timer.drain_outbox());
        dispatcher(store).flush(&mut outbox).await
    }

    fn tick(timer: &mut FocusTimer, seconds: u32) {
        for _ in 0..seconds {
            timer.tick();
        }
    }

    #[tokio::test]
    async fn test_full_run_is_stored_as_completed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let mut timer = FocusTimer::default();

        timer.start();
        tick(&mut timer, 1_500);
        let reports = flush(&mut timer, &store).await;

        assert_eq!(reports.len(), 1);
        let stored = store.lock().list_by_user("ada").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!((stored[0].duration, stored[0].completed_duration, stored[0].completed), (25, 25, true));
        assert_eq!(timer.snapshot().phase, Phase::Break);
    }

    #[tokio::test]
    async fn test_reset_after_ninety_seconds_stores_two_minutes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let mut timer = FocusTimer::default();

        timer.start();
        tick(&mut timer, 90);
        timer.reset();
        flush(&mut timer, &store).await;

        let stored = store.lock().list_by_user("ada").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].completed_duration, 2);
        assert!(!stored[0].completed);
    }

    #[tokio::test]
    async fn test_reset_under_a_minute_stores_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let mut timer = FocusTimer::default();

        timer.start();
        tick(&mut timer, 59);
        timer.reset();
        let reports = flush(&mut timer, &store).await;

        assert!(reports.is_empty());
        assert!(store.lock().list_by_user("ada").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_paused_run_is_stored_once_and_break_adds_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let mut timer = FocusTimer::default();

        timer.start();
        tick(&mut timer, 600);
        timer.pause();
        tick(&mut timer, 300);
        timer.resume();
        tick(&mut timer, 900);
        timer.resume();
        tick(&mut timer, 300);
        flush(&mut timer, &store).await;

        let stored = store.lock().list_by_user("ada").unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].completed);
        assert_eq!(timer.snapshot().phase, Phase::Idle);
    }

    #[tokio::test]
    async fn test_unknown_user_fails_once_as_expired_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let policy = DispatchPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(1),
        };

        let report = Dispatcher::new(store.clone(), "nobody", policy)
            .deliver(SessionDraft::completed(25))
            .await;

        assert!(matches!(
            report,
            DispatchReport::Failed {
                attempts: 1,
                error: StoreError::Auth,
                ..
            }
        ));
        assert!(store.lock().list_by_user("nobody").unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_pipeline_records_one_minute_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = open_store(&temp_dir);
        let (draft_tx, draft_rx) = mpsc::unbounded_channel();
        let (report_tx, mut report_rx) = mpsc::unbounded_channel();

        let (controller, handle) = FocusController::new(TimerDurations::new(1, 1), Duration::from_secs(1), draft_tx);
        let controller_task = tokio::spawn(controller.run());
        let dispatch_task = tokio::spawn(dispatcher(&store).run(draft_rx, report_tx));

        handle.start();
        tokio::time::sleep(Duration::from_millis(60_500)).await;

        match report_rx.recv().await {
            Some(DispatchReport::Saved(session)) => {
                assert!(session.completed);
                assert_eq!(session.completed_duration, 1);
            }
            other => panic!("expected a saved session, got {other:?}"),
        }

        handle.quit();
        let final_state = controller_task.await.unwrap();
        assert_eq!(final_state.phase, Phase::Break);
        dispatch_task.await.unwrap();
        assert_eq!(store.lock().list_by_user("ada").unwrap().len(), 1);
    }
}
