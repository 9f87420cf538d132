#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use lifeos::api::{CompletionClient, CompletionRequest};
    use lifeos::db::ai_logs::AiLogs;
    use lifeos::db::content_ideas::{ContentIdeas, Platform};
    use lifeos::db::daily_summaries::DailySummaries;
    use lifeos::db::db::Db;
    use lifeos::db::focus_sessions::FocusSessions;
    use lifeos::db::notes::Notes;
    use lifeos::db::tasks::Tasks;
    use lifeos::db::users::{UpsertUser, Users};
    use lifeos::libs::ai::{Assistant, FALLBACK_DAILY_SUMMARY};
    use lifeos::libs::error::AiError;
    use lifeos::libs::focus_session::SessionDraft;
    use lifeos::libs::summary::TodayStats;
    use lifeos::libs::task::{NewTask, Priority, TaskUpdate};
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Replies with the queued answers in order and records each request.
    struct FakeClient {
        answers: Mutex<Vec<Option<String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        fn answering(answers: &[Option<&str>]) -> Self {
            FakeClient {
                answers: Mutex::new(answers.iter().rev().map(|a| a.map(str::to_string)).collect()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for FakeClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, AiError> {
            self.requests.lock().push(request.clone());
            Ok(self.answers.lock().pop().flatten())
        }
    }

    fn setup() -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lifeos.db");
        Users::open(Db::open(&path).unwrap())
            .upsert(&UpsertUser {
                id: "ada".to_string(),
                ..Default::default()
            })
            .unwrap();
        (temp_dir, path)
    }

    fn open(path: &Path) -> Db {
        Db::open(path).unwrap()
    }

    #[tokio::test]
    async fn test_parsed_tasks_are_stored_and_logged() {
        let (_temp_dir, path) = setup();
        let mut tasks = Tasks::open(open(&path));
        let mut logs = AiLogs::open(open(&path));
        let assistant = Assistant::new(FakeClient::answering(&[Some(
            r#"{"tasks":[{"title":"Call the bank","priority":"high","category":"personal","dueDate":"2025-03-20"},{"title":"Read chapter 3","priority":"whenever"}]}"#,
        )]));

        let created = assistant
            .create_tasks_from_text("ada", "call the bank by thursday, read chapter 3", &mut tasks, &mut logs)
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].priority, Priority::High);
        assert_eq!(created[0].due_date, NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(created[1].priority, Priority::Medium);
        assert_eq!(tasks.list("ada").unwrap().len(), 2);

        let logged = logs.list("ada").unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].action_type, "task_parse");
        assert_eq!(logged[0].prompt.as_deref(), Some("call the bank by thursday, read chapter 3"));
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_the_model() {
        let (_temp_dir, path) = setup();
        let client = FakeClient::answering(&[]);
        let assistant = Assistant::new(client);

        let result = assistant
            .create_tasks_from_text("ada", "   ", &mut Tasks::open(open(&path)), &mut AiLogs::open(open(&path)))
            .await;

        assert!(result.is_err());
        assert!(AiLogs::open(open(&path)).list("ada").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_task_json_is_an_error() {
        let (_temp_dir, path) = setup();
        let assistant = Assistant::new(FakeClient::answering(&[Some("not json")]));

        let result = assistant
            .create_tasks_from_text("ada", "something", &mut Tasks::open(open(&path)), &mut AiLogs::open(open(&path)))
            .await;

        assert!(result.is_err());
        assert!(Tasks::open(open(&path)).list("ada").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_uses_default_free_time() {
        let (_temp_dir, path) = setup();
        let mut tasks = Tasks::open(open(&path));
        tasks.create("ada", &NewTask::new("Write tests")).unwrap();
        let mut logs = AiLogs::open(open(&path));
        let assistant = Assistant::new(FakeClient::answering(&[Some("9:00 Write tests")]));

        let schedule = assistant.schedule_for("ada", Some("  "), &mut tasks, &mut logs).await.unwrap();

        assert_eq!(schedule, "9:00 Write tests");
        let logged = logs.list("ada").unwrap();
        assert_eq!(logged[0].action_type, "schedule_generate");
        assert_eq!(logged[0].prompt.as_deref(), Some("9am-5pm"));
    }

    #[tokio::test]
    async fn test_note_summary_is_saved_on_the_note() {
        let (_temp_dir, path) = setup();
        let mut notes = Notes::open(open(&path));
        let note = notes.create("ada", "Retro", &"went well ".repeat(100)).unwrap();
        let mut logs = AiLogs::open(open(&path));
        let assistant = Assistant::new(FakeClient::answering(&[Some("- it went well")]));

        let summarized = assistant.summarize_stored_note("ada", note.id, &mut notes, &mut logs).await.unwrap();

        assert_eq!(summarized.summary.as_deref(), Some("- it went well"));
        let logged = logs.list("ada").unwrap();
        assert_eq!(logged[0].prompt.as_deref().map(|p| p.chars().count()), Some(500));
    }

    #[tokio::test]
    async fn test_missing_note_is_not_summarized() {
        let (_temp_dir, path) = setup();
        let assistant = Assistant::new(FakeClient::answering(&[Some("unused")]));

        let result = assistant
            .summarize_stored_note("ada", 42, &mut Notes::open(open(&path)), &mut AiLogs::open(open(&path)))
            .await;

        assert!(result.is_err());
        assert!(AiLogs::open(open(&path)).list("ada").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_content_ideas_are_stored_for_the_platform() {
        let (_temp_dir, path) = setup();
        let mut ideas = ContentIdeas::open(open(&path));
        let mut logs = AiLogs::open(open(&path));
        let assistant = Assistant::new(FakeClient::answering(&[Some(
            r#"{"ideas":[{"title":"Lifetimes in 60s","description":"One diagram"},{"title":"Why Arc"}]}"#,
        )]));

        let created = assistant
            .create_content_ideas("ada", "rust", Platform::Shorts, &mut ideas, &mut logs)
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|idea| idea.platform == Platform::Shorts && !idea.saved));
        assert_eq!(created[0].niche.as_deref(), Some("rust"));
        assert_eq!(ideas.list("ada").unwrap().len(), 2);
        assert_eq!(logs.list("ada").unwrap()[0].action_type, "content_generate");
    }

    #[tokio::test]
    async fn test_blank_niche_is_rejected() {
        let (_temp_dir, path) = setup();
        let assistant = Assistant::new(FakeClient::answering(&[]));

        let result = assistant
            .create_content_ideas("ada", "", Platform::Youtube, &mut ContentIdeas::open(open(&path)), &mut AiLogs::open(open(&path)))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_daily_summary_snapshots_today_stats() {
        let (_temp_dir, path) = setup();
        let now = Local::now().naive_local();
        let mut tasks = Tasks::open(open(&path));
        let mut sessions = FocusSessions::open(open(&path));
        let mut notes = Notes::open(open(&path));

        let done = tasks.create("ada", &NewTask::new("Done")).unwrap();
        tasks.update(done.id, "ada", &TaskUpdate::completed(true)).unwrap();
        tasks.create("ada", &NewTask::new("Open")).unwrap();
        sessions.create_at("ada", &SessionDraft::completed(25), now).unwrap();
        sessions.create_at("ada", &SessionDraft::interrupted(25, 5), now).unwrap();
        notes.create("ada", "Idea", "text").unwrap();

        let stats = TodayStats::load(&mut tasks, &mut sessions, &mut notes, "ada", now).unwrap();
        assert_eq!(
            stats,
            TodayStats {
                tasks_completed: 1,
                total_tasks: 2,
                focus_minutes: 30,
                notes_created: 1,
            }
        );

        let mut summaries = DailySummaries::open(open(&path));
        let mut logs = AiLogs::open(open(&path));
        assert!(summaries.get_for_day("ada", now.date()).unwrap().is_none());

        let assistant = Assistant::new(FakeClient::answering(&[None]));
        let summary = assistant
            .create_daily_summary("ada", now.date(), &stats, &mut summaries, &mut logs)
            .await
            .unwrap();

        assert_eq!(summary.summary, FALLBACK_DAILY_SUMMARY);
        assert_eq!((summary.tasks_completed, summary.focus_minutes, summary.notes_created), (1, 30, 1));
        assert_eq!(summaries.get_for_day("ada", now.date()).unwrap().unwrap().id, summary.id);
        assert_eq!(logs.list("ada").unwrap()[0].action_type, "daily_summary");
    }
}
