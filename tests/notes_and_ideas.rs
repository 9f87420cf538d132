#[cfg(test)]
mod tests {
    use chrono::Local;
    use lifeos::db::content_ideas::{ContentIdeas, NewContentIdea, Platform};
    use lifeos::db::db::Db;
    use lifeos::db::notes::{NoteUpdate, Notes};
    use lifeos::db::users::{UpsertUser, Users};
    use lifeos::libs::error::StoreError;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ContentContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl ContentContext {
        fn notes(&self) -> Notes {
            Notes::open(Db::open(&self.db_path).unwrap())
        }

        fn ideas(&self) -> ContentIdeas {
            ContentIdeas::open(Db::open(&self.db_path).unwrap())
        }
    }

    impl TestContext for ContentContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("lifeos.db");
            let mut users = Users::open(Db::open(&db_path).unwrap());
            for id in ["ada", "grace"] {
                users
                    .upsert(&UpsertUser {
                        id: id.to_string(),
                        ..Default::default()
                    })
                    .unwrap();
            }
            ContentContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn idea(title: &str, platform: Platform) -> NewContentIdea {
        NewContentIdea {
            platform,
            title: title.to_string(),
            description: Some("Hook, demo, call to action".to_string()),
            niche: Some("rust".to_string()),
        }
    }

    #[test_context(ContentContext)]
    #[test]
    fn test_note_lifecycle(ctx: &mut ContentContext) {
        let mut notes = ctx.notes();
        let note = notes.create("ada", "Standup", "Shipped the parser").unwrap();
        assert!(note.summary.is_none());

        let edited = notes
            .update(
                note.id,
                "ada",
                &NoteUpdate {
                    content: Some("Shipped the parser and the lexer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.title, "Standup");
        assert_eq!(edited.content, "Shipped the parser and the lexer");

        let summarized = notes.set_summary(note.id, "ada", "- parser and lexer shipped").unwrap();
        assert_eq!(summarized.summary.as_deref(), Some("- parser and lexer shipped"));

        assert!(notes.delete(note.id, "ada").unwrap());
        assert!(notes.get(note.id, "ada").unwrap().is_none());
    }

    #[test_context(ContentContext)]
    #[test]
    fn test_note_requires_title_and_content(ctx: &mut ContentContext) {
        let mut notes = ctx.notes();

        assert!(matches!(notes.create("ada", "", "body"), Err(StoreError::Validation(_))));
        assert!(matches!(notes.create("ada", "Title", "  "), Err(StoreError::Validation(_))));

        let note = notes.create("ada", "Title", "body").unwrap();
        let blanked = notes.update(
            note.id,
            "ada",
            &NoteUpdate {
                title: Some(" ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(blanked, Err(StoreError::Validation(_))));
    }

    #[test_context(ContentContext)]
    #[test]
    fn test_notes_are_scoped_and_counted_per_day(ctx: &mut ContentContext) {
        let mut notes = ctx.notes();
        let note = notes.create("ada", "Mine", "text").unwrap();
        notes.create("ada", "Also mine", "text").unwrap();
        notes.create("grace", "Hers", "text").unwrap();

        let today = Local::now().date_naive();
        assert_eq!(notes.count_created_on("ada", today).unwrap(), 2);
        assert_eq!(notes.list("grace").unwrap().len(), 1);
        assert!(notes.get(note.id, "grace").unwrap().is_none());
        assert!(!notes.delete(note.id, "grace").unwrap());
    }

    #[test_context(ContentContext)]
    #[test]
    fn test_idea_save_and_unsave(ctx: &mut ContentContext) {
        let mut ideas = ctx.ideas();
        let created = ideas.create("ada", &idea("Borrow checker in 60s", Platform::Shorts)).unwrap();
        assert!(!created.saved);
        assert_eq!(created.platform, Platform::Shorts);

        assert!(ideas.set_saved(created.id, "ada", true).unwrap().saved);
        assert!(!ideas.set_saved(created.id, "ada", false).unwrap().saved);
    }

    #[test_context(ContentContext)]
    #[test]
    fn test_ideas_are_scoped_to_their_owner(ctx: &mut ContentContext) {
        let mut ideas = ctx.ideas();
        let created = ideas.create("ada", &idea("Async Rust explained", Platform::Youtube)).unwrap();

        assert!(ideas.list("grace").unwrap().is_empty());
        assert!(ideas.get(created.id, "grace").unwrap().is_none());
        assert!(matches!(ideas.set_saved(created.id, "grace", true), Err(StoreError::NotFound(_, _))));
        assert!(!ideas.delete(created.id, "grace").unwrap());
        assert!(ideas.delete(created.id, "ada").unwrap());
    }
}
