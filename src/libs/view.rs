use super::formatter::{format_minutes, format_timestamp};
use super::stats::FocusStats;
use super::summary::TodayStats;
use super::task::Task;
use crate::db::content_ideas::ContentIdea;
use crate::db::notes::Note;
use crate::libs::focus_session::FocusSession;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn sessions(sessions: &[FocusSession]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "STARTED", "MINUTES", "PLANNED", "STATUS"]);
        for session in sessions {
            table.add_row(row![
                session.id,
                format_timestamp(&session.started_at),
                session.completed_duration,
                session.duration,
                if session.completed { "completed" } else { "partial" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn focus_stats(stats: &FocusStats) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TODAY", "TOTAL", "COMPLETED SESSIONS"]);
        table.add_row(row![
            format_minutes(stats.today_minutes),
            format_minutes(stats.total_focus_minutes),
            stats.completed_session_count
        ]);
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "CATEGORY", "DUE", "DONE"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.priority,
                task.category.as_deref().unwrap_or(""),
                task.due_date.map(|d| d.to_string()).unwrap_or_default(),
                if task.completed { "✔" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn notes(notes: &[Note]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CREATED", "SUMMARY"]);
        for note in notes {
            table.add_row(row![
                note.id,
                note.title,
                format_timestamp(&note.created_at),
                if note.summary.is_some() { "yes" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn ideas(ideas: &[ContentIdea]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "PLATFORM", "TITLE", "NICHE", "SAVED"]);
        for idea in ideas {
            table.add_row(row![
                idea.id,
                idea.platform,
                idea.title,
                idea.niche.as_deref().unwrap_or(""),
                if idea.saved { "★" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn today(stats: &TodayStats) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TASKS DONE", "FOCUS", "NOTES TODAY"]);
        table.add_row(row![
            format!("{}/{}", stats.tasks_completed, stats.total_tasks),
            format_minutes(stats.focus_minutes),
            stats.notes_created
        ]);
        table.printstd();

        Ok(())
    }
}
