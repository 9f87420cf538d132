//! Display implementation for lifeos messages.
//!
//! All user-facing text is defined here, in one `match`, so call sites stay
//! free of string literals:
//!
//! ```rust
//! use lifeos::libs::messages::Message;
//!
//! assert_eq!(Message::TaskDeleted(7).to_string(), "Task #7 deleted");
//! ```

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            // === FOCUS TIMER MESSAGES ===
            Message::FocusHelp => {
                "Commands: [s]tart  [p]ause  [c]ontinue  [r]eset  [h]elp  [q]uit".to_string()
            }
            Message::FocusUnknownCommand(input) => format!("Unknown command '{}'. Type 'h' for help", input),
            Message::FocusRunCompleted(minutes) => format!("Focus run completed: {} min recorded", minutes),
            Message::FocusRunPartial(minutes) => format!("Partial focus run recorded: {} min", minutes),
            Message::TimerCommandReceived(command) => format!("Timer command received: {}", command),
            Message::SessionDispatchUnavailable => "Session recorder is not running, focus time will not be saved".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionRecorded(id, minutes) => format!("Focus session #{} recorded ({} min)", id, minutes),
            Message::SessionRecordRetry(attempt, error) => format!("Saving focus session failed (attempt {}): {}", attempt, error),
            Message::SessionNotSaved(attempts, error) => {
                format!("Focus session was not saved after {} attempt(s): {}", attempts, error)
            }
            Message::SessionExpired => "Your session has expired. Run 'lifeos login' and start again".to_string(),
            Message::SessionEnded(id) => format!("Focus session #{} marked as ended", id),
            Message::NoSessionsFound => "No focus sessions found".to_string(),
            Message::InvalidDate(value) => format!("Invalid date '{}'. Use YYYY-MM-DD or 'today'", value),

            // === TASK MESSAGES ===
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::TaskCreated(id, title) => format!("Task #{} created: {}", id, title),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskCompleted(id) => format!("Task #{} marked as done", id),
            Message::TaskReopened(id) => format!("Task #{} reopened", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TasksParsed(count) => format!("{} task(s) created from your text", count),
            Message::NothingToUpdate => "Nothing to update".to_string(),

            // === NOTE MESSAGES ===
            Message::NoNotesFound => "No notes found".to_string(),
            Message::NoteCreated(id, title) => format!("Note #{} created: {}", id, title),
            Message::NoteBody(title, content) => format!("{}\n\n{}", title, content),
            Message::NoteSummary(summary) => format!("Summary:\n{}", summary),
            Message::NoteUpdated(id) => format!("Note #{} updated", id),
            Message::NoteDeleted(id) => format!("Note #{} deleted", id),

            // === CONTENT IDEA MESSAGES ===
            Message::NoIdeasFound => "No content ideas found".to_string(),
            Message::IdeasGenerated(count) => format!("{} content idea(s) generated", count),
            Message::IdeaSaved(id) => format!("Idea #{} saved", id),
            Message::IdeaUnsaved(id) => format!("Idea #{} removed from saved", id),
            Message::IdeaDeleted(id) => format!("Idea #{} deleted", id),

            // === AI MESSAGES ===
            Message::AiRequestSent(url, model) => format!("Chat completion request sent to {} (model {})", url, model),
            Message::AiInputRequired => "Text to parse is required".to_string(),
            Message::AiNicheRequired => "Niche is required".to_string(),
            Message::ScheduleHeader => "Suggested schedule:".to_string(),
            Message::DailySummaryText(summary) => format!("Daily summary:\n{}", summary),
            Message::NoDailySummary => "No summary for today yet. Run 'lifeos summary --generate'".to_string(),

            // === IDENTITY MESSAGES ===
            Message::LoggedIn(name) => format!("Signed in as {}", name),
            Message::LoggedOut => "Signed out".to_string(),
            Message::NotLoggedIn => "Not signed in".to_string(),
            Message::CurrentUser(name, id) => format!("{} ({})", name, id),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleFocus => "Focus timer settings".to_string(),
            Message::ConfigModuleAi => "AI assistant settings".to_string(),

            // === PROMPT MESSAGES ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptFocusMinutes => "Focus duration (minutes)".to_string(),
            Message::PromptBreakMinutes => "Break duration (minutes)".to_string(),
            Message::PromptDispatchAttempts => "Attempts to save a focus session".to_string(),
            Message::PromptAiApiUrl => "Chat completion API URL".to_string(),
            Message::PromptAiModel => "Model".to_string(),
            Message::PromptAiApiKey => "API key (leave empty to use OPENAI_API_KEY)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
        };
        write!(f, "{}", text)
    }
}
