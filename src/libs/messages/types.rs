//! Every user-facing message lifeos can print.
//!
//! Text lives in [`display`](super::display); call sites only pick a
//! variant and fill in its parameters.

#[derive(Debug, Clone)]
pub enum Message {
    // === FOCUS TIMER MESSAGES ===
    FocusHelp,
    FocusUnknownCommand(String),
    FocusRunCompleted(u32),
    FocusRunPartial(u32),
    TimerCommandReceived(String),
    SessionDispatchUnavailable,

    // === SESSION MESSAGES ===
    SessionRecorded(i64, u32),
    SessionRecordRetry(u32, String),
    SessionNotSaved(u32, String),
    SessionExpired,
    SessionEnded(i64),
    NoSessionsFound,
    InvalidDate(String),

    // === TASK MESSAGES ===
    NoTasksFound,
    TaskCreated(i64, String),
    TaskUpdated(i64),
    TaskCompleted(i64),
    TaskReopened(i64),
    TaskDeleted(i64),
    TasksParsed(usize),
    NothingToUpdate,

    // === NOTE MESSAGES ===
    NoNotesFound,
    NoteCreated(i64, String),
    NoteBody(String, String),
    NoteSummary(String),
    NoteUpdated(i64),
    NoteDeleted(i64),

    // === CONTENT IDEA MESSAGES ===
    NoIdeasFound,
    IdeasGenerated(usize),
    IdeaSaved(i64),
    IdeaUnsaved(i64),
    IdeaDeleted(i64),

    // === AI MESSAGES ===
    AiRequestSent(String, String),
    AiInputRequired,
    AiNicheRequired,
    ScheduleHeader,
    DailySummaryText(String),
    NoDailySummary,

    // === IDENTITY MESSAGES ===
    LoggedIn(String),
    LoggedOut,
    NotLoggedIn,
    CurrentUser(String, String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleFocus,
    ConfigModuleAi,

    // === PROMPT MESSAGES ===
    PromptSelectModules,
    PromptFocusMinutes,
    PromptBreakMinutes,
    PromptDispatchAttempts,
    PromptAiApiUrl,
    PromptAiModel,
    PromptAiApiKey,

    // === MIGRATION MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
