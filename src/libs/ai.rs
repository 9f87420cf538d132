//! AI-assisted features built on a [`CompletionClient`].
//!
//! Each operation sends one structured prompt, turns the answer into typed
//! data, writes the result to the user's stores and appends an entry to the
//! AI log. Empty answers fall back to fixed texts instead of failing.

use crate::api::{CompletionClient, CompletionRequest};
use crate::db::ai_logs::{AiAction, AiLogs};
use crate::db::content_ideas::{ContentIdea, ContentIdeas, NewContentIdea, Platform};
use crate::db::daily_summaries::{DailySummaries, DailySummary};
use crate::db::notes::{Note, Notes};
use crate::db::tasks::Tasks;
use crate::libs::error::{AiError, StoreError};
use crate::libs::messages::Message;
use crate::libs::summary::TodayStats;
use crate::libs::task::{NewTask, Priority, Task};
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FREE_TIME: &str = "9am-5pm";
pub const FALLBACK_SCHEDULE: &str = "Unable to generate schedule.";
pub const FALLBACK_NOTE_SUMMARY: &str = "Unable to summarize note.";
pub const FALLBACK_DAILY_SUMMARY: &str = "Great work today! Keep pushing forward.";

/// Longest note excerpt kept in the AI log.
const LOGGED_NOTE_CHARS: usize = 500;

const TASK_PARSE_PROMPT: &str = "You are a task parsing assistant. Parse the user's natural language input into structured tasks.
Extract:
- title: the main task description (keep it concise)
- description: additional details if any
- priority: \"high\", \"medium\", or \"low\" based on urgency words or context
- category: infer a category if possible (work, personal, health, education, etc.)
- dueDate: if a date/time is mentioned, convert to ISO format (YYYY-MM-DD)

Return a JSON object with a \"tasks\" array. Respond ONLY with valid JSON, no other text.";

const SCHEDULE_PROMPT: &str = "You are a productivity coach and schedule optimizer. Given a list of tasks and available time blocks,
create an optimized daily schedule. Consider:
- Task priorities
- Due dates
- Energy levels throughout the day
- Include breaks

Format the schedule clearly with times and tasks.";

const NOTE_SUMMARY_PROMPT: &str = "You are a note summarization expert. Create a concise summary of the provided note that:
- Captures the key points
- Maintains important details
- Is easy to scan quickly
- Uses bullet points for clarity

Keep the summary under 150 words.";

const DAILY_SUMMARY_PROMPT: &str = "You are an encouraging productivity coach. Create a personalized, motivational daily summary based on the user's accomplishments.

Be:
- Encouraging and positive
- Specific about achievements
- Provide actionable suggestions for tomorrow
- Keep it concise (2-3 sentences)

Don't be overly cheesy, be genuine and supportive.";

/// A task as extracted by the model. Unknown priorities become `medium`,
/// unparseable due dates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl ParsedTask {
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority.as_deref().and_then(|p| p.parse().ok()).unwrap_or_default(),
            category: self.category.clone(),
            due_date: self.due_date.as_deref().and_then(parse_due_date),
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as full ISO timestamps.
fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let date = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedIdea {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct TaskList {
    #[serde(default)]
    tasks: Vec<ParsedTask>,
}

#[derive(Debug, Deserialize)]
struct IdeaList {
    #[serde(default)]
    ideas: Vec<GeneratedIdea>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduledTask<'a> {
    title: &'a str,
    priority: Priority,
    due_date: Option<NaiveDate>,
}

pub struct Assistant<C> {
    client: C,
}

impl<C: CompletionClient> Assistant<C> {
    pub fn new(client: C) -> Self {
        Assistant { client }
    }

    /// Extracts structured tasks from free text.
    pub async fn parse_tasks(&self, input: &str) -> Result<Vec<ParsedTask>, AiError> {
        let request = CompletionRequest::new(TASK_PARSE_PROMPT, input, 1024).json();
        let content = self.client.complete(&request).await?;
        let list: TaskList = serde_json::from_str(content.as_deref().unwrap_or(r#"{"tasks": []}"#))?;
        Ok(list.tasks)
    }

    /// Plans a day for the incomplete tasks in `tasks`.
    pub async fn generate_schedule(&self, tasks: &[Task], free_time: &str) -> Result<String, AiError> {
        let active: Vec<ScheduledTask> = tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| ScheduledTask {
                title: &task.title,
                priority: task.priority,
                due_date: task.due_date,
            })
            .collect();

        let user = format!("Tasks: {}\n\nAvailable time: {}", serde_json::to_string(&active)?, free_time);
        let content = self.client.complete(&CompletionRequest::new(SCHEDULE_PROMPT, user, 1024)).await?;
        Ok(content.unwrap_or_else(|| FALLBACK_SCHEDULE.to_string()))
    }

    pub async fn summarize_note(&self, content: &str) -> Result<String, AiError> {
        let answer = self.client.complete(&CompletionRequest::new(NOTE_SUMMARY_PROMPT, content, 512)).await?;
        Ok(answer.unwrap_or_else(|| FALLBACK_NOTE_SUMMARY.to_string()))
    }

    pub async fn generate_content_ideas(&self, niche: &str, platform: Platform) -> Result<Vec<GeneratedIdea>, AiError> {
        let system = format!(
            "You are a content strategist specializing in {platform}. Generate creative, engaging content ideas for the given niche.
Platform focus: {}

For each idea provide:
- title: catchy, click-worthy title
- description: brief description of the content and why it would perform well

Generate 5 unique ideas. Return as JSON with a \"ideas\" array.",
            platform.guidance()
        );
        let request = CompletionRequest::new(system, format!("Niche: {niche}"), 1024).json();
        let content = self.client.complete(&request).await?;
        let list: IdeaList = serde_json::from_str(content.as_deref().unwrap_or(r#"{"ideas": []}"#))?;
        Ok(list.ideas)
    }

    pub async fn generate_daily_summary(&self, stats: &TodayStats) -> Result<String, AiError> {
        let user = format!(
            "Today's stats:\n- Tasks completed: {} out of {}\n- Focus time: {} minutes\n- Notes created: {}",
            stats.tasks_completed, stats.total_tasks, stats.focus_minutes, stats.notes_created
        );
        let content = self.client.complete(&CompletionRequest::new(DAILY_SUMMARY_PROMPT, user, 256)).await?;
        Ok(content.unwrap_or_else(|| FALLBACK_DAILY_SUMMARY.to_string()))
    }

    /// Parses `input` and stores every extracted task.
    pub async fn create_tasks_from_text(&self, user_id: &str, input: &str, tasks: &mut Tasks, logs: &mut AiLogs) -> Result<Vec<Task>> {
        if input.trim().is_empty() {
            msg_bail_anyhow!(Message::AiInputRequired);
        }

        let parsed = self.parse_tasks(input).await?;
        logs.insert(user_id, AiAction::TaskParse, Some(input), Some(&serde_json::to_string(&parsed)?))?;

        let mut created = Vec::with_capacity(parsed.len());
        for task in &parsed {
            created.push(tasks.create(user_id, &task.to_new_task())?);
        }
        Ok(created)
    }

    pub async fn schedule_for(&self, user_id: &str, free_time: Option<&str>, tasks: &mut Tasks, logs: &mut AiLogs) -> Result<String> {
        let free_time = free_time.filter(|f| !f.trim().is_empty()).unwrap_or(DEFAULT_FREE_TIME);
        let all_tasks = tasks.list(user_id)?;

        let schedule = self.generate_schedule(&all_tasks, free_time).await?;
        logs.insert(user_id, AiAction::ScheduleGenerate, Some(free_time), Some(&schedule))?;
        Ok(schedule)
    }

    /// Summarizes a stored note and saves the summary on it.
    pub async fn summarize_stored_note(&self, user_id: &str, note_id: i64, notes: &mut Notes, logs: &mut AiLogs) -> Result<Note> {
        let note = notes.get(note_id, user_id)?.ok_or(StoreError::NotFound("Note", note_id))?;

        let summary = self.summarize_note(&note.content).await?;
        let excerpt: String = note.content.chars().take(LOGGED_NOTE_CHARS).collect();
        logs.insert(user_id, AiAction::NoteSummarize, Some(&excerpt), Some(&summary))?;

        Ok(notes.set_summary(note_id, user_id, &summary)?)
    }

    pub async fn create_content_ideas(
        &self,
        user_id: &str,
        niche: &str,
        platform: Platform,
        ideas: &mut ContentIdeas,
        logs: &mut AiLogs,
    ) -> Result<Vec<ContentIdea>> {
        if niche.trim().is_empty() {
            msg_bail_anyhow!(Message::AiNicheRequired);
        }

        let generated = self.generate_content_ideas(niche, platform).await?;
        let prompt = format!("{niche} - {platform}");
        logs.insert(user_id, AiAction::ContentGenerate, Some(&prompt), Some(&serde_json::to_string(&generated)?))?;

        let mut saved = Vec::with_capacity(generated.len());
        for idea in generated {
            let new_idea = NewContentIdea {
                platform,
                title: idea.title,
                description: Some(idea.description),
                niche: Some(niche.to_string()),
            };
            saved.push(ideas.create(user_id, &new_idea)?);
        }
        Ok(saved)
    }

    pub async fn create_daily_summary(
        &self,
        user_id: &str,
        date: NaiveDate,
        stats: &TodayStats,
        summaries: &mut DailySummaries,
        logs: &mut AiLogs,
    ) -> Result<DailySummary> {
        let summary = self.generate_daily_summary(stats).await?;
        logs.insert(user_id, AiAction::DailySummary, Some(&serde_json::to_string(stats)?), Some(&summary))?;
        Ok(summaries.create(user_id, date, &summary, stats)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Answers with canned content and remembers the requests.
    struct Canned {
        answer: Option<String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl Canned {
        fn new(answer: Option<&str>) -> Self {
            Canned {
                answer: answer.map(str::to_string),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for Canned {
        async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, AiError> {
            self.requests.lock().push(request.clone());
            Ok(self.answer.clone())
        }
    }

    #[tokio::test]
    async fn parsed_tasks_are_lenient_about_priority_and_dates() {
        let assistant = Assistant::new(Canned::new(Some(
            r#"{"tasks":[{"title":"Ship release","priority":"HIGH","dueDate":"2025-03-20T10:00:00Z"},{"title":"Stretch","priority":"someday"}]}"#,
        )));

        let parsed = assistant.parse_tasks("ship release by thursday, stretch").await.unwrap();
        let first = parsed[0].to_new_task();
        let second = parsed[1].to_new_task();

        assert_eq!(first.priority, Priority::High);
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(second.priority, Priority::Medium);
        assert!(assistant.client.requests.lock()[0].json);
    }

    #[tokio::test]
    async fn empty_answers_use_fallbacks() {
        let assistant = Assistant::new(Canned::new(None));

        assert!(assistant.parse_tasks("anything").await.unwrap().is_empty());
        assert!(assistant.generate_content_ideas("rust", Platform::Shorts).await.unwrap().is_empty());
        assert_eq!(assistant.summarize_note("text").await.unwrap(), FALLBACK_NOTE_SUMMARY);
        assert_eq!(assistant.generate_schedule(&[], DEFAULT_FREE_TIME).await.unwrap(), FALLBACK_SCHEDULE);
        assert_eq!(
            assistant.generate_daily_summary(&TodayStats::default()).await.unwrap(),
            FALLBACK_DAILY_SUMMARY
        );
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let assistant = Assistant::new(Canned::new(Some("not json")));
        assert!(matches!(assistant.parse_tasks("x").await, Err(AiError::Malformed(_))));
    }

    #[tokio::test]
    async fn missing_array_key_means_nothing_parsed() {
        let assistant = Assistant::new(Canned::new(Some(r#"{"result": []}"#)));
        assert!(assistant.parse_tasks("x").await.unwrap().is_empty());
    }

    #[test]
    fn due_dates_accept_plain_and_timestamp_forms() {
        assert_eq!(parse_due_date("2025-03-20"), NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(parse_due_date("2025-03-20T09:00:00.000Z"), NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(parse_due_date("next week"), None);
    }
}
