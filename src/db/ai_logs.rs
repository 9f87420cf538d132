use super::db::Db;
use crate::libs::error::StoreResult;
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::fmt;

const INSERT_LOG: &str = "INSERT INTO ai_logs (user_id, action_type, prompt, response, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_LOGS: &str = "SELECT id, user_id, action_type, prompt, response, created_at FROM ai_logs
    WHERE user_id = ?1 ORDER BY created_at DESC, id DESC";

/// Kind of AI request recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiAction {
    TaskParse,
    ScheduleGenerate,
    NoteSummarize,
    ContentGenerate,
    DailySummary,
}

impl AiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiAction::TaskParse => "task_parse",
            AiAction::ScheduleGenerate => "schedule_generate",
            AiAction::NoteSummarize => "note_summarize",
            AiAction::ContentGenerate => "content_generate",
            AiAction::DailySummary => "daily_summary",
        }
    }
}

impl fmt::Display for AiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLog {
    pub id: i64,
    pub user_id: String,
    pub action_type: String,
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Append-only audit trail of AI calls.
pub struct AiLogs {
    pub conn: Connection,
}

impl AiLogs {
    pub fn new() -> anyhow::Result<AiLogs> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> AiLogs {
        AiLogs { conn: db.conn }
    }

    pub fn insert(&mut self, user_id: &str, action: AiAction, prompt: Option<&str>, response: Option<&str>) -> StoreResult<i64> {
        let now = Local::now().naive_local();
        self.conn.execute(INSERT_LOG, params![user_id, action.as_str(), prompt, response, now])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list(&mut self, user_id: &str) -> StoreResult<Vec<AiLog>> {
        let mut stmt = self.conn.prepare(SELECT_LOGS)?;
        let logs = stmt.query_map(params![user_id], log_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(logs)
    }
}

fn log_from_row(row: &Row) -> rusqlite::Result<AiLog> {
    Ok(AiLog {
        id: row.get(0)?,
        user_id: row.get(1)?,
        action_type: row.get(2)?,
        prompt: row.get(3)?,
        response: row.get(4)?,
        created_at: row.get(5)?,
    })
}
