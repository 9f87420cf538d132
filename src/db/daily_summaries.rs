use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::summary::TodayStats;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_SUMMARY: &str = "INSERT INTO daily_summaries (user_id, date, summary, tasks_completed, focus_minutes, notes_created, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_SUMMARY: &str = "SELECT id, user_id, date, summary, tasks_completed, focus_minutes, notes_created, created_at
    FROM daily_summaries";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub summary: String,
    pub tasks_completed: u32,
    pub focus_minutes: u32,
    pub notes_created: u32,
    pub created_at: NaiveDateTime,
}

pub struct DailySummaries {
    pub conn: Connection,
}

impl DailySummaries {
    pub fn new() -> anyhow::Result<DailySummaries> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> DailySummaries {
        DailySummaries { conn: db.conn }
    }

    /// Latest summary stored for `date`, if any.
    pub fn get_for_day(&mut self, user_id: &str, date: NaiveDate) -> StoreResult<Option<DailySummary>> {
        let sql = format!("{} WHERE user_id = ?1 AND date = ?2 ORDER BY id DESC LIMIT 1", SELECT_SUMMARY);
        let summary = self.conn.query_row(&sql, params![user_id, date], summary_from_row).optional()?;
        Ok(summary)
    }

    pub fn create(&mut self, user_id: &str, date: NaiveDate, summary: &str, stats: &TodayStats) -> StoreResult<DailySummary> {
        let now = Local::now().naive_local();
        self.conn.execute(
            INSERT_SUMMARY,
            params![user_id, date, summary, stats.tasks_completed, stats.focus_minutes, stats.notes_created, now],
        )?;

        let id = self.conn.last_insert_rowid();
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_SUMMARY);
        self.conn
            .query_row(&sql, params![id, user_id], summary_from_row)
            .optional()?
            .ok_or(StoreError::NotFound("Daily summary", id))
    }
}

fn summary_from_row(row: &Row) -> rusqlite::Result<DailySummary> {
    Ok(DailySummary {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        summary: row.get(3)?,
        tasks_completed: row.get(4)?,
        focus_minutes: row.get(5)?,
        notes_created: row.get(6)?,
        created_at: row.get(7)?,
    })
}
