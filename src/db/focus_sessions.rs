//! Persistence of focus session records.
//!
//! Every statement filters by `user_id` next to the primary key, so a row
//! owned by another user behaves exactly like a missing one.

use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::focus_session::{FocusSession, SessionDraft, SessionStore};
use crate::libs::stats::{self, FocusStats};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};

const INSERT_SESSION: &str = "INSERT INTO focus_sessions (user_id, duration, completed_duration, completed, started_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    RETURNING id, user_id, duration, completed_duration, completed, started_at, ended_at";
const SELECT_SESSIONS: &str = "SELECT id, user_id, duration, completed_duration, completed, started_at, ended_at FROM focus_sessions";
const ORDER_RECENT_FIRST: &str = "ORDER BY started_at DESC, id DESC";
const UPDATE_ENDED_AT: &str = "UPDATE focus_sessions SET ended_at = ?3 WHERE id = ?1 AND user_id = ?2";

pub struct FocusSessions {
    pub conn: Connection,
}

impl FocusSessions {
    pub fn new() -> anyhow::Result<FocusSessions> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> FocusSessions {
        FocusSessions { conn: db.conn }
    }

    /// Stores a draft with an explicit start time.
    pub fn create_at(&mut self, user_id: &str, draft: &SessionDraft, started_at: NaiveDateTime) -> StoreResult<FocusSession> {
        draft.validate()?;
        self.conn
            .query_row(
                INSERT_SESSION,
                params![user_id, draft.duration, draft.completed_duration, draft.completed, started_at],
                session_from_row,
            )
            .map_err(|e| {
                if StoreError::is_foreign_key_violation(&e) {
                    StoreError::Auth
                } else {
                    StoreError::Persistence(e)
                }
            })
    }

    pub fn get(&mut self, id: i64, user_id: &str) -> StoreResult<FocusSession> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_SESSIONS);
        match self.conn.query_row(&sql, params![id, user_id], session_from_row) {
            Ok(session) => Ok(session),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound("Focus session", id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Sessions started on `date`, most recent first.
    pub fn list_by_day(&mut self, user_id: &str, date: NaiveDate) -> StoreResult<Vec<FocusSession>> {
        let sql = format!("{} WHERE user_id = ?1 AND date(started_at) = date(?2) {}", SELECT_SESSIONS, ORDER_RECENT_FIRST);
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![user_id, date], session_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }

    /// Backfills the end time of a stored session.
    pub fn update_ended_at(&mut self, id: i64, user_id: &str, ended_at: NaiveDateTime) -> StoreResult<FocusSession> {
        let updated = self.conn.execute(UPDATE_ENDED_AT, params![id, user_id, ended_at])?;
        if updated == 0 {
            return Err(StoreError::NotFound("Focus session", id));
        }
        self.get(id, user_id)
    }

    /// Aggregated stats over the user's whole history.
    pub fn stats(&mut self, user_id: &str, now: NaiveDateTime) -> StoreResult<FocusStats> {
        let sessions = self.list_by_user(user_id)?;
        Ok(stats::aggregate(&sessions, now))
    }
}

impl SessionStore for FocusSessions {
    fn create(&mut self, user_id: &str, draft: &SessionDraft) -> StoreResult<FocusSession> {
        self.create_at(user_id, draft, Local::now().naive_local())
    }

    fn list_by_user(&mut self, user_id: &str) -> StoreResult<Vec<FocusSession>> {
        let sql = format!("{} WHERE user_id = ?1 {}", SELECT_SESSIONS, ORDER_RECENT_FIRST);
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![user_id], session_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }
}

fn session_from_row(row: &Row) -> rusqlite::Result<FocusSession> {
    Ok(FocusSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        duration: row.get(2)?,
        completed_duration: row.get(3)?,
        completed: row.get(4)?,
        started_at: row.get(5)?,
        ended_at: row.get(6)?,
    })
}
