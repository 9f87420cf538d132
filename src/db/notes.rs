//! Free-form notes with an optional AI summary.

use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_NOTE: &str = "INSERT INTO notes (user_id, title, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const SELECT_NOTES: &str = "SELECT id, user_id, title, content, summary, created_at, updated_at FROM notes";
const UPDATE_NOTE: &str = "UPDATE notes SET
        title = COALESCE(?3, title),
        content = COALESCE(?4, content),
        summary = COALESCE(?5, summary),
        updated_at = ?6
    WHERE id = ?1 AND user_id = ?2";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1 AND user_id = ?2";
const COUNT_CREATED_ON: &str = "SELECT COUNT(*) FROM notes WHERE user_id = ?1 AND date(created_at) = date(?2)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
}

pub struct Notes {
    pub conn: Connection,
}

impl Notes {
    pub fn new() -> anyhow::Result<Notes> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> Notes {
        Notes { conn: db.conn }
    }

    pub fn list(&mut self, user_id: &str) -> StoreResult<Vec<Note>> {
        let sql = format!("{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC", SELECT_NOTES);
        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt.query_map(params![user_id], note_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn get(&mut self, id: i64, user_id: &str) -> StoreResult<Option<Note>> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_NOTES);
        let note = self.conn.query_row(&sql, params![id, user_id], note_from_row).optional()?;
        Ok(note)
    }

    pub fn create(&mut self, user_id: &str, title: &str, content: &str) -> StoreResult<Note> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(StoreError::validation("note title and content are required"));
        }

        let now = Local::now().naive_local();
        self.conn.execute(INSERT_NOTE, params![user_id, title.trim(), content, now])?;

        let id = self.conn.last_insert_rowid();
        self.get(id, user_id)?.ok_or(StoreError::NotFound("Note", id))
    }

    pub fn update(&mut self, id: i64, user_id: &str, update: &NoteUpdate) -> StoreResult<Note> {
        let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&update.title) || blank(&update.content) {
            return Err(StoreError::validation("note title and content are required"));
        }

        let now = Local::now().naive_local();
        let changed = self
            .conn
            .execute(UPDATE_NOTE, params![id, user_id, update.title, update.content, update.summary, now])?;
        if changed == 0 {
            return Err(StoreError::NotFound("Note", id));
        }

        self.get(id, user_id)?.ok_or(StoreError::NotFound("Note", id))
    }

    /// Stores an AI-generated summary on the note.
    pub fn set_summary(&mut self, id: i64, user_id: &str, summary: &str) -> StoreResult<Note> {
        self.update(
            id,
            user_id,
            &NoteUpdate {
                summary: Some(summary.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn delete(&mut self, id: i64, user_id: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute(DELETE_NOTE, params![id, user_id])?;
        Ok(deleted > 0)
    }

    /// Number of notes the user created on `date`.
    pub fn count_created_on(&mut self, user_id: &str, date: NaiveDate) -> StoreResult<u32> {
        let count = self.conn.query_row(COUNT_CREATED_ON, params![user_id, date], |row| row.get(0))?;
        Ok(count)
    }
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        summary: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
