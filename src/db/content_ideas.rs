//! Content ideas generated for a niche and platform.

use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INSERT_IDEA: &str = "INSERT INTO content_ideas (user_id, platform, title, description, niche, saved, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, FALSE, ?6)";
const SELECT_IDEAS: &str = "SELECT id, user_id, platform, title, description, niche, saved, created_at FROM content_ideas";
const UPDATE_SAVED: &str = "UPDATE content_ideas SET saved = ?3 WHERE id = ?1 AND user_id = ?2";
const DELETE_IDEA: &str = "DELETE FROM content_ideas WHERE id = ?1 AND user_id = ?2";

/// Video platform an idea targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Shorts,
    Reels,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Shorts => "shorts",
            Platform::Reels => "reels",
        }
    }

    /// Format hints passed to the model for this platform.
    pub fn guidance(&self) -> &'static str {
        match self {
            Platform::Youtube => "longer-form video content (8-20 minutes), tutorials, reviews, vlogs",
            Platform::Shorts => "short vertical videos (under 60 seconds), quick tips, hooks, trends",
            Platform::Reels => "engaging vertical content (15-90 seconds), trends, entertainment, lifestyle",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "shorts" => Ok(Platform::Shorts),
            "reels" => Ok(Platform::Reels),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

impl ToSql for Platform {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Platform {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdea {
    pub id: i64,
    pub user_id: String,
    pub platform: Platform,
    pub title: String,
    pub description: Option<String>,
    pub niche: Option<String>,
    pub saved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentIdea {
    pub platform: Platform,
    pub title: String,
    pub description: Option<String>,
    pub niche: Option<String>,
}

pub struct ContentIdeas {
    pub conn: Connection,
}

impl ContentIdeas {
    pub fn new() -> anyhow::Result<ContentIdeas> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> ContentIdeas {
        ContentIdeas { conn: db.conn }
    }

    pub fn list(&mut self, user_id: &str) -> StoreResult<Vec<ContentIdea>> {
        let sql = format!("{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC", SELECT_IDEAS);
        let mut stmt = self.conn.prepare(&sql)?;
        let ideas = stmt.query_map(params![user_id], idea_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ideas)
    }

    pub fn get(&mut self, id: i64, user_id: &str) -> StoreResult<Option<ContentIdea>> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_IDEAS);
        let idea = self.conn.query_row(&sql, params![id, user_id], idea_from_row).optional()?;
        Ok(idea)
    }

    pub fn create(&mut self, user_id: &str, idea: &NewContentIdea) -> StoreResult<ContentIdea> {
        if idea.title.trim().is_empty() {
            return Err(StoreError::validation("content idea title must not be blank"));
        }

        let now = Local::now().naive_local();
        self.conn.execute(
            INSERT_IDEA,
            params![user_id, idea.platform, idea.title.trim(), idea.description, idea.niche, now],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get(id, user_id)?.ok_or(StoreError::NotFound("Content idea", id))
    }

    pub fn set_saved(&mut self, id: i64, user_id: &str, saved: bool) -> StoreResult<ContentIdea> {
        let changed = self.conn.execute(UPDATE_SAVED, params![id, user_id, saved])?;
        if changed == 0 {
            return Err(StoreError::NotFound("Content idea", id));
        }
        self.get(id, user_id)?.ok_or(StoreError::NotFound("Content idea", id))
    }

    pub fn delete(&mut self, id: i64, user_id: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute(DELETE_IDEA, params![id, user_id])?;
        Ok(deleted > 0)
    }
}

fn idea_from_row(row: &Row) -> rusqlite::Result<ContentIdea> {
    Ok(ContentIdea {
        id: row.get(0)?,
        user_id: row.get(1)?,
        platform: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        niche: row.get(5)?,
        saved: row.get(6)?,
        created_at: row.get(7)?,
    })
}
