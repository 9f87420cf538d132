use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const UPSERT_USER: &str = "INSERT INTO users (id, email, first_name, last_name, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5)
    ON CONFLICT(id) DO UPDATE SET
        email = excluded.email,
        first_name = excluded.first_name,
        last_name = excluded.last_name,
        updated_at = excluded.updated_at";
const SELECT_USER: &str = "SELECT id, email, first_name, last_name, created_at, updated_at FROM users WHERE id = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// First and last name when known, otherwise the email or the id.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return name;
        }
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

/// Profile fields written on login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct Users {
    pub conn: Connection,
}

impl Users {
    pub fn new() -> anyhow::Result<Users> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> Users {
        Users { conn: db.conn }
    }

    /// Inserts the user or refreshes the profile of an existing one.
    pub fn upsert(&mut self, user: &UpsertUser) -> StoreResult<User> {
        if user.id.trim().is_empty() {
            return Err(StoreError::validation("user id must not be blank"));
        }
        let now = Local::now().naive_local();
        self.conn
            .execute(UPSERT_USER, params![user.id, user.email, user.first_name, user.last_name, now])?;

        let stored = self.conn.query_row(SELECT_USER, params![user.id], User::from_row)?;
        Ok(stored)
    }

    pub fn get(&mut self, id: &str) -> StoreResult<Option<User>> {
        let user = self.conn.query_row(SELECT_USER, params![id], User::from_row).optional()?;
        Ok(user)
    }
}
