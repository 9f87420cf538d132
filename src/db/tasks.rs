use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::task::{NewTask, Task, TaskUpdate};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (user_id, title, description, priority, category, due_date, completed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, FALSE, ?7, ?7)";
const SELECT_TASKS: &str =
    "SELECT id, user_id, title, description, priority, category, due_date, completed, created_at, updated_at FROM tasks";
const UPDATE_TASK: &str = "UPDATE tasks SET
        title = COALESCE(?3, title),
        description = COALESCE(?4, description),
        priority = COALESCE(?5, priority),
        category = COALESCE(?6, category),
        due_date = COALESCE(?7, due_date),
        completed = COALESCE(?8, completed),
        updated_at = ?9
    WHERE id = ?1 AND user_id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> anyhow::Result<Tasks> {
        Ok(Self::open(Db::new()?))
    }

    pub fn open(db: Db) -> Tasks {
        Tasks { conn: db.conn }
    }

    /// All of the user's tasks, newest first.
    pub fn list(&mut self, user_id: &str) -> StoreResult<Vec<Task>> {
        let sql = format!("{} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC", SELECT_TASKS);
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt.query_map(params![user_id], task_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn get(&mut self, id: i64, user_id: &str) -> StoreResult<Option<Task>> {
        let sql = format!("{} WHERE id = ?1 AND user_id = ?2", SELECT_TASKS);
        let task = self.conn.query_row(&sql, params![id, user_id], task_from_row).optional()?;
        Ok(task)
    }

    pub fn create(&mut self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        let title = task.title.trim();
        if title.is_empty() {
            return Err(StoreError::validation("task title must not be blank"));
        }

        let now = Local::now().naive_local();
        self.conn.execute(
            INSERT_TASK,
            params![user_id, title, task.description, task.priority, task.category, task.due_date, now],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get(id, user_id)?.ok_or(StoreError::NotFound("Task", id))
    }

    /// Applies the fields set in `update` and bumps `updated_at`.
    pub fn update(&mut self, id: i64, user_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(StoreError::validation("task title must not be blank"));
            }
        }

        let now = Local::now().naive_local();
        let changed = self.conn.execute(
            UPDATE_TASK,
            params![
                id,
                user_id,
                update.title.as_deref().map(str::trim),
                update.description,
                update.priority,
                update.category,
                update.due_date,
                update.completed,
                now
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("Task", id));
        }

        self.get(id, user_id)?.ok_or(StoreError::NotFound("Task", id))
    }

    /// Returns `false` when no task of this user had the id.
    pub fn delete(&mut self, id: i64, user_id: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute(DELETE_TASK, params![id, user_id])?;
        Ok(deleted > 0)
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        priority: row.get(4)?,
        category: row.get(5)?,
        due_date: row.get(6)?,
        completed: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
