//! SQLite persistence for lifeos.
//!
//! [`db::Db`] opens the database file under the application data directory
//! and brings the schema up to date through [`migrations`]. Each store wraps
//! one connection and scopes every query to a user id.
//!
//! ```rust,no_run
//! use lifeos::db::tasks::Tasks;
//! use lifeos::libs::task::NewTask;
//!
//! let mut tasks = Tasks::new()?;
//! let task = tasks.create("alice", &NewTask::new("Review pull request"))?;
//! println!("created #{}", task.id);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ai_logs;
pub mod content_ideas;
pub mod daily_summaries;
pub mod db;
pub mod focus_sessions;
pub mod migrations;
pub mod notes;
pub mod tasks;
pub mod users;
