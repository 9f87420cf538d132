//! Core library modules for lifeos.
//!
//! ## Focus timer
//!
//! - [`timer`]: the pure state machine. Every event yields a new state and
//!   an outbox of session drafts.
//! - [`controller`]: drives the state machine from a tick interval and
//!   user commands.
//! - [`outbox`]: delivers drafts to a [`focus_session::SessionStore`] with
//!   bounded retries.
//! - [`stats`]: focus statistics over stored sessions.
//!
//! ## Everything else
//!
//! Configuration, identity, the AI assistant workflows, console views and
//! the centralized [`messages`].
//!
//! ```rust,no_run
//! use lifeos::db::focus_sessions::FocusSessions;
//! use lifeos::libs::identity::Identity;
//!
//! let user_id = Identity::new().current()?;
//! let stats = FocusSessions::new()?.stats(&user_id, chrono::Local::now().naive_local())?;
//! println!("{} min today", stats.today_minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ai;
pub mod config;
pub mod controller;
pub mod data_storage;
pub mod error;
pub mod focus_session;
pub mod formatter;
pub mod identity;
pub mod messages;
pub mod outbox;
pub mod stats;
pub mod summary;
pub mod task;
pub mod timer;
pub mod view;
