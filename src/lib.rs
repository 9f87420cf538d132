//! # lifeos
//!
//! A command-line personal productivity companion: a Pomodoro focus timer
//! with session history, tasks, notes, content ideas and AI-generated daily
//! summaries, all stored per user in a local SQLite database.
//!
//! ## Layout
//!
//! - [`libs`]: domain logic. The focus timer is a pure state machine
//!   ([`libs::timer`]) driven by an async controller ([`libs::controller`]);
//!   session records leave through an outbox ([`libs::outbox`]).
//! - [`db`]: SQLite stores and schema migrations.
//! - [`api`]: the chat completion client used by the AI features.
//! - [`commands`]: the `clap` CLI.
//!
//! ```rust
//! use lifeos::libs::timer::{Phase, TimerEvent, TimerState};
//!
//! let state = TimerState::default();
//! let step = state.apply(TimerEvent::Start { at: chrono::Local::now().naive_local() });
//! assert_eq!(step.state.phase, Phase::Focus);
//! assert!(step.outbox.is_empty());
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
