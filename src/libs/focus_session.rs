//! Focus session records and the record-creation contract.
//!
//! A [`SessionDraft`] is what the timer emits when a focus run ends (naturally
//! or by reset). The store validates it, assigns `id` and `started_at`, and
//! returns the persisted [`FocusSession`].

use crate::libs::error::{StoreError, StoreResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted focus-phase run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: i64,
    pub user_id: String,
    /// Planned length of the run in minutes.
    pub duration: u32,
    /// Minutes actually focused when the record was written.
    pub completed_duration: u32,
    pub completed: bool,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

/// Record-creation request produced by the timer.
///
/// Serializes to the wire shape `{ duration, completedDuration, completed }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub duration: u32,
    pub completed_duration: u32,
    pub completed: bool,
}

impl SessionDraft {
    /// A run whose countdown reached zero.
    pub fn completed(duration: u32) -> Self {
        Self {
            duration,
            completed_duration: duration,
            completed: true,
        }
    }

    /// A run interrupted by a reset after `completed_duration` minutes.
    pub fn interrupted(duration: u32, completed_duration: u32) -> Self {
        Self {
            duration,
            completed_duration,
            completed: false,
        }
    }

    /// Checks the record invariants before anything touches the database.
    pub fn validate(&self) -> StoreResult<()> {
        if self.duration == 0 {
            return Err(StoreError::validation("duration must be greater than zero"));
        }
        if self.completed_duration > self.duration {
            return Err(StoreError::validation(format!(
                "completed duration {} exceeds planned duration {}",
                self.completed_duration, self.duration
            )));
        }
        if self.completed && self.completed_duration != self.duration {
            return Err(StoreError::validation("a completed session must cover its full duration"));
        }
        Ok(())
    }
}

/// Persistence contract the timer's dispatcher writes through.
///
/// Implementations must scope every read and write by `user_id`.
pub trait SessionStore {
    /// Validates and stores a draft; the store assigns `id` and `started_at`.
    fn create(&mut self, user_id: &str, draft: &SessionDraft) -> StoreResult<FocusSession>;

    /// All of the user's sessions, most recent first.
    fn list_by_user(&mut self, user_id: &str) -> StoreResult<Vec<FocusSession>>;
}
