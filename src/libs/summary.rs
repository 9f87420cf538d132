//! Today's activity figures used by the daily summary.

use crate::db::focus_sessions::FocusSessions;
use crate::db::notes::Notes;
use crate::db::tasks::Tasks;
use crate::libs::error::StoreResult;
use crate::libs::focus_session::FocusSession;
use crate::libs::stats;
use crate::libs::task::Task;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    /// Completed tasks across the whole list, not only today's.
    pub tasks_completed: u32,
    pub total_tasks: u32,
    pub focus_minutes: u32,
    pub notes_created: u32,
}

impl TodayStats {
    pub fn compute(tasks: &[Task], sessions: &[FocusSession], notes_created: u32, now: NaiveDateTime) -> Self {
        TodayStats {
            tasks_completed: tasks.iter().filter(|t| t.completed).count() as u32,
            total_tasks: tasks.len() as u32,
            focus_minutes: stats::aggregate(sessions, now).today_minutes,
            notes_created,
        }
    }

    /// Reads everything needed for `user_id` from the stores.
    pub fn load(tasks: &mut Tasks, sessions: &mut FocusSessions, notes: &mut Notes, user_id: &str, now: NaiveDateTime) -> StoreResult<Self> {
        let all_tasks = tasks.list(user_id)?;
        let todays_sessions = sessions.list_by_day(user_id, now.date())?;
        let notes_created = notes.count_created_on(user_id, now.date())?;
        Ok(Self::compute(&all_tasks, &todays_sessions, notes_created, now))
    }
}
