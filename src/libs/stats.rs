//! Focus statistics derived from a user's session history.

use crate::libs::focus_session::FocusSession;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStats {
    pub today_minutes: u32,
    pub total_focus_minutes: u32,
    pub completed_session_count: u32,
}

/// Aggregates `sessions` relative to the local time `now`.
///
/// Partial and full runs are separate records, so each one is counted once.
/// "Today" means the calendar day of `now`.
pub fn aggregate(sessions: &[FocusSession], now: NaiveDateTime) -> FocusStats {
    let today = now.date();

    sessions.iter().fold(FocusStats::default(), |mut stats, session| {
        stats.total_focus_minutes += session.completed_duration;
        if session.completed {
            stats.completed_session_count += 1;
        }
        if session.started_at.date() == today {
            stats.today_minutes += session.completed_duration;
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(id: i64, completed_duration: u32, completed: bool, started_at: NaiveDateTime) -> FocusSession {
        FocusSession {
            id,
            user_id: "ada".into(),
            duration: 25,
            completed_duration,
            completed,
            started_at,
            ended_at: None,
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(aggregate(&[], at(14, 12, 0)), FocusStats::default());
    }

    #[test]
    fn today_counts_only_the_current_calendar_day() {
        let sessions = vec![
            session(1, 25, true, at(14, 9, 0)),
            session(2, 12, false, at(14, 10, 0)),
            session(3, 25, true, at(13, 23, 59)),
        ];

        let stats = aggregate(&sessions, at(14, 18, 0));

        assert_eq!(stats.today_minutes, 37);
        assert_eq!(stats.total_focus_minutes, 62);
        assert_eq!(stats.completed_session_count, 2);
    }

    #[test]
    fn two_full_runs_on_one_day_add_up() {
        let sessions = vec![session(1, 25, true, at(14, 9, 0)), session(2, 25, true, at(14, 9, 30))];

        let stats = aggregate(&sessions, at(14, 18, 0));

        assert_eq!(stats.today_minutes, 50);
        assert_eq!(stats.total_focus_minutes, 50);
        assert_eq!(stats.completed_session_count, 2);
    }

    #[test]
    fn midnight_starts_a_new_day() {
        let sessions = vec![session(1, 25, true, at(14, 23, 50))];

        assert_eq!(aggregate(&sessions, at(14, 23, 59)).today_minutes, 25);
        assert_eq!(aggregate(&sessions, at(15, 0, 0)).today_minutes, 0);
    }

    #[test]
    fn today_never_exceeds_total() {
        let mut sessions = Vec::new();
        for i in 0..40 {
            let day = 10 + (i % 7) as u32;
            let minutes = (i * 7 % 26) as u32;
            sessions.push(session(i, minutes, minutes == 25, at(day, (i % 24) as u32, 0)));
        }

        for day in 8..20 {
            let stats = aggregate(&sessions, at(day, 12, 0));
            assert!(stats.today_minutes <= stats.total_focus_minutes);
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(FocusStats {
            today_minutes: 27,
            total_focus_minutes: 27,
            completed_session_count: 1,
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "todayMinutes": 27, "totalFocusMinutes": 27, "completedSessionCount": 1 })
        );
    }
}
