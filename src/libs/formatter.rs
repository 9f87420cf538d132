//! Formatting helpers for timer and history output.
//!
//! ```rust
//! use lifeos::libs::formatter::{format_clock, format_minutes};
//!
//! assert_eq!(format_clock(1500), "25:00");
//! assert_eq!(format_minutes(95), "1h 35m");
//! ```

use crate::libs::timer::{Phase, TimerSnapshot};
use chrono::NaiveDateTime;

/// Seconds as a `MM:SS` countdown.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Minutes as `Xh YYm`, or `Nm` below one hour.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Ready",
        Phase::Focus => "Focus",
        Phase::Break => "Break",
    }
}

/// One status line for the terminal timer.
pub fn format_snapshot(snapshot: &TimerSnapshot) -> String {
    let state = match (snapshot.phase, snapshot.running) {
        (Phase::Idle, _) => "idle",
        (_, true) => "running",
        (_, false) => "paused",
    };
    format!("{} {} ({})", phase_label(snapshot.phase), format_clock(snapshot.remaining_seconds), state)
}
