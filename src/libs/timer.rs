//! Pomodoro timer state machine.
//!
//! The timer is a plain value: [`TimerState::apply`] maps `(state, event)` to
//! a new state plus the session drafts that transition produced. Nothing in
//! here touches a clock or the database, so every transition can be tested
//! by feeding [`TimerEvent::Tick`] events by hand.
//!
//! ```text
//!          start                 countdown hits 0
//!   idle ─────────▶ focus ───────────────────────▶ break
//!    ▲               │ reset                         │ countdown hits 0
//!    │◀──────────────┘ (record if ≥ 60 s elapsed)    │ or reset
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! Pause/resume only flips the `running` flag; it never changes the phase
//! and never produces a record. Break time is never recorded.

use crate::libs::focus_session::SessionDraft;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Minimum focused time before a reset leaves a record behind.
pub const MIN_RECORDED_SECONDS: u32 = 60;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Focus,
    Break,
}

/// Longest configurable phase.
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

/// Phase lengths in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl TimerDurations {
    /// Builds durations, clamping both phases to one minute..one day.
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes: focus_minutes.clamp(1, MAX_PHASE_MINUTES),
            break_minutes: break_minutes.clamp(1, MAX_PHASE_MINUTES),
        }
    }

    pub fn focus_seconds(&self) -> u32 {
        self.focus_minutes.saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes.saturating_mul(60)
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Begin a new focus run at the given local time.
    Start { at: NaiveDateTime },
    /// Toggle the running flag of the current phase.
    Pause,
    /// Continue a paused phase; no-op when already running.
    Resume,
    /// Abandon the current phase and return to idle.
    Reset,
    /// One countdown unit (one second) elapsed.
    Tick,
}

/// What the presentation layer observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    /// Local time the current focus run started, if one is active.
    pub run_started_at: Option<NaiveDateTime>,
    /// Incremented on every start; lets drivers tell runs apart.
    pub run: u64,
    durations: TimerDurations,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: TimerState,
    /// Session records to persist, in emission order (at most one).
    pub outbox: Vec<SessionDraft>,
}

impl TimerState {
    /// Idle timer with the focus duration preloaded.
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: durations.focus_seconds(),
            running: false,
            run_started_at: None,
            run: 0,
            durations,
        }
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
        }
    }

    /// True while a tick source should be armed for this state.
    pub fn is_counting(&self) -> bool {
        self.running && self.phase != Phase::Idle && self.remaining_seconds > 0
    }

    /// Seconds of focus time spent in the current run.
    pub fn elapsed_focus_seconds(&self) -> u32 {
        match self.phase {
            Phase::Focus => self.durations.focus_seconds().saturating_sub(self.remaining_seconds),
            _ => 0,
        }
    }

    /// Applies `event` and returns the next state with any records to persist.
    pub fn apply(&self, event: TimerEvent) -> Transition {
        let mut next = self.clone();
        let mut outbox = Vec::new();

        match event {
            TimerEvent::Start { at } => next.start(at),
            TimerEvent::Pause => next.toggle_running(),
            TimerEvent::Resume => next.resume(),
            TimerEvent::Reset => outbox.extend(next.reset()),
            TimerEvent::Tick => outbox.extend(next.tick()),
        }

        Transition { state: next, outbox }
    }

    fn start(&mut self, at: NaiveDateTime) {
        // A running focus run is not restarted; a break can be skipped.
        if self.phase == Phase::Focus {
            return;
        }
        self.phase = Phase::Focus;
        self.remaining_seconds = self.durations.focus_seconds();
        self.running = true;
        self.run_started_at = Some(at);
        self.run += 1;
    }

    fn toggle_running(&mut self) {
        if self.phase != Phase::Idle {
            self.running = !self.running;
        }
    }

    fn resume(&mut self) {
        if self.phase != Phase::Idle {
            self.running = true;
        }
    }

    fn reset(&mut self) -> Option<SessionDraft> {
        let draft = match self.phase {
            Phase::Focus => partial_run_draft(self.durations.focus_minutes, self.elapsed_focus_seconds()),
            Phase::Idle | Phase::Break => None,
        };
        self.go_idle();
        draft
    }

    fn tick(&mut self) -> Option<SessionDraft> {
        if !self.running || self.phase == Phase::Idle {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        match self.phase {
            Phase::Focus => {
                self.phase = Phase::Break;
                self.remaining_seconds = self.durations.break_seconds();
                self.running = false;
                self.run_started_at = None;
                Some(SessionDraft::completed(self.durations.focus_minutes))
            }
            Phase::Break => {
                self.go_idle();
                None
            }
            Phase::Idle => None,
        }
    }

    fn go_idle(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_seconds = self.durations.focus_seconds();
        self.running = false;
        self.run_started_at = None;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

/// Converts elapsed seconds to whole minutes, rounding half up.
pub fn round_elapsed_minutes(elapsed_seconds: u32) -> u32 {
    (elapsed_seconds + 30) / 60
}

/// Record for a focus run interrupted after `elapsed_seconds`, if any is due.
pub fn partial_run_draft(focus_minutes: u32, elapsed_seconds: u32) -> Option<SessionDraft> {
    if elapsed_seconds < MIN_RECORDED_SECONDS {
        return None;
    }
    let minutes = round_elapsed_minutes(elapsed_seconds).min(focus_minutes);
    (minutes > 0).then(|| SessionDraft::interrupted(focus_minutes, minutes))
}
