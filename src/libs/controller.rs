//! Event loop that drives a [`TimerState`] in real time.
//!
//! The controller owns the timer and serializes everything that touches it:
//! commands from the presentation layer and ticks from a single
//! [`tokio::time::Interval`] are handled one at a time in one task. The
//! interval only exists while the timer is counting, so pausing, resetting
//! or finishing a phase drops it and no stale tick can fire later.
//!
//! Drafts produced by transitions are handed to the dispatcher channel
//! without waiting for the write.

use crate::libs::focus_session::SessionDraft;
use crate::libs::messages::Message;
use crate::libs::outbox::Outbox;
use crate::libs::timer::{Phase, TimerDurations, TimerEvent, TimerSnapshot, TimerState};
use crate::{msg_debug, msg_warning};
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Commands accepted from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Resume,
    Reset,
    Quit,
}

/// Synchronous timer with a local outbox.
///
/// Useful wherever ticks are driven by hand; the async controller wraps one.
#[derive(Debug, Clone, Default)]
pub struct FocusTimer {
    state: TimerState,
    outbox: Outbox,
}

impl FocusTimer {
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            state: TimerState::new(durations),
            outbox: Outbox::new(),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    pub fn start(&mut self) {
        self.apply(TimerEvent::Start {
            at: Local::now().naive_local(),
        });
    }

    pub fn pause(&mut self) {
        self.apply(TimerEvent::Pause);
    }

    pub fn resume(&mut self) {
        self.apply(TimerEvent::Resume);
    }

    pub fn reset(&mut self) {
        self.apply(TimerEvent::Reset);
    }

    pub fn tick(&mut self) {
        self.apply(TimerEvent::Tick);
    }

    /// Takes every draft produced since the last call.
    pub fn drain_outbox(&mut self) -> Vec<SessionDraft> {
        self.outbox.drain()
    }

    fn apply(&mut self, event: TimerEvent) {
        let transition = self.state.apply(event);
        self.state = transition.state;
        self.outbox.extend(transition.outbox);
    }
}

/// Cloneable front end of a running [`FocusController`].
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    commands: UnboundedSender<TimerCommand>,
    snapshots: watch::Receiver<TimerSnapshot>,
}

impl ControllerHandle {
    /// Queues a command; returns `false` once the controller has stopped.
    pub fn send(&self, command: TimerCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn start(&self) -> bool {
        self.send(TimerCommand::Start)
    }

    pub fn pause(&self) -> bool {
        self.send(TimerCommand::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(TimerCommand::Resume)
    }

    pub fn reset(&self) -> bool {
        self.send(TimerCommand::Reset)
    }

    pub fn quit(&self) -> bool {
        self.send(TimerCommand::Quit)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }
}

enum Step {
    Command(Option<TimerCommand>),
    Tick,
}

pub struct FocusController {
    timer: FocusTimer,
    tick_period: Duration,
    commands: UnboundedReceiver<TimerCommand>,
    drafts: UnboundedSender<SessionDraft>,
    snapshots: watch::Sender<TimerSnapshot>,
}

impl FocusController {
    /// Builds a controller and its handle. Drafts are sent to `drafts`.
    pub fn new(durations: TimerDurations, tick_period: Duration, drafts: UnboundedSender<SessionDraft>) -> (Self, ControllerHandle) {
        let timer = FocusTimer::new(durations);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

        let controller = Self {
            timer,
            tick_period,
            commands: command_rx,
            drafts,
            snapshots: snapshot_tx,
        };
        let handle = ControllerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (controller, handle)
    }

    /// Runs until [`TimerCommand::Quit`] or until every handle is dropped.
    ///
    /// Returns the final timer state. Quitting abandons the current run
    /// without recording it.
    pub async fn run(mut self) -> TimerState {
        let mut ticker: Option<Interval> = None;
        let mut armed_for: Option<(Phase, u64)> = None;

        loop {
            self.arm_ticker(&mut ticker, &mut armed_for);

            let step = tokio::select! {
                command = self.commands.recv() => Step::Command(command),
                _ = next_tick(&mut ticker) => Step::Tick,
            };

            match step {
                Step::Command(None) | Step::Command(Some(TimerCommand::Quit)) => break,
                Step::Command(Some(command)) => self.handle(command),
                Step::Tick => self.timer.tick(),
            }

            self.forward_drafts();
            self.snapshots.send_replace(self.timer.snapshot());
        }

        self.timer.state().clone()
    }

    fn handle(&mut self, command: TimerCommand) {
        msg_debug!(Message::TimerCommandReceived(format!("{command:?}")));
        match command {
            TimerCommand::Start => self.timer.start(),
            TimerCommand::Pause => self.timer.pause(),
            TimerCommand::Resume => self.timer.resume(),
            TimerCommand::Reset => self.timer.reset(),
            TimerCommand::Quit => {}
        }
    }

    /// Keeps exactly one interval alive for the counting phase and run.
    fn arm_ticker(&self, ticker: &mut Option<Interval>, armed_for: &mut Option<(Phase, u64)>) {
        let state = self.timer.state();
        if !state.is_counting() {
            *ticker = None;
            *armed_for = None;
            return;
        }

        let key = (state.phase, state.run);
        if ticker.is_none() || *armed_for != Some(key) {
            let mut interval = time::interval_at(Instant::now() + self.tick_period, self.tick_period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(interval);
            *armed_for = Some(key);
        }
    }

    fn forward_drafts(&mut self) {
        for draft in self.timer.drain_outbox() {
            if self.drafts.send(draft).is_err() {
                msg_warning!(Message::SessionDispatchUnavailable);
            }
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_controller() -> (ControllerHandle, UnboundedReceiver<SessionDraft>, tokio::task::JoinHandle<TimerState>) {
        let (draft_tx, draft_rx) = mpsc::unbounded_channel();
        let (controller, handle) = FocusController::new(TimerDurations::default(), DEFAULT_TICK_PERIOD, draft_tx);
        let task = tokio::spawn(controller.run());
        (handle, draft_rx, task)
    }

    async fn wait(millis: u64) {
        time::sleep(Duration::from_millis(millis)).await;
    }

    #[test]
    fn sync_timer_collects_drafts() {
        let mut timer = FocusTimer::default();
        timer.start();
        for _ in 0..90 {
            timer.tick();
        }
        timer.reset();

        assert_eq!(timer.drain_outbox(), vec![SessionDraft::interrupted(25, 2)]);
        assert!(timer.drain_outbox().is_empty());
        assert_eq!(timer.snapshot().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_period() {
        let (handle, _drafts, _task) = spawn_controller();

        handle.start();
        wait(3_500).await;

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.phase, Phase::Focus);
        assert_eq!(snapshot.remaining_seconds, 1_497);
        assert!(snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_all_decrements() {
        let (handle, _drafts, _task) = spawn_controller();

        handle.start();
        wait(10_500).await;
        handle.pause();
        wait(60_000).await;
        assert_eq!(handle.snapshot().remaining_seconds, 1_490);
        assert!(!handle.snapshot().running);

        handle.resume();
        wait(5_500).await;
        assert_eq!(handle.snapshot().remaining_seconds, 1_485);
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_hands_completed_draft_to_dispatcher() {
        let (handle, mut drafts, _task) = spawn_controller();

        handle.start();
        wait(1_500_500).await;

        assert_eq!(drafts.try_recv().unwrap(), SessionDraft::completed(25));
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.phase, Phase::Break);
        assert_eq!(snapshot.remaining_seconds, 300);
        assert!(!snapshot.running);

        // The break does not count until resumed.
        wait(10_000).await;
        assert_eq!(handle.snapshot().remaining_seconds, 300);
        assert!(drafts.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_never_keeps_previous_tick() {
        let (handle, _drafts, _task) = spawn_controller();

        handle.start();
        wait(500).await;
        handle.reset();
        handle.start();
        wait(1_200).await;

        assert_eq!(handle.snapshot().remaining_seconds, 1_499);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_after_ninety_seconds_records_two_minutes() {
        let (handle, mut drafts, _task) = spawn_controller();

        handle.start();
        wait(90_500).await;
        handle.reset();
        wait(10).await;

        assert_eq!(drafts.try_recv().unwrap(), SessionDraft::interrupted(25, 2));
        assert_eq!(handle.snapshot().phase, Phase::Idle);
        assert_eq!(handle.snapshot().remaining_seconds, 1_500);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_returns_final_state() {
        let (handle, mut drafts, task) = spawn_controller();

        handle.start();
        wait(2_500).await;
        handle.quit();

        let state = task.await.unwrap();
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1_498);
        assert!(drafts.try_recv().is_err());
        assert!(!handle.start());
    }
}
