//! Interactive Pomodoro timer in the terminal.
//!
//! Commands are read line by line from stdin: `s` start, `p` pause/resume,
//! `c` continue, `r` reset, `q` quit. Finished and interrupted runs are
//! written in the background; their outcome is printed when it arrives.

use crate::{
    db::focus_sessions::FocusSessions,
    libs::{
        config::Config,
        controller::{ControllerHandle, FocusController},
        error::StoreError,
        formatter::format_snapshot,
        identity::Identity,
        messages::Message,
        outbox::{DispatchReport, Dispatcher},
        timer::TimerState,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

pub async fn cmd() -> Result<()> {
    let user_id = Identity::new().current()?;
    let focus = Config::read()?.focus();
    let store = Arc::new(Mutex::new(FocusSessions::new()?));

    let (draft_tx, draft_rx) = mpsc::unbounded_channel();
    let (report_tx, report_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(store.clone(), user_id.clone(), focus.dispatch_policy());
    let dispatch_task = tokio::spawn(dispatcher.run(draft_rx, report_tx));

    let (controller, handle) = FocusController::new(focus.durations(), focus.tick_period(), draft_tx);
    let controller_task = tokio::spawn(controller.run());
    let render_task = tokio::spawn(render(handle.clone()));

    msg_print!(Message::FocusHelp);

    let input = BufReader::new(tokio::io::stdin());
    let result = drive(input, handle, controller_task, dispatch_task, report_rx).await;
    render_task.abort();
    result?;

    let stats = store.lock().stats(&user_id, Local::now().naive_local())?;
    println!();
    View::focus_stats(&stats)?;
    Ok(())
}

/// Feeds `input` to the controller until the user quits or input ends or fails.
///
/// The controller is told to quit on every path, and the dispatcher is
/// drained before a read error is returned.
async fn drive<R>(
    input: R,
    handle: ControllerHandle,
    controller_task: JoinHandle<TimerState>,
    dispatch_task: JoinHandle<()>,
    mut report_rx: UnboundedReceiver<DispatchReport>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let read_result = loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !dispatch_command(&handle, line.trim()) {
                        break Ok(());
                    }
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            },
            Some(report) = report_rx.recv() => print_report(&report),
        }
    };

    handle.quit();
    controller_task.await?;
    dispatch_task.await?;
    while let Some(report) = report_rx.recv().await {
        print_report(&report);
    }

    read_result?;
    Ok(())
}

/// Returns `false` once the user asked to quit.
fn dispatch_command(handle: &ControllerHandle, input: &str) -> bool {
    match input {
        "q" | "quit" => {
            handle.quit();
            return false;
        }
        "s" | "start" => {
            handle.start();
        }
        "p" | "pause" => {
            handle.pause();
        }
        "c" | "resume" => {
            handle.resume();
        }
        "r" | "reset" => {
            handle.reset();
        }
        "h" | "help" | "?" => msg_print!(Message::FocusHelp),
        "" => {}
        other => msg_warning!(Message::FocusUnknownCommand(other.to_string())),
    }
    true
}

async fn render(handle: ControllerHandle) {
    let mut snapshots = handle.subscribe();
    drop(handle);
    while snapshots.changed().await.is_ok() {
        let snapshot = *snapshots.borrow_and_update();
        print!("\r{:<32}", format_snapshot(&snapshot));
        let _ = std::io::stdout().flush();
    }
}

fn print_report(report: &DispatchReport) {
    println!();
    match report {
        DispatchReport::Saved(session) if session.completed => {
            msg_success!(Message::FocusRunCompleted(session.completed_duration));
        }
        DispatchReport::Saved(session) => {
            msg_info!(Message::FocusRunPartial(session.completed_duration));
        }
        DispatchReport::Failed {
            error: StoreError::Auth, ..
        } => msg_error!(Message::SessionExpired),
        DispatchReport::Failed { attempts, error, .. } => {
            msg_warning!(Message::SessionNotSaved(*attempts, error.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::Db;
    use crate::db::users::{UpsertUser, Users};
    use crate::libs::outbox::DispatchPolicy;
    use crate::libs::timer::TimerDurations;
    use crate::libs::focus_session::SessionStore;
    use std::future::Future;
    use std::io;
    use std::pin::Pin;
    use std::task::{ready, Context, Poll};
    use std::time::Duration;
    use tokio::io::{AsyncRead, ReadBuf};
    use tokio::time::Sleep;

    /// Input that fails once `delay` has passed.
    struct FailingInput(Pin<Box<Sleep>>);

    impl FailingInput {
        fn after(delay: Duration) -> Self {
            Self(Box::pin(tokio::time::sleep(delay)))
        }
    }

    impl AsyncRead for FailingInput {
        fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
            ready!(self.0.as_mut().poll(cx));
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed")))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn read_error_stops_the_timer_and_keeps_finished_runs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lifeos.db");
        Users::open(Db::open(&path).unwrap())
            .upsert(&UpsertUser {
                id: "ada".to_string(),
                ..Default::default()
            })
            .unwrap();
        let store = Arc::new(Mutex::new(FocusSessions::open(Db::open(&path).unwrap())));

        let (draft_tx, draft_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let policy = DispatchPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(10),
        };
        let dispatch_task = tokio::spawn(Dispatcher::new(store.clone(), "ada", policy).run(draft_rx, report_tx));
        let (controller, handle) = FocusController::new(TimerDurations::new(1, 1), Duration::from_secs(1), draft_tx);
        let controller_task = tokio::spawn(controller.run());
        let observer = handle.clone();

        handle.start();
        let input = BufReader::new(FailingInput::after(Duration::from_millis(60_500)));
        let result = drive(input, handle, controller_task, dispatch_task, report_rx).await;

        let error = result.unwrap_err();
        assert_eq!(
            error.downcast_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::BrokenPipe)
        );
        assert!(!observer.start());
        let stored = store.lock().list_by_user("ada").unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].completed);
    }
}
