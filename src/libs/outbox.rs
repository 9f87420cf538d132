//! Outbox between the timer and the session store.
//!
//! Timer transitions only produce [`SessionDraft`] values. They are queued
//! here and written by a [`Dispatcher`], which retries transient database
//! failures and reports every outcome. A slow or failing store therefore
//! never holds up the timer itself.

use crate::libs::error::StoreError;
use crate::libs::focus_session::{FocusSession, SessionDraft, SessionStore};
use crate::libs::messages::Message;
use crate::msg_debug;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// FIFO of drafts waiting to be written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outbox {
    pending: VecDeque<SessionDraft>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, draft: SessionDraft) {
        self.pending.push_back(draft);
    }

    pub fn extend(&mut self, drafts: impl IntoIterator<Item = SessionDraft>) {
        self.pending.extend(drafts);
    }

    /// Removes and returns everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<SessionDraft> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// How hard the dispatcher tries before giving up on a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Total write attempts per draft, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Outcome of delivering one draft.
#[derive(Debug)]
pub enum DispatchReport {
    Saved(FocusSession),
    Failed {
        draft: SessionDraft,
        attempts: u32,
        error: StoreError,
    },
}

impl DispatchReport {
    pub fn is_saved(&self) -> bool {
        matches!(self, DispatchReport::Saved(_))
    }
}

/// Writes drafts to a shared [`SessionStore`] on behalf of one user.
pub struct Dispatcher<S> {
    store: Arc<Mutex<S>>,
    user_id: String,
    policy: DispatchPolicy,
}

impl<S: SessionStore> Dispatcher<S> {
    pub fn new(store: Arc<Mutex<S>>, user_id: impl Into<String>, policy: DispatchPolicy) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            policy,
        }
    }

    /// Writes one draft, retrying only failures that may be transient.
    ///
    /// Auth and validation errors are reported after the first attempt.
    pub async fn deliver(&self, draft: SessionDraft) -> DispatchReport {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let result = self.store.lock().create(&self.user_id, &draft);

            match result {
                Ok(session) => {
                    msg_debug!(Message::SessionRecorded(session.id, session.completed_duration));
                    return DispatchReport::Saved(session);
                }
                Err(error) if error.is_retryable() && attempts < max_attempts => {
                    msg_debug!(Message::SessionRecordRetry(attempts, error.to_string()));
                    tokio::time::sleep(self.policy.backoff).await;
                }
                Err(error) => return DispatchReport::Failed { draft, attempts, error },
            }
        }
    }

    /// Delivers everything currently queued in `outbox`, in order.
    pub async fn flush(&self, outbox: &mut Outbox) -> Vec<DispatchReport> {
        let mut reports = Vec::with_capacity(outbox.len());
        for draft in outbox.drain() {
            reports.push(self.deliver(draft).await);
        }
        reports
    }

    /// Consumes drafts until the sending side closes.
    ///
    /// Reports are forwarded to `reports`; a closed report channel is not an
    /// error, the writes still happen.
    pub async fn run(self, mut drafts: UnboundedReceiver<SessionDraft>, reports: UnboundedSender<DispatchReport>) {
        while let Some(draft) = drafts.recv().await {
            let report = self.deliver(draft).await;
            let _ = reports.send(report);
        }
    }
}
