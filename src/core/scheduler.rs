//! Lifecycle scheduler.
//!
//! A tick runs three passes over every session, always in this order:
//!
//! 1. reminders: `Not started` sessions starting within the reminder lead get
//!    one notification for the tutor and each enrolled student, then
//!    `has_reminder_sent` is set so later ticks skip them;
//! 2. start: `Not started` sessions whose start has passed become `Ongoing`;
//! 3. end: `Ongoing` sessions whose end has passed become `Being evaluated`.
//!
//! A session can be reminded and started in the same tick. A session started
//! by this tick is left `Ongoing` until the next one, even if its end time has
//! already passed.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};

use crate::core::clock::Clock;
use crate::core::notifications::NotificationSink;
use crate::core::store::SessionStore;
use crate::core::validation::Policy;
use crate::core::workspace::SharedWorkspace;
use crate::errors::AppResult;
use crate::models::notification::NotificationDraft;
use crate::models::session::SessionId;
use crate::models::session_state::SessionState;
use crate::utils::time::describe_minutes;

/// What a single tick changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub reminded: Vec<SessionId>,
    pub started: Vec<SessionId>,
    pub ended: Vec<SessionId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.reminded.is_empty() && self.started.is_empty() && self.ended.is_empty()
    }
}

pub fn tick(
    store: &mut SessionStore,
    sink: &mut NotificationSink,
    now: NaiveDateTime,
    policy: &Policy,
) -> TickReport {
    let mut report = TickReport::default();
    let lead = Duration::minutes(policy.reminder_lead_minutes);
    let reminder_text = format!(
        "Your session starts in {}.",
        describe_minutes(policy.reminder_lead_minutes)
    );

    // 1. Reminder pass
    for session in store.sessions_mut() {
        if session.state != SessionState::NotStarted || session.has_reminder_sent {
            continue;
        }
        if session.start_at() - now <= lead {
            sink.push(
                session.tutor_id,
                NotificationDraft::about(session, reminder_text.clone(), now),
            );
            for student in &session.students {
                sink.push(
                    student.student_id,
                    NotificationDraft::about(session, reminder_text.clone(), now),
                );
            }
            session.has_reminder_sent = true;
            report.reminded.push(session.id);
        }
    }

    // 2. Start pass
    for session in store.sessions_mut() {
        if session.state == SessionState::NotStarted && session.start_at() <= now {
            session.state = SessionState::Ongoing;
            report.started.push(session.id);
        }
    }

    // 3. End pass
    let started: HashSet<SessionId> = report.started.iter().copied().collect();
    for session in store.sessions_mut() {
        if started.contains(&session.id) {
            continue;
        }
        if session.state == SessionState::Ongoing && session.end_at() <= now {
            session.state = SessionState::BeingEvaluated;
            report.ended.push(session.id);
        }
    }

    if report.is_empty() {
        tracing::debug!(%now, "scheduler tick: nothing to do");
    } else {
        tracing::info!(
            %now,
            reminded = ?report.reminded,
            started = ?report.started,
            ended = ?report.ended,
            "scheduler tick"
        );
    }
    report
}

/// One tick against the shared workspace, under a single lock.
pub fn run_tick(workspace: &SharedWorkspace, clock: &dyn Clock, policy: &Policy) -> TickReport {
    let now = clock.now();
    workspace.with(|ws| tick(&mut ws.sessions, &mut ws.notifications, now, policy))
}

/// Handle on the background scheduler thread. Dropping it stops the thread.
pub struct SchedulerHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("scheduler thread panicked");
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Starts the periodic scheduler on a dedicated thread.
pub fn spawn(
    workspace: SharedWorkspace,
    clock: Arc<dyn Clock>,
    policy: Policy,
    interval: std::time::Duration,
) -> AppResult<SchedulerHandle> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let thread = thread::Builder::new()
        .name("rtutor-scheduler".to_string())
        .spawn(move || {
            tracing::info!(interval_secs = interval.as_secs(), "scheduler started");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        run_tick(&workspace, clock.as_ref(), &policy);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::info!("scheduler stopped");
        })?;

    Ok(SchedulerHandle {
        stop: Some(stop_tx),
        thread: Some(thread),
    })
}
