//! Entry point for callers (the shell, tests): binds the shared workspace to
//! the clock, the policy and the course catalogue. Every method takes the
//! workspace lock exactly once.

use std::sync::Arc;

use crate::config::Course;
use crate::core::clock::Clock;
use crate::core::listing;
use crate::core::scheduler::{self, SchedulerHandle, TickReport};
use crate::core::seed::SeedData;
use crate::core::store::MutationContext;
use crate::core::validation::Policy;
use crate::core::workspace::SharedWorkspace;
use crate::errors::AppResult;
use crate::models::notification::Notification;
use crate::models::session::{Session, SessionDraft, SessionId, SessionPatch};
use crate::models::user::{User, UserId};

#[derive(Clone)]
pub struct TutoringService {
    workspace: SharedWorkspace,
    clock: Arc<dyn Clock>,
    policy: Policy,
    course: Course,
}

impl TutoringService {
    pub fn new(
        workspace: SharedWorkspace,
        clock: Arc<dyn Clock>,
        policy: Policy,
        course: Course,
    ) -> Self {
        Self {
            workspace,
            clock,
            policy,
            course,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn create(&self, draft: &SessionDraft, tutor: &User) -> AppResult<Session> {
        let now = self.clock.now();
        self.workspace.with(|ws| {
            ws.sessions.create(
                draft,
                tutor,
                &self.course,
                MutationContext {
                    now,
                    policy: &self.policy,
                },
            )
        })
    }

    /// Edits a session; fields left out of `patch` keep their current value.
    pub fn edit(&self, id: SessionId, patch: SessionPatch, acting: &User) -> AppResult<Session> {
        let now = self.clock.now();
        self.workspace.with(|ws| {
            let mut draft = SessionDraft::from_session(ws.sessions.get(id)?);
            patch.apply_to(&mut draft);
            ws.sessions.edit(
                id,
                &draft,
                acting,
                MutationContext {
                    now,
                    policy: &self.policy,
                },
                &mut ws.notifications,
            )
        })
    }

    pub fn cancel(&self, id: SessionId, reason: &str, acting: &User) -> AppResult<Session> {
        let now = self.clock.now();
        self.workspace.with(|ws| {
            ws.sessions.cancel(
                id,
                reason,
                acting,
                MutationContext {
                    now,
                    policy: &self.policy,
                },
                &mut ws.notifications,
            )
        })
    }

    pub fn register(&self, id: SessionId, student: &User) -> AppResult<Session> {
        self.workspace.with(|ws| ws.sessions.register(id, student))
    }

    pub fn end_session(&self, id: SessionId, acting: &User) -> AppResult<Session> {
        self.workspace.with(|ws| ws.sessions.end_session(id, acting))
    }

    pub fn annotate(
        &self,
        id: SessionId,
        notes: &[(UserId, String)],
        acting: &User,
    ) -> AppResult<Session> {
        self.workspace.with(|ws| ws.sessions.annotate(id, notes, acting))
    }

    pub fn session(&self, id: SessionId) -> AppResult<Session> {
        self.workspace.with(|ws| ws.sessions.get(id).cloned())
    }

    pub fn sessions_for(&self, user: &User) -> Vec<Session> {
        self.workspace
            .with(|ws| listing::sessions_for(ws.sessions.all(), user))
    }

    pub fn all_sessions(&self) -> Vec<Session> {
        self.workspace.with(|ws| {
            let mut all = ws.sessions.all().to_vec();
            listing::sort_for_display(&mut all);
            all
        })
    }

    pub fn open_for_registration(&self, user: &User, search: Option<&str>) -> Vec<Session> {
        self.workspace
            .with(|ws| listing::open_for_registration(ws.sessions.all(), user, search))
    }

    pub fn notifications_for(&self, user: UserId) -> Vec<Notification> {
        self.workspace
            .with(|ws| ws.notifications.for_user(user).to_vec())
    }

    /// Current state in seed-file form.
    pub fn snapshot(&self) -> SeedData {
        self.workspace.with(|ws| SeedData {
            sessions: ws.sessions.all().to_vec(),
            notifications: ws.notifications.snapshot(),
        })
    }

    pub fn tick(&self) -> TickReport {
        scheduler::run_tick(&self.workspace, self.clock.as_ref(), &self.policy)
    }

    pub fn spawn_scheduler(&self, interval: std::time::Duration) -> AppResult<SchedulerHandle> {
        scheduler::spawn(
            self.workspace.clone(),
            Arc::clone(&self.clock),
            self.policy.clone(),
            interval,
        )
    }
}
