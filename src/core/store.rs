//! Session store: the authoritative in-memory collection of sessions.
//!
//! Every operation validates first and only then replaces the whole session
//! record, so a rejected call leaves the store exactly as it was.

use chrono::NaiveDateTime;

use crate::config::Course;
use crate::core::notifications::NotificationSink;
use crate::core::validation::{
    MutationKind, Policy, validate_cancellation, validate_session_mutation,
};
use crate::errors::{AppError, AppResult};
use crate::models::notification::NotificationDraft;
use crate::models::session::{Enrollment, Session, SessionDraft, SessionId};
use crate::models::session_state::SessionState;
use crate::models::user::{User, UserId};

/// Inputs every mutation needs besides its own arguments.
#[derive(Debug, Clone, Copy)]
pub struct MutationContext<'a> {
    pub now: NaiveDateTime,
    pub policy: &'a Policy,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Vec<Session>,
    next_id: SessionId,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store around already existing sessions (seed data).
    /// Ids of new sessions continue after the highest existing one.
    pub fn from_sessions(sessions: Vec<Session>) -> Self {
        let max_id = sessions.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            sessions,
            next_id: max_id + 1,
        }
    }

    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: SessionId) -> AppResult<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound(id))
    }

    fn position(&self, id: SessionId) -> AppResult<usize> {
        self.sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or(AppError::NotFound(id))
    }

    /// Swaps in the updated record and hands back a copy of it.
    fn replace(&mut self, idx: usize, updated: Session) -> Session {
        self.sessions[idx] = updated.clone();
        updated
    }

    pub(crate) fn sessions_mut(&mut self) -> &mut [Session] {
        &mut self.sessions
    }

    // ------------------------------------------------
    // Tutor operations
    // ------------------------------------------------

    pub fn create(
        &mut self,
        draft: &SessionDraft,
        tutor: &User,
        course: &Course,
        ctx: MutationContext<'_>,
    ) -> AppResult<Session> {
        if !tutor.is_tutor() {
            return Err(AppError::Forbidden("only tutors can create sessions".into()));
        }

        let fields = validate_session_mutation(
            draft,
            &self.sessions,
            MutationKind::Create,
            tutor.id,
            ctx.now,
            ctx.policy,
        )?;

        let session = Session {
            id: self.next_id,
            title: fields.title,
            location: fields.location,
            description: fields.description,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            max_student: fields.max_student,
            course_name: course.name.clone(),
            course_id: course.id.clone(),
            tutor_id: tutor.id,
            tutor: tutor.name.clone(),
            state: SessionState::NotStarted,
            students: Vec::new(),
            reason: String::new(),
            has_reminder_sent: false,
        };
        self.next_id += 1;
        self.sessions.push(session.clone());

        tracing::info!(session_id = session.id, tutor_id = tutor.id, "session created");
        Ok(session)
    }

    pub fn edit(
        &mut self,
        id: SessionId,
        draft: &SessionDraft,
        acting: &User,
        ctx: MutationContext<'_>,
        sink: &mut NotificationSink,
    ) -> AppResult<Session> {
        let idx = self.position(id)?;
        let current = &self.sessions[idx];
        ensure_owner(current, acting)?;
        ensure_state(current, SessionState::NotStarted, "edit")?;

        let fields = validate_session_mutation(
            draft,
            &self.sessions,
            MutationKind::Edit(id),
            acting.id,
            ctx.now,
            ctx.policy,
        )?;

        let enrolled = self.sessions[idx].students.len();
        if (fields.max_student as usize) < enrolled {
            return Err(AppError::Rejected(format!(
                "Number of student can not be lower than the {} students already registered.",
                enrolled
            )));
        }

        let mut updated = self.sessions[idx].clone();
        updated.apply_fields(fields);
        let updated = self.replace(idx, updated);

        for student in &updated.students {
            sink.push(
                student.student_id,
                NotificationDraft::about(
                    &updated,
                    "The tutor has edited the session.".to_string(),
                    ctx.now,
                ),
            );
        }

        tracing::info!(
            session_id = id,
            notified = updated.students.len(),
            "session edited"
        );
        Ok(updated)
    }

    pub fn cancel(
        &mut self,
        id: SessionId,
        reason: &str,
        acting: &User,
        ctx: MutationContext<'_>,
        sink: &mut NotificationSink,
    ) -> AppResult<Session> {
        let idx = self.position(id)?;
        let current = &self.sessions[idx];
        ensure_owner(current, acting)?;
        ensure_transition(current, SessionState::Canceled, "cancel")?;
        validate_cancellation(current, ctx.now, ctx.policy)?;

        let mut updated = current.clone();
        updated.state = SessionState::Canceled;
        updated.reason = reason.trim().to_string();
        let updated = self.replace(idx, updated);

        for student in &updated.students {
            sink.push(
                student.student_id,
                NotificationDraft::about(
                    &updated,
                    format!("The session has been canceled. Reason: {}", updated.reason),
                    ctx.now,
                ),
            );
        }

        tracing::info!(
            session_id = id,
            notified = updated.students.len(),
            "session canceled"
        );
        Ok(updated)
    }

    /// Moves an evaluated session to `Finished`. Any other state is refused.
    pub fn end_session(&mut self, id: SessionId, acting: &User) -> AppResult<Session> {
        let idx = self.position(id)?;
        let current = &self.sessions[idx];
        ensure_owner(current, acting)?;
        ensure_transition(current, SessionState::Finished, "end")?;

        let mut updated = current.clone();
        updated.state = SessionState::Finished;
        let updated = self.replace(idx, updated);

        tracing::info!(session_id = id, "session finished");
        Ok(updated)
    }

    /// Overwrites the tutor's private note of each listed student.
    /// All targets must be enrolled; otherwise nothing is written.
    pub fn annotate(
        &mut self,
        id: SessionId,
        notes: &[(UserId, String)],
        acting: &User,
    ) -> AppResult<Session> {
        let idx = self.position(id)?;
        let current = &self.sessions[idx];
        ensure_owner(current, acting)?;

        if let Some((student, _)) = notes.iter().find(|(sid, _)| !current.is_enrolled(*sid)) {
            return Err(AppError::NotEnrolled {
                id,
                student: *student,
            });
        }

        let mut updated = current.clone();
        for (student_id, note) in notes {
            if let Some(e) = updated
                .students
                .iter_mut()
                .find(|e| e.student_id == *student_id)
            {
                e.description = note.clone();
            }
        }
        let updated = self.replace(idx, updated);

        tracing::info!(session_id = id, notes = notes.len(), "session annotated");
        Ok(updated)
    }

    // ------------------------------------------------
    // Student operations
    // ------------------------------------------------

    pub fn register(&mut self, id: SessionId, student: &User) -> AppResult<Session> {
        if !student.is_student() {
            return Err(AppError::Forbidden(
                "only students can register for sessions".into(),
            ));
        }

        let idx = self.position(id)?;
        let current = &self.sessions[idx];

        if !current.state.is_open_for_registration() {
            return Err(AppError::NotOpenForRegistration {
                id,
                state: current.state,
            });
        }
        if current.is_enrolled(student.id) {
            return Err(AppError::AlreadyRegistered {
                id,
                student: student.id,
            });
        }
        if current.is_full() {
            return Err(AppError::CapacityExceeded {
                id,
                max: current.max_student,
            });
        }

        let mut updated = current.clone();
        updated.students.push(Enrollment {
            student_id: student.id,
            student_name: student.name.clone(),
            description: String::new(),
        });
        let updated = self.replace(idx, updated);

        tracing::info!(session_id = id, student_id = student.id, "student registered");
        Ok(updated)
    }
}

fn ensure_owner(session: &Session, acting: &User) -> AppResult<()> {
    if acting.is_tutor() && session.tutor_id == acting.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "session {} belongs to another tutor",
            session.id
        )))
    }
}

fn ensure_state(session: &Session, expected: SessionState, action: &'static str) -> AppResult<()> {
    if session.state == expected {
        Ok(())
    } else {
        Err(AppError::InvalidTransition {
            id: session.id,
            state: session.state,
            action,
        })
    }
}

fn ensure_transition(
    session: &Session,
    next: SessionState,
    action: &'static str,
) -> AppResult<()> {
    if session.state.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition {
            id: session.id,
            state: session.state,
            action,
        })
    }
}
