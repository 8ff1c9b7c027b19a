//! Validation engine: pure gates run before a session is created, edited or
//! canceled. Nothing here mutates state; a failed rule yields
//! `AppError::Rejected` with the message shown to the tutor.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::errors::{AppError, AppResult};
use crate::models::session::{Session, SessionDraft, SessionFields, SessionId};
use crate::models::session_state::SessionState;
use crate::models::user::UserId;
use crate::utils::date::parse_date;
use crate::utils::time::{describe_minutes, format_time, intervals_overlap, minutes_of, to_minutes};

/// Temporal thresholds applied by the validators and the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub min_duration_minutes: i64,
    pub earliest_start: NaiveTime,
    pub min_notice_minutes: i64,
    pub cancel_notice_minutes: i64,
    pub reminder_lead_minutes: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_duration_minutes: 60,
            earliest_start: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or(NaiveTime::MIN),
            min_notice_minutes: 120,
            cancel_notice_minutes: 120,
            reminder_lead_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Edit(SessionId),
}

impl MutationKind {
    fn edited_id(&self) -> Option<SessionId> {
        match self {
            MutationKind::Create => None,
            MutationKind::Edit(id) => Some(*id),
        }
    }
}

fn reject<T>(msg: impl Into<String>) -> AppResult<T> {
    Err(AppError::Rejected(msg.into()))
}

/// Checks a create/edit draft against the current sessions.
///
/// Rules run in a fixed order and stop at the first failure, so the message
/// surfaced for a draft with several problems is always the same one:
///
/// 1. title, location and capacity are filled
/// 2. start precedes end
/// 3. minimum duration
/// 4. earliest start of day
/// 5. minimum notice when the date is today
/// 6. date not in the past
/// 7. no overlap with the tutor's other live sessions that day
///
/// On success the parsed fields are returned, ready for the store.
pub fn validate_session_mutation(
    draft: &SessionDraft,
    existing: &[Session],
    kind: MutationKind,
    acting_tutor: UserId,
    now: NaiveDateTime,
    policy: &Policy,
) -> AppResult<SessionFields> {
    // 1. Compulsory fields
    if draft.title.trim().is_empty() {
        return reject("Title must be filled.");
    }
    if draft.location.trim().is_empty() {
        return reject("Location must be filled.");
    }
    let max_student = parse_capacity(&draft.max_student)?;

    // 2-4. Time of day
    let start_min = to_minutes(&draft.start_time)?;
    let end_min = to_minutes(&draft.end_time)?;

    if start_min >= end_min {
        return reject("Start time must be earlier than end time.");
    }
    if end_min - start_min < policy.min_duration_minutes {
        return reject(format!(
            "Session duration must be at least {}.",
            describe_minutes(policy.min_duration_minutes)
        ));
    }
    if start_min < minutes_of(policy.earliest_start) {
        return reject(format!(
            "Session can not start before {}.",
            format_time(policy.earliest_start)
        ));
    }

    // 5-6. Calendar date
    let date = parse_date(&draft.date).ok_or_else(|| AppError::InvalidDate(draft.date.clone()))?;
    let start_time = clock_time(start_min);
    let end_time = clock_time(end_min);
    let today = now.date();

    if date == today && date.and_time(start_time) < now + Duration::minutes(policy.min_notice_minutes)
    {
        let notice = describe_minutes(policy.min_notice_minutes);
        return reject(match kind {
            MutationKind::Create => format!("A new session must start at least {} from now.", notice),
            MutationKind::Edit(_) => {
                format!("An edited session must start at least {} from now.", notice)
            }
        });
    }
    if date < today {
        return reject("The selected date is in the past.");
    }

    // 7. Overlap with the tutor's other sessions
    let edited = kind.edited_id();
    let conflict = existing
        .iter()
        .filter(|s| s.tutor_id == acting_tutor)
        .filter(|s| Some(s.id) != edited && s.state != SessionState::Canceled)
        .filter(|s| s.date == date)
        .find(|s| {
            intervals_overlap(
                start_min,
                end_min,
                minutes_of(s.start_time),
                minutes_of(s.end_time),
            )
        });

    if let Some(s) = conflict {
        return reject(format!(
            "This session overlaps with another session: \"{}\" ({}).",
            s.title,
            s.time_range()
        ));
    }

    Ok(SessionFields {
        title: draft.title.trim().to_string(),
        location: draft.location.trim().to_string(),
        description: draft.description.clone(),
        date,
        start_time,
        end_time,
        max_student,
    })
}

/// Checks whether a session may still be canceled at `now`.
///
/// Sessions on another day can always be canceled; on the day itself the
/// start must be at least the cancellation notice away (minute precision).
pub fn validate_cancellation(
    session: &Session,
    now: NaiveDateTime,
    policy: &Policy,
) -> AppResult<()> {
    if session.date != now.date() {
        return Ok(());
    }

    let start_min = minutes_of(session.start_time);
    let current_min = minutes_of(now.time());

    if start_min - current_min < policy.cancel_notice_minutes {
        return reject(format!(
            "Session starts in less than {}. Cannot cancel.",
            describe_minutes(policy.cancel_notice_minutes)
        ));
    }
    Ok(())
}

fn parse_capacity(raw: &str) -> AppResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return reject("Number of student must be filled.");
    }
    match raw.parse::<u32>() {
        Ok(0) => reject("Number of student must be filled."),
        Ok(n) => Ok(n),
        Err(_) => reject("Number of student must be a positive integer."),
    }
}

fn clock_time(minutes: i64) -> NaiveTime {
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0).unwrap_or(NaiveTime::MIN)
}
