use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::session_state::SessionState;
use super::user::UserId;
use crate::utils::date::format_date;
use crate::utils::time::format_time;

pub type SessionId = u32;

/// A student's registration inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "studentID")]
    pub student_id: UserId,
    #[serde(rename = "studentName")]
    pub student_name: String,
    /// Tutor's private note; only the annotate operation writes it.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub max_student: u32,
    pub course_name: String,
    #[serde(rename = "courseID")]
    pub course_id: String,
    #[serde(rename = "tutorID")]
    pub tutor_id: UserId,
    pub tutor: String,
    pub state: SessionState,
    #[serde(default)]
    pub students: Vec<Enrollment>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub has_reminder_sent: bool,
}

impl Session {
    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    pub fn is_enrolled(&self, student_id: UserId) -> bool {
        self.students.iter().any(|s| s.student_id == student_id)
    }

    pub fn is_full(&self) -> bool {
        self.students.len() >= self.max_student as usize
    }

    pub fn involves(&self, user_id: UserId) -> bool {
        self.tutor_id == user_id || self.is_enrolled(user_id)
    }

    /// Overwrites every editable field; identity, owner, state and roster stay.
    pub fn apply_fields(&mut self, fields: SessionFields) {
        self.title = fields.title;
        self.location = fields.location;
        self.description = fields.description;
        self.date = fields.date;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.max_student = fields.max_student;
    }

    pub fn time_range(&self) -> String {
        format!(
            "{}–{}",
            format_time(self.start_time),
            format_time(self.end_time)
        )
    }
}

/// Raw field values as typed by a tutor, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub max_student: String,
}

impl SessionDraft {
    /// Prefills an edit form with the session's current values.
    pub fn from_session(session: &Session) -> Self {
        Self {
            title: session.title.clone(),
            location: session.location.clone(),
            description: session.description.clone(),
            date: format_date(session.date),
            start_time: format_time(session.start_time),
            end_time: format_time(session.end_time),
            max_student: session.max_student.to_string(),
        }
    }
}

/// Partial edit request: `None` keeps the session's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_student: Option<String>,
}

impl SessionPatch {
    pub fn apply_to(self, draft: &mut SessionDraft) {
        let fields = [
            (self.title, &mut draft.title),
            (self.location, &mut draft.location),
            (self.description, &mut draft.description),
            (self.date, &mut draft.date),
            (self.start_time, &mut draft.start_time),
            (self.end_time, &mut draft.end_time),
            (self.max_student, &mut draft.max_student),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

/// Editable fields after a draft passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub title: String,
    pub location: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_student: u32,
}

/// `HH:MM` on the wire instead of chrono's default `HH:MM:SS`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        crate::utils::time::parse_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }
}
