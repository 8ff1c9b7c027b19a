use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::session::Session;

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub description: String,
    pub course_name: String,
    #[serde(rename = "courseID")]
    pub course_id: String,
    pub tutor: String,
    /// Generation timestamp.
    pub date: NaiveDateTime,
    #[serde(default)]
    pub is_read: bool,
}

/// Notification body before the sink stamps an id on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub title: String,
    pub description: String,
    pub course_name: String,
    pub course_id: String,
    pub tutor: String,
    pub date: NaiveDateTime,
}

impl NotificationDraft {
    pub fn about(session: &Session, description: String, now: NaiveDateTime) -> Self {
        Self {
            title: session.title.clone(),
            description,
            course_name: session.course_name.clone(),
            course_id: session.course_id.clone(),
            tutor: session.tutor.clone(),
            date: now,
        }
    }
}
