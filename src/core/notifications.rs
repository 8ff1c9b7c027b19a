//! Append-only, per-recipient notification log.

use std::collections::BTreeMap;

use crate::models::notification::{Notification, NotificationDraft, NotificationId};
use crate::models::user::UserId;

#[derive(Debug, Clone)]
pub struct NotificationSink {
    by_user: BTreeMap<UserId, Vec<Notification>>,
    next_id: NotificationId,
}

impl Default for NotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink {
    pub fn new() -> Self {
        Self {
            by_user: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a sink from previously issued notifications; new ids continue
    /// after the highest one seen.
    pub fn from_existing(by_user: BTreeMap<UserId, Vec<Notification>>) -> Self {
        let max_id = by_user
            .values()
            .flatten()
            .map(|n| n.id)
            .max()
            .unwrap_or(0);
        Self {
            by_user,
            next_id: max_id + 1,
        }
    }

    /// Appends a notification for `recipient` and returns its id.
    pub fn push(&mut self, recipient: UserId, draft: NotificationDraft) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        self.by_user.entry(recipient).or_default().push(Notification {
            id,
            title: draft.title,
            description: draft.description,
            course_name: draft.course_name,
            course_id: draft.course_id,
            tutor: draft.tutor,
            date: draft.date,
            is_read: false,
        });

        tracing::debug!(recipient, notification_id = id, "notification appended");
        id
    }

    pub fn for_user(&self, user: UserId) -> &[Notification] {
        self.by_user.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unread_count(&self, user: UserId) -> usize {
        self.for_user(user).iter().filter(|n| !n.is_read).count()
    }

    pub fn total(&self) -> usize {
        self.by_user.values().map(Vec::len).sum()
    }

    pub fn snapshot(&self) -> BTreeMap<UserId, Vec<Notification>> {
        self.by_user.clone()
    }
}
