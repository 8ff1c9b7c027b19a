//! Session views: "my sessions" and the registration catalogue.

use crate::models::session::Session;
use crate::models::user::User;

/// Sessions the user tutors or is enrolled in, in display order.
pub fn sessions_for(sessions: &[Session], user: &User) -> Vec<Session> {
    let mut out: Vec<Session> = sessions
        .iter()
        .filter(|s| s.involves(user.id))
        .cloned()
        .collect();
    sort_for_display(&mut out);
    out
}

/// Sessions the user could still join. `search` matches the course id or the
/// tutor's name (case-sensitive substring).
pub fn open_for_registration(sessions: &[Session], user: &User, search: Option<&str>) -> Vec<Session> {
    let search = search.map(str::trim).filter(|q| !q.is_empty());

    let mut out: Vec<Session> = sessions
        .iter()
        .filter(|s| s.state.is_open_for_registration())
        .filter(|s| !s.is_enrolled(user.id))
        .filter(|s| match search {
            Some(q) => s.course_id.contains(q) || s.tutor.contains(q),
            None => true,
        })
        .cloned()
        .collect();
    sort_for_display(&mut out);
    out
}

/// State rank first, then chronological.
pub fn sort_for_display(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| {
        a.state
            .rank()
            .cmp(&b.state.rank())
            .then_with(|| a.start_at().cmp(&b.start_at()))
    });
}
