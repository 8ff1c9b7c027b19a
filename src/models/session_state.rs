use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a tutoring session.
///
/// ```text
/// NotStarted -> Ongoing -> BeingEvaluated -> Finished
///      \
///       -> Canceled (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "Ongoing")]
    Ongoing,
    #[serde(rename = "Being evaluated")]
    BeingEvaluated,
    #[serde(rename = "Finished")]
    Finished,
    #[serde(rename = "Canceled")]
    Canceled,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "Not started",
            SessionState::Ongoing => "Ongoing",
            SessionState::BeingEvaluated => "Being evaluated",
            SessionState::Finished => "Finished",
            SessionState::Canceled => "Canceled",
        }
    }

    /// Display order in session lists: running sessions first, dead ones last.
    pub fn rank(&self) -> u8 {
        match self {
            SessionState::Ongoing => 1,
            SessionState::NotStarted => 2,
            SessionState::BeingEvaluated => 3,
            SessionState::Finished => 4,
            SessionState::Canceled => 5,
        }
    }

    pub fn is_open_for_registration(&self) -> bool {
        matches!(self, SessionState::NotStarted | SessionState::Ongoing)
    }

    /// The only edges of the lifecycle.
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (SessionState::NotStarted, SessionState::Ongoing)
                | (SessionState::NotStarted, SessionState::Canceled)
                | (SessionState::Ongoing, SessionState::BeingEvaluated)
                | (SessionState::BeingEvaluated, SessionState::Finished)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
