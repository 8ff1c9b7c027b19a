//! Initial data for a run.
//!
//! Nothing is persisted, so a run starts either empty or from an explicit
//! seed file named in the configuration (`seed_file`) or with `--seed`.
//! Files ending in `.json` are read as JSON, anything else as YAML.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::core::notifications::NotificationSink;
use crate::core::store::SessionStore;
use crate::core::validation::Policy;
use crate::core::workspace::Workspace;
use crate::errors::{AppError, AppResult};
use crate::models::notification::Notification;
use crate::models::session::Session;
use crate::models::session_state::SessionState;
use crate::models::user::UserId;
use crate::utils::time::minutes_of;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub notifications: BTreeMap<UserId, Vec<Notification>>,
}

impl SeedData {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let seed: SeedData = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            sessions = seed.sessions.len(),
            "seed file parsed"
        );
        Ok(seed)
    }

    /// Structural invariants every stored session must hold. Temporal rules
    /// (notice, past dates) are not applied: seeds describe history too.
    pub fn check(&self, policy: &Policy) -> AppResult<()> {
        let mut ids = HashSet::new();

        for s in &self.sessions {
            let bad = |msg: String| Err(AppError::InvalidSeed(format!("session {}: {}", s.id, msg)));

            if !ids.insert(s.id) {
                return bad("duplicate id".into());
            }
            let (start, end) = (minutes_of(s.start_time), minutes_of(s.end_time));
            if start >= end {
                return bad("start time must be earlier than end time".into());
            }
            if end - start < policy.min_duration_minutes {
                return bad(format!(
                    "shorter than {} minutes",
                    policy.min_duration_minutes
                ));
            }
            if s.max_student == 0 {
                return bad("maxStudent must be positive".into());
            }
            if s.students.len() > s.max_student as usize {
                return bad(format!(
                    "{} students enrolled, capacity is {}",
                    s.students.len(),
                    s.max_student
                ));
            }
            let mut enrolled = HashSet::new();
            if let Some(dup) = s.students.iter().find(|e| !enrolled.insert(e.student_id)) {
                return bad(format!("student {} enrolled twice", dup.student_id));
            }
            if s.state != SessionState::Canceled && !s.reason.is_empty() {
                return bad("reason is only allowed on canceled sessions".into());
            }
        }
        Ok(())
    }

    pub fn into_workspace(self) -> Workspace {
        Workspace::new(
            SessionStore::from_sessions(self.sessions),
            NotificationSink::from_existing(self.notifications),
        )
    }
}
