//! The shared session collection.
//!
//! The shell thread and the scheduler thread both reach the store and the
//! notification sink through one mutex; each store operation and each
//! scheduler tick holds it for its whole read-modify-write, so no one ever
//! observes a half-applied change.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::notifications::NotificationSink;
use crate::core::store::SessionStore;

#[derive(Debug, Default, Clone)]
pub struct Workspace {
    pub sessions: SessionStore,
    pub notifications: NotificationSink,
}

impl Workspace {
    pub fn new(sessions: SessionStore, notifications: NotificationSink) -> Self {
        Self {
            sessions,
            notifications,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedWorkspace {
    inner: Arc<Mutex<Workspace>>,
}

impl SharedWorkspace {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            inner: Arc::new(Mutex::new(workspace)),
        }
    }

    /// Runs `f` as one atomic unit against the workspace.
    pub fn with<T>(&self, f: impl FnOnce(&mut Workspace) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }

    fn lock(&self) -> MutexGuard<'_, Workspace> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Operations validate before writing, so the inner state is whole.
                tracing::warn!("workspace mutex poisoned; recovering inner state");
                poisoned.into_inner()
            }
        }
    }
}
