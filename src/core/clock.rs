//! Wall-clock collaborator.
//!
//! The engine never reads the system time directly: everything that depends
//! on "now" takes it from a [`Clock`], so the shell can run against a pinned
//! time (`--now`) and tests can step time forward tick by tick.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::Mutex;

use crate::errors::{AppError, AppResult};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Manual clocks can be moved; the system clock refuses.
    fn set(&self, _now: NaiveDateTime) -> bool {
        false
    }

    /// Moves the clock by `minutes`. `Ok(false)` when the clock cannot move.
    fn advance(&self, minutes: i64) -> AppResult<bool> {
        let target = Duration::try_minutes(minutes)
            .and_then(|delta| self.now().checked_add_signed(delta))
            .ok_or_else(|| AppError::InvalidDateTime(format!("now {:+} minutes", minutes)))?;
        Ok(self.set(target))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set(&self, now: NaiveDateTime) -> bool {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
        true
    }
}
