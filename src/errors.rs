//! Unified application error type.
//! Every layer (store, validation, scheduler, cli) returns AppError so the
//! shell can surface a single human-readable message and keep going.

use std::io;
use thiserror::Error;

use crate::models::session::SessionId;
use crate::models::session_state::SessionState;
use crate::models::user::UserId;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid date/time format: {0}")]
    InvalidDateTime(String),

    // ---------------------------
    // Validation and lifecycle
    // ---------------------------
    /// A mutation failed one of the validation rules; the reason is shown to the user as is.
    #[error("{0}")]
    Rejected(String),

    #[error("Session {0} not found")]
    NotFound(SessionId),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Session {id} is full ({max} students)")]
    CapacityExceeded { id: SessionId, max: u32 },

    #[error("Student {student} is already registered for session {id}")]
    AlreadyRegistered { id: SessionId, student: UserId },

    #[error("Session {id} is not open for registration (state: {state})")]
    NotOpenForRegistration { id: SessionId, state: SessionState },

    #[error("Student {student} is not enrolled in session {id}")]
    NotEnrolled { id: SessionId, student: UserId },

    #[error("Cannot {action} session {id} while it is '{state}'")]
    InvalidTransition {
        id: SessionId,
        state: SessionState,
        action: &'static str,
    },

    // ---------------------------
    // Seed / config errors
    // ---------------------------
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
