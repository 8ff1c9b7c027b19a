#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::env;
use std::fs;
use std::path::PathBuf;

use rtutor::config::Course;
use rtutor::core::validation::Policy;
use rtutor::models::session::{Enrollment, Session, SessionDraft};
use rtutor::models::session_state::SessionState;
use rtutor::models::user::UserId;

pub const NOW: &str = "2024-07-01 08:00";

pub fn rtu() -> Command {
    cargo_bin_cmd!("rtutor")
}

/// Shell with a pinned clock, no background scheduler and no config file.
pub fn shell(script: &str) -> assert_cmd::assert::Assert {
    rtu()
        .args(["--test", "--tick-interval", "0", "--now", NOW, "shell"])
        .write_stdin(script)
        .assert()
}

/// Write a seed file inside the system temp dir, replacing any previous one.
pub fn write_seed(name: &str, ext: &str, contents: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtutor_seed.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    fs::write(&p, contents).expect("write seed file");
    p
}

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("test datetime")
}

pub fn now() -> NaiveDateTime {
    at(NOW)
}

pub fn policy() -> Policy {
    Policy::default()
}

pub fn course() -> Course {
    Course {
        name: "Software Engineering".to_string(),
        id: "CO3001".to_string(),
    }
}

/// A valid draft for tomorrow 10:00-11:00.
pub fn draft() -> SessionDraft {
    SessionDraft {
        title: "Algebra review".to_string(),
        location: "H1-201".to_string(),
        description: String::new(),
        date: "2024-07-02".to_string(),
        start_time: "10:00".to_string(),
        end_time: "11:00".to_string(),
        max_student: "5".to_string(),
    }
}

pub fn draft_at(date: &str, start: &str, end: &str) -> SessionDraft {
    SessionDraft {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        ..draft()
    }
}

/// A stored session, built directly (no validation).
pub fn session(id: u32, tutor_id: UserId, date: &str, start: &str, end: &str) -> Session {
    Session {
        id,
        title: format!("Session {}", id),
        location: "H6-101".to_string(),
        description: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test date"),
        start_time: NaiveTime::parse_from_str(start, "%H:%M").expect("test time"),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").expect("test time"),
        max_student: 3,
        course_name: "Software Engineering".to_string(),
        course_id: "CO3001".to_string(),
        tutor_id,
        tutor: format!("Tutor {}", tutor_id),
        state: SessionState::NotStarted,
        students: Vec::new(),
        reason: String::new(),
        has_reminder_sent: false,
    }
}

pub fn enroll(session: &mut Session, student_id: UserId) {
    session.students.push(Enrollment {
        student_id,
        student_name: format!("Student {}", student_id),
        description: String::new(),
    });
}
