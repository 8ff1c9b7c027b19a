use serde::{Deserialize, Serialize};
use std::fmt;

pub type UserId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tutor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tutor => "tutor",
            Role::Student => "student",
        }
    }

    /// Helper: convert input code from CLI ("tutor", "T", "student", "s", ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "tutor" | "t" => Some(Role::Tutor),
            "student" | "s" => Some(Role::Student),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The acting identity handed over by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn tutor(id: UserId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            role: Role::Tutor,
        }
    }

    pub fn student(id: UserId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            role: Role::Student,
        }
    }

    pub fn is_tutor(&self) -> bool {
        self.role == Role::Tutor
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
