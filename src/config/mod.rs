use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::validation::Policy;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;

/// Upper bound for every minute threshold in the policy (one day).
const MAX_POLICY_MINUTES: i64 = 1440;

/// Course stamped on every new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial sessions/notifications (JSON or YAML). None = start empty.
    pub seed_file: Option<String>,
    /// Seconds between scheduler ticks; 0 disables the background scheduler.
    pub tick_interval_secs: u64,
    pub reminder_lead_minutes: i64,
    pub min_duration_minutes: i64,
    pub earliest_start: String,
    pub min_notice_minutes: i64,
    pub cancel_notice_minutes: i64,
    pub course_name: String,
    pub course_id: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_file: None,
            tick_interval_secs: 60,
            reminder_lead_minutes: 60,
            min_duration_minutes: 60,
            earliest_start: "05:00".to_string(),
            min_notice_minutes: 120,
            cancel_notice_minutes: 120,
            course_name: "Software Engineering".to_string(),
            course_id: "CO3001".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtutor")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtutor")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtutor.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.check()?;
        Ok(cfg)
    }

    /// Rejects values the engine cannot run with.
    pub fn check(&self) -> AppResult<()> {
        if parse_time(&self.earliest_start).is_none() {
            return Err(AppError::Config(format!(
                "earliest_start must be HH:MM, got '{}'",
                self.earliest_start
            )));
        }
        for (name, value) in [
            ("reminder_lead_minutes", self.reminder_lead_minutes),
            ("min_duration_minutes", self.min_duration_minutes),
            ("min_notice_minutes", self.min_notice_minutes),
            ("cancel_notice_minutes", self.cancel_notice_minutes),
        ] {
            if !(0..=MAX_POLICY_MINUTES).contains(&value) {
                return Err(AppError::Config(format!(
                    "{} must be between 0 and {}, got {}",
                    name, MAX_POLICY_MINUTES, value
                )));
            }
        }
        Ok(())
    }

    pub fn policy(&self) -> AppResult<Policy> {
        self.check()?;
        let earliest = parse_time(&self.earliest_start)
            .ok_or_else(|| AppError::InvalidTime(self.earliest_start.clone()))?;
        Ok(Policy {
            min_duration_minutes: self.min_duration_minutes,
            earliest_start: earliest,
            min_notice_minutes: self.min_notice_minutes,
            cancel_notice_minutes: self.cancel_notice_minutes,
            reminder_lead_minutes: self.reminder_lead_minutes,
        })
    }

    pub fn course(&self) -> Course {
        Course {
            name: self.course_name.clone(),
            id: self.course_id.clone(),
        }
    }

    /// Write the default configuration file, keeping an existing one untouched.
    pub fn init_all(is_test: bool) -> AppResult<PathBuf> {
        let path = Self::config_file();
        if is_test {
            return Ok(path);
        }

        fs::create_dir_all(Self::config_dir())?;
        if !path.exists() {
            let yaml = serde_yaml::to_string(&Config::default())?;
            let mut file = fs::File::create(&path)?;
            file.write_all(yaml.as_bytes())?;
        }
        Ok(path)
    }
}
