use std::path::Path;

use rtutor::config::Config;
use rtutor::errors::AppError;

mod common;
use common::write_seed;

#[test]
fn test_missing_file_gives_defaults() {
    let cfg = Config::load_from(Path::new("/nonexistent/rtutor.conf")).expect("defaults");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.policy().expect("policy").reminder_lead_minutes, 60);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let path = write_seed("config_partial", "conf", "reminder_lead_minutes: 30\n");
    let cfg = Config::load_from(Path::new(&path)).expect("load");
    assert_eq!(cfg.reminder_lead_minutes, 30);
    assert_eq!(cfg.min_notice_minutes, 120);
    assert_eq!(cfg.course_id, "CO3001");
}

#[test]
fn test_minute_thresholds_are_bounded() {
    let path = write_seed(
        "config_huge_lead",
        "conf",
        "reminder_lead_minutes: 9223372036854775807\n",
    );
    assert!(matches!(
        Config::load_from(Path::new(&path)),
        Err(AppError::Config(msg)) if msg.contains("reminder_lead_minutes")
    ));

    let cfg = Config {
        cancel_notice_minutes: -1,
        ..Config::default()
    };
    assert!(matches!(cfg.policy(), Err(AppError::Config(_))));

    let cfg = Config {
        min_notice_minutes: 1440,
        ..Config::default()
    };
    assert!(cfg.policy().is_ok());
}

#[test]
fn test_earliest_start_must_be_a_time() {
    let cfg = Config {
        earliest_start: "5am".to_string(),
        ..Config::default()
    };
    assert!(matches!(cfg.check(), Err(AppError::Config(_))));
}
