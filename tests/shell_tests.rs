use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{rtu, shell, write_seed};

const TUTOR: &str = "login --role tutor --id 1 --name \"Nguyen Van A\"\n";
const STUDENT: &str = "login --role student --id 2 --name \"Le Van C\"\n";

#[test]
fn test_create_and_list() {
    let script = format!(
        "{TUTOR}\
         create --title \"Algebra review\" --date 2024-07-02 --start 10:00 --end 11:00 --location H1-201 --max 2\n\
         list\n"
    );

    shell(&script)
        .success()
        .stdout(contains("Logged in as tutor Nguyen Van A (1)"))
        .stdout(contains(
            "Session 1 created: \"Algebra review\" on Tue 02/07/2024, 10:00 - 11:00",
        ))
        .stdout(contains("Software Engineering (CO3001)"))
        .stdout(contains("0/2"));
}

#[test]
fn test_rejections_keep_the_shell_running() {
    let script = format!(
        "create --title X --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 2\n\
         {TUTOR}\
         create --title \"\" --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 2\n\
         create --title Late --date 2024-07-01 --start 09:00 --end 10:00 --location H1 --max 2\n\
         create --title Ok --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 2\n"
    );

    shell(&script)
        .success()
        .stderr(contains("log in first"))
        .stderr(contains("Title must be filled."))
        .stderr(contains(
            "A new session must start at least 2 hours from now.",
        ))
        .stdout(contains("Session 1 created"));
}

#[test]
fn test_full_session_lifecycle() {
    let script = format!(
        "{TUTOR}\
         create --title Lifecycle --date 2024-07-01 --start 10:00 --end 11:00 --location H1 --max 2\n\
         {STUDENT}\
         list --open\n\
         register 1\n\
         clock --advance 60\n\
         tick\n\
         clock --advance 60\n\
         tick\n\
         clock --advance 60\n\
         tick\n\
         notifications\n\
         {TUTOR}\
         end 1 --note \"2=Good progress\"\n\
         show 1\n"
    );

    shell(&script)
        .success()
        .stdout(contains("Registered for session 1 (1/2)"))
        .stdout(contains("Now: 2024-07-01 09:00"))
        .stdout(contains("Reminder sent for session 1"))
        .stdout(contains("Session 1 is now Ongoing"))
        .stdout(contains("Session 1 is now Being evaluated"))
        .stdout(contains("Your session starts in 1 hour."))
        .stdout(contains("Session 1 finished"))
        .stdout(contains("Good progress"))
        .stdout(contains("Finished"));
}

#[test]
fn test_edit_and_cancel_notify_students() {
    let script = format!(
        "{TUTOR}\
         create --title Review --date 2024-07-03 --start 14:00 --end 16:00 --location H1 --max 5\n\
         {STUDENT}\
         register 1\n\
         {TUTOR}\
         edit 1 --location H6-404\n\
         cancel 1 --reason \"Tutor is sick\"\n\
         notifications --user 2\n"
    );

    shell(&script)
        .success()
        .stdout(contains("Session 1 updated (1 student(s) notified)"))
        .stdout(contains("Session 1 canceled (1 student(s) notified)"))
        .stdout(contains("The tutor has edited the session."))
        .stdout(contains("The session has been canceled. Reason: Tutor is sick"));
}

#[test]
fn test_student_errors() {
    let script = format!(
        "{TUTOR}\
         create --title Small --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 1\n\
         {STUDENT}\
         register 1\n\
         register 1\n\
         login --role student --id 3 --name Other\n\
         register 1\n\
         register 9\n\
         cancel 1\n"
    );

    shell(&script)
        .success()
        .stderr(contains("Student 2 is already registered for session 1"))
        .stderr(contains("Session 1 is full (1 students)"))
        .stderr(contains("Session 9 not found"))
        .stderr(contains("belongs to another tutor"));
}

#[test]
fn test_unknown_command_and_whoami() {
    shell("frobnicate\nwhoami\n")
        .success()
        .stderr(contains("frobnicate"))
        .stdout(contains("Not logged in."));
}

#[test]
fn test_exit_stops_reading() {
    shell(&format!("exit\n{TUTOR}"))
        .success()
        .stdout(contains("Logged in").not());
}

#[test]
fn test_list_json_and_dump() {
    let script = format!(
        "{TUTOR}\
         create --title Json --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 2\n\
         list --all --json\n\
         dump\n"
    );

    shell(&script)
        .success()
        .stdout(contains("\"courseID\": \"CO3001\""))
        .stdout(contains("\"state\": \"Not started\""))
        .stdout(contains("\"hasReminderSent\": false"))
        .stdout(contains("\"notifications\""));
}

#[test]
fn test_system_clock_cannot_move() {
    rtu()
        .args(["--test", "--tick-interval", "0", "shell"])
        .write_stdin("clock --advance 5\n")
        .assert()
        .success()
        .stderr(contains("the system clock cannot be moved"));
}

#[test]
fn test_shell_starts_from_seed() {
    let seed = write_seed(
        "shell_seed",
        "yaml",
        r#"
sessions:
  - id: 7
    title: Graph theory
    location: H6-101
    date: "2024-07-03"
    startTime: "14:00"
    endTime: "16:00"
    maxStudent: 3
    courseName: Discrete Mathematics
    courseID: CO1007
    tutorID: 10
    tutor: Tran Thi B
    state: Not started
"#,
    );

    rtu()
        .args([
            "--test",
            "--tick-interval",
            "0",
            "--now",
            common::NOW,
            "--seed",
            &seed,
        ])
        .arg("shell")
        .write_stdin(format!(
            "{STUDENT}list --open --search CO1007\nregister 7\n{TUTOR}create --title New --date 2024-07-02 --start 10:00 --end 11:00 --location H1 --max 2\n"
        ))
        .assert()
        .success()
        .stdout(contains("Graph theory"))
        .stdout(contains("Registered for session 7 (1/3)"))
        .stdout(contains("Session 8 created"));
}

#[test]
fn test_check_command() {
    let good = write_seed(
        "check_good",
        "json",
        r#"{"sessions": [{
            "id": 1, "title": "A", "location": "L", "date": "2024-07-03",
            "startTime": "14:00", "endTime": "15:00", "maxStudent": 2,
            "courseName": "C", "courseID": "CO1", "tutorID": 1, "tutor": "T",
            "state": "Finished"
        }]}"#,
    );
    rtu()
        .args(["--test", "--seed", &good, "check"])
        .assert()
        .success()
        .stdout(contains("Seed OK: 1 session(s), 0 notification(s)"))
        .stdout(contains("Finished"));

    let bad = write_seed(
        "check_bad",
        "json",
        r#"{"sessions": [{
            "id": 1, "title": "A", "location": "L", "date": "2024-07-03",
            "startTime": "14:00", "endTime": "14:30", "maxStudent": 2,
            "courseName": "C", "courseID": "CO1", "tutorID": 1, "tutor": "T",
            "state": "Not started"
        }]}"#,
    );
    rtu()
        .args(["--test", "--seed", &bad, "check"])
        .assert()
        .failure()
        .stderr(contains("Invalid seed data: session 1: shorter than 60 minutes"));
}

#[test]
fn test_check_without_seed_fails() {
    rtu()
        .args(["--test", "check"])
        .assert()
        .failure()
        .stderr(contains("no seed file configured"));
}

#[test]
fn test_config_print_in_test_mode() {
    rtu()
        .args(["--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("reminder_lead_minutes: 60"))
        .stdout(contains("earliest_start: 05:00").or(contains("earliest_start: '05:00'")));
}

#[test]
fn test_huge_clock_advance_keeps_the_shell_running() {
    shell("clock --advance 9223372036854775807\nclock --advance -9223372036854775808\nwhoami\n")
        .success()
        .stderr(contains("Invalid date/time format"))
        .stdout(contains("Not logged in."));

    rtu()
        .args(["--test", "--tick-interval", "0", "shell"])
        .write_stdin("clock --advance 9223372036854775807\nwhoami\n")
        .assert()
        .success()
        .stdout(contains("Not logged in."));
}

#[test]
fn test_edit_below_roster_in_shell() {
    let script = format!(
        "{TUTOR}\
         create --title Review --date 2024-07-03 --start 14:00 --end 16:00 --location H1 --max 2\n\
         {STUDENT}\
         register 1\n\
         login --role student --id 3 --name Other\n\
         register 1\n\
         {TUTOR}\
         edit 1 --max 1\n\
         show 1\n"
    );

    shell(&script)
        .success()
        .stderr(contains("can not be lower than the 2 students already registered"))
        .stdout(contains("Seats:    2/2"));
}
