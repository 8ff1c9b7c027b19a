use rtutor::core::validation::{MutationKind, validate_cancellation, validate_session_mutation};
use rtutor::models::session::{Session, SessionDraft};
use rtutor::models::session_state::SessionState;

mod common;
use common::{at, draft, draft_at, now, policy, session};

const TUTOR: u32 = 1;

fn check(d: &SessionDraft, existing: &[Session], kind: MutationKind) -> Result<(), String> {
    validate_session_mutation(d, existing, kind, TUTOR, now(), &policy())
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn create(d: &SessionDraft) -> Result<(), String> {
    check(d, &[], MutationKind::Create)
}

#[test]
fn test_valid_draft_is_parsed() {
    let fields = validate_session_mutation(
        &draft(),
        &[],
        MutationKind::Create,
        TUTOR,
        now(),
        &policy(),
    )
    .expect("valid draft");

    assert_eq!(fields.title, "Algebra review");
    assert_eq!(fields.max_student, 5);
    assert_eq!(fields.start_time.format("%H:%M").to_string(), "10:00");
    assert_eq!(fields.end_time.format("%H:%M").to_string(), "11:00");
}

#[test]
fn test_compulsory_fields() {
    let mut d = draft();
    d.title = "   ".into();
    assert_eq!(create(&d).unwrap_err(), "Title must be filled.");

    let mut d = draft();
    d.location = String::new();
    assert_eq!(create(&d).unwrap_err(), "Location must be filled.");

    let mut d = draft();
    d.max_student = String::new();
    assert_eq!(create(&d).unwrap_err(), "Number of student must be filled.");

    d.max_student = "0".into();
    assert_eq!(create(&d).unwrap_err(), "Number of student must be filled.");

    d.max_student = "many".into();
    assert_eq!(
        create(&d).unwrap_err(),
        "Number of student must be a positive integer."
    );
}

#[test]
fn test_first_failing_rule_wins() {
    // empty title, reversed times and a past date: only the title is reported
    let mut d = draft_at("2024-06-01", "12:00", "09:00");
    d.title = String::new();
    assert_eq!(create(&d).unwrap_err(), "Title must be filled.");

    // reversed times and too early: ordering reported first
    let d = draft_at("2024-07-02", "04:30", "04:00");
    assert_eq!(
        create(&d).unwrap_err(),
        "Start time must be earlier than end time."
    );
}

#[test]
fn test_time_of_day_rules() {
    assert_eq!(
        create(&draft_at("2024-07-02", "11:00", "11:00")).unwrap_err(),
        "Start time must be earlier than end time."
    );
    assert_eq!(
        create(&draft_at("2024-07-02", "10:00", "10:59")).unwrap_err(),
        "Session duration must be at least 1 hour."
    );
    assert_eq!(
        create(&draft_at("2024-07-02", "04:00", "05:30")).unwrap_err(),
        "Session can not start before 05:00."
    );
    assert!(create(&draft_at("2024-07-02", "05:00", "06:00")).is_ok());
}

#[test]
fn test_same_day_notice() {
    // now is 08:00; 09:30 is only 90 minutes away
    let d = draft_at("2024-07-01", "09:30", "10:30");
    assert_eq!(
        create(&d).unwrap_err(),
        "A new session must start at least 2 hours from now."
    );
    assert_eq!(
        check(&d, &[], MutationKind::Edit(7)).unwrap_err(),
        "An edited session must start at least 2 hours from now."
    );

    // exactly two hours away is accepted
    assert!(create(&draft_at("2024-07-01", "10:00", "11:00")).is_ok());
}

#[test]
fn test_past_date_is_rejected() {
    assert_eq!(
        create(&draft_at("2024-06-30", "10:00", "11:00")).unwrap_err(),
        "The selected date is in the past."
    );
}

#[test]
fn test_bad_formats_surface_parse_errors() {
    let err = create(&draft_at("2024-07-02", "ten", "11:00")).unwrap_err();
    assert!(err.contains("Invalid time format"), "{err}");

    let err = create(&draft_at("02/07/2024", "10:00", "11:00")).unwrap_err();
    assert!(err.contains("Invalid date format"), "{err}");
}

#[test]
fn test_overlap_with_own_session() {
    let existing = vec![session(1, TUTOR, "2024-07-02", "10:00", "11:00")];

    let err = check(
        &draft_at("2024-07-02", "10:30", "11:30"),
        &existing,
        MutationKind::Create,
    )
    .unwrap_err();
    assert_eq!(
        err,
        "This session overlaps with another session: \"Session 1\" (10:00–11:00)."
    );

    // touching endpoints are fine on both sides
    for (start, end) in [("11:00", "12:00"), ("09:00", "10:00")] {
        assert!(
            check(
                &draft_at("2024-07-02", start, end),
                &existing,
                MutationKind::Create
            )
            .is_ok()
        );
    }

    // another day never conflicts
    assert!(
        check(
            &draft_at("2024-07-03", "10:00", "11:00"),
            &existing,
            MutationKind::Create
        )
        .is_ok()
    );
}

#[test]
fn test_overlap_ignores_other_tutors_canceled_and_self() {
    let mut canceled = session(2, TUTOR, "2024-07-02", "10:00", "11:00");
    canceled.state = SessionState::Canceled;
    let existing = vec![
        session(1, 99, "2024-07-02", "10:00", "11:00"),
        canceled,
        session(3, TUTOR, "2024-07-02", "13:00", "14:00"),
    ];

    let d = draft_at("2024-07-02", "10:00", "11:00");
    assert!(check(&d, &existing, MutationKind::Create).is_ok());

    // moving session 3 within its own slot does not conflict with itself
    let d = draft_at("2024-07-02", "13:30", "14:30");
    assert!(check(&d, &existing, MutationKind::Edit(3)).is_ok());
    assert!(check(&d, &existing, MutationKind::Create).is_err());
}

#[test]
fn test_cancellation_notice() {
    let s = session(1, TUTOR, "2024-07-01", "10:00", "11:00");

    assert!(validate_cancellation(&s, at("2024-07-01 08:00"), &policy()).is_ok());

    let err = validate_cancellation(&s, at("2024-07-01 08:01"), &policy()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Session starts in less than 2 hours. Cannot cancel."
    );

    // the check only applies on the day itself
    let tomorrow = session(2, TUTOR, "2024-07-02", "00:30", "01:30");
    assert!(validate_cancellation(&tomorrow, at("2024-07-01 23:50"), &policy()).is_ok());
}
