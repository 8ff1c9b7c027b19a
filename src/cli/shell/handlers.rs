use crate::cli::shell::grammar::ShellCommand;
use crate::core::scheduler::TickReport;
use crate::core::service::TutoringService;
use crate::errors::{AppError, AppResult};
use crate::models::notification::Notification;
use crate::models::session::{Session, SessionDraft, SessionPatch};
use crate::models::user::{Role, User, UserId};
use crate::ui::messages::{event, header, info, success};
use crate::utils::date::format_session_time;
use crate::utils::formatting::{bold, italic, wrap_indented};
use crate::utils::state_label;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_datetime;

/// What the read loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell state: the engine plus whoever is logged in.
pub struct Shell<'a> {
    service: &'a TutoringService,
    user: Option<User>,
}

impl<'a> Shell<'a> {
    pub fn new(service: &'a TutoringService) -> Self {
        Self {
            service,
            user: None,
        }
    }

    fn user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or_else(|| {
            AppError::Forbidden(
                "log in first: login --role <tutor|student> --id <ID> --name <NAME>".to_string(),
            )
        })
    }

    pub fn execute(&mut self, command: ShellCommand) -> AppResult<Flow> {
        match command {
            ShellCommand::Login { role, id, name } => {
                let role = Role::from_code(&role).ok_or_else(|| {
                    AppError::Rejected(format!("Unknown role '{}'. Use tutor or student.", role))
                })?;
                let user = User { id, name, role };
                success(format!("Logged in as {} {} ({})", user.role, user.name, user.id));
                self.user = Some(user);
            }

            ShellCommand::Whoami => match &self.user {
                Some(u) => info(format!("{} {} ({})", u.role, u.name, u.id)),
                None => info("Not logged in."),
            },

            ShellCommand::Create {
                title,
                date,
                start,
                end,
                location,
                max_student,
                description,
            } => {
                let draft = SessionDraft {
                    title,
                    location,
                    description,
                    date,
                    start_time: start,
                    end_time: end,
                    max_student,
                };
                let session = self.service.create(&draft, self.user()?)?;
                success(format!(
                    "Session {} created: \"{}\" on {}",
                    session.id,
                    session.title,
                    format_session_time(session.date, session.start_time, session.end_time)
                ));
            }

            ShellCommand::Edit {
                id,
                title,
                date,
                start,
                end,
                location,
                max_student,
                description,
            } => {
                let patch = SessionPatch {
                    title,
                    location,
                    description,
                    date,
                    start_time: start,
                    end_time: end,
                    max_student,
                };
                let session = self.service.edit(id, patch, self.user()?)?;
                success(format!(
                    "Session {} updated ({} student(s) notified)",
                    session.id,
                    session.students.len()
                ));
            }

            ShellCommand::Cancel { id, reason } => {
                let session = self.service.cancel(id, &reason, self.user()?)?;
                success(format!(
                    "Session {} canceled ({} student(s) notified)",
                    session.id,
                    session.students.len()
                ));
            }

            ShellCommand::Register { id } => {
                let session = self.service.register(id, self.user()?)?;
                success(format!(
                    "Registered for session {} ({}/{})",
                    session.id,
                    session.students.len(),
                    session.max_student
                ));
            }

            ShellCommand::Annotate { id, notes } => {
                let notes = parse_notes(&notes)?;
                self.service.annotate(id, &notes, self.user()?)?;
                success(format!("Notes saved for session {}", id));
            }

            ShellCommand::End { id, notes } => {
                let user = self.user()?;
                if !notes.is_empty() {
                    self.service.annotate(id, &parse_notes(&notes)?, user)?;
                }
                let session = self.service.end_session(id, user)?;
                success(format!("Session {} finished", session.id));
            }

            ShellCommand::List {
                open,
                search,
                all,
                json,
            } => {
                let sessions = if all {
                    self.service.all_sessions()
                } else if open {
                    self.service
                        .open_for_registration(self.user()?, search.as_deref())
                } else {
                    self.service.sessions_for(self.user()?)
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&sessions)?);
                } else {
                    print_sessions(&sessions);
                }
            }

            ShellCommand::Show { id } => {
                let session = self.service.session(id)?;
                print_session_details(&session);
            }

            ShellCommand::Notifications { user } => {
                let recipient: UserId = match user {
                    Some(id) => id,
                    None => self.user()?.id,
                };
                print_notifications(&self.service.notifications_for(recipient));
            }

            ShellCommand::Tick => {
                let report = self.service.tick();
                print_tick(&report);
            }

            ShellCommand::Clock { advance, set } => {
                let clock = self.service.clock();
                if let Some(raw) = set
                    && !clock.set(parse_datetime(&raw)?)
                {
                    return Err(clock_is_fixed());
                }
                if let Some(minutes) = advance
                    && !clock.advance(minutes)?
                {
                    return Err(clock_is_fixed());
                }
                info(format!("Now: {}", clock.now().format("%Y-%m-%d %H:%M")));
            }

            ShellCommand::Dump => {
                println!("{}", serde_json::to_string_pretty(&self.service.snapshot())?);
            }

            ShellCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}

fn clock_is_fixed() -> AppError {
    AppError::Forbidden("the system clock cannot be moved; start the shell with --now".to_string())
}

/// `2390001=Bring the exercises` → (2390001, "Bring the exercises")
fn parse_notes(raw: &[String]) -> AppResult<Vec<(UserId, String)>> {
    raw.iter()
        .map(|entry| {
            let (id, text) = entry.split_once('=').ok_or_else(|| {
                AppError::Rejected(format!("Invalid note '{}'. Use STUDENT_ID=TEXT.", entry))
            })?;
            let id = id.trim().parse::<UserId>().map_err(|_| {
                AppError::Rejected(format!("Invalid student id '{}' in note.", id.trim()))
            })?;
            Ok((id, text.to_string()))
        })
        .collect()
}

fn print_sessions(sessions: &[Session]) {
    if sessions.is_empty() {
        info("No sessions.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("TITLE", 24),
        Column::new("COURSE", 26),
        Column::new("TUTOR", 18),
        Column::new("WHEN", 30),
        Column::new("STATE", 16),
        Column::new("SEATS", 5),
    ]);

    for s in sessions {
        table.add_row(vec![
            s.id.to_string(),
            s.title.clone(),
            format!("{} ({})", s.course_name, s.course_id),
            s.tutor.clone(),
            format_session_time(s.date, s.start_time, s.end_time),
            state_label(s.state),
            format!("{}/{}", s.students.len(), s.max_student),
        ]);
    }
    print!("{}", table.render());
}

fn print_session_details(s: &Session) {
    header(format!("#{} {}", s.id, s.title));
    println!("{} ({}) - {}", s.course_name, s.course_id, s.tutor);
    println!("{}", format_session_time(s.date, s.start_time, s.end_time));
    println!("Location: {}", s.location);
    println!("State:    {}", state_label(s.state));
    println!("Seats:    {}/{}", s.students.len(), s.max_student);
    if !s.description.is_empty() {
        println!("{}", wrap_indented(&s.description, 72, "  "));
    }
    if !s.reason.is_empty() {
        println!("Reason:   {}", italic(&s.reason));
    }

    if !s.students.is_empty() {
        println!("{}", bold("Students:"));
        for e in &s.students {
            println!("  - {} ({})", e.student_name, e.student_id);
            if !e.description.is_empty() {
                println!("{}", wrap_indented(&e.description, 72, "      "));
            }
        }
    }
}

fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        info("No notifications.");
        return;
    }
    for n in notifications {
        let mark = if n.is_read { " " } else { "*" };
        println!(
            "{} [{}] {} | {} - {} | {}",
            mark,
            n.id,
            n.date.format("%Y-%m-%d %H:%M"),
            n.course_id,
            n.title,
            n.description
        );
    }
}

fn print_tick(report: &TickReport) {
    if report.is_empty() {
        info("Nothing to do.");
        return;
    }
    for id in &report.reminded {
        event(format!("Reminder sent for session {}", id));
    }
    for id in &report.started {
        event(format!("Session {} is now Ongoing", id));
    }
    for id in &report.ended {
        event(format!("Session {} is now Being evaluated", id));
    }
}
