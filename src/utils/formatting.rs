//! Formatting utilities used for shell output.

use ansi_term::Colour;

use crate::models::session_state::SessionState;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Coloured, human-readable label for a session state.
pub fn state_label(state: SessionState) -> String {
    let colour = match state {
        SessionState::NotStarted => Colour::Blue,
        SessionState::Ongoing => Colour::Green,
        SessionState::BeingEvaluated => Colour::Yellow,
        SessionState::Finished => Colour::Fixed(245),
        SessionState::Canceled => Colour::Red,
    };
    colour.paint(state.as_str()).to_string()
}

/// Wraps free text (descriptions, notes) with an indent for detail views.
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> String {
    let options = textwrap::Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}
