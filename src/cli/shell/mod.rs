//! Line-oriented shell over the tutoring engine.
//!
//! Each input line is tokenized (double quotes group words) and parsed with
//! clap as a [`grammar::ShellLine`]. Rejections are printed and the loop
//! keeps going; only `exit` or end of input stops it.

pub mod grammar;
mod handlers;

use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

use clap::Parser;
use regex::Regex;

use crate::core::service::TutoringService;
use crate::errors::AppResult;
use crate::ui::messages::error;
use grammar::ShellLine;
use handlers::{Flow, Shell};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("static regex"));

/// Splits a line into words; `"a b"` is one word without the quotes.
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN
        .captures_iter(line)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn run(service: &TutoringService, input: impl BufRead, interactive: bool) -> AppResult<()> {
    let mut shell = Shell::new(service);
    let mut lines = input.lines();

    loop {
        if interactive {
            print!("rtutor> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        tracing::debug!(line = trimmed, "shell input");

        let parsed = match ShellLine::try_parse_from(tokenize(trimmed)) {
            Ok(p) => p,
            Err(e) => {
                // help and usage errors are clap's own output
                let _ = e.print();
                continue;
            }
        };

        match shell.execute(parsed.command) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::debug!(error = %e, "command rejected");
                error(e);
            }
        }
    }

    Ok(())
}
