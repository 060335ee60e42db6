//! Yes/no prompts in front of irreversible actions.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{Editor, Helper};

const PROMPT: &str = "Please confirm (yes/no) ";

#[derive(Debug, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unclear,
}

/// An empty line counts as "no".
pub fn parse_answer(input: &str) -> Answer {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Answer::Yes,
        "no" | "n" | "" => Answer::No,
        _ => Answer::Unclear,
    }
}

/// Asks `question` on `rl` until it gets a clear answer. Ctrl-C and EOF decline.
pub fn confirm<H: Helper, I: History>(rl: &mut Editor<H, I>, question: &str) -> Result<bool> {
    println!("{}", question.bright_yellow());
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match parse_answer(&line) {
                Answer::Yes => return Ok(true),
                Answer::No => return Ok(false),
                Answer::Unclear => continue,
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        }
    }
}

/// One-off prompt for subcommands that run outside the REPL.
pub fn confirm_once(question: &str) -> Result<bool> {
    let mut rl: Editor<(), DefaultHistory> = Editor::new()?;
    confirm(&mut rl, question)
}

pub fn delete_question(name: &str) -> String {
    format!("Delete notebook '{}' and all its messages? This cannot be undone.", name)
}

pub fn clear_question(name: &str) -> String {
    format!("Clear every message in '{}'? This cannot be undone.", name)
}
