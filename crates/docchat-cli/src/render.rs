//! Terminal presentation: messages, citations, notebook list, progress bar.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use docchat_core::api::{AnswerSource, ApiError};
use docchat_core::notebook::{Message, MessageKind, Notebook};
use docchat_core::session::SessionState;

const BAR_WIDTH: usize = 30;

/// `Mon D, YYYY`, e.g. `Mar 7, 2026`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn source_badge(source: AnswerSource) -> &'static str {
    match source {
        AnswerSource::Pdf => "From PDF",
        AnswerSource::Web => "From Web",
    }
}

/// Numbered citation lines in received order.
pub fn citation_lines(message: &Message) -> Vec<String> {
    message
        .web_sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("[{}] {} <{}>", i + 1, source.title, source.url))
        .collect()
}

pub fn print_message(message: &Message) {
    match message.kind {
        MessageKind::User => println!("{}", format!("> {}", message.content).green()),
        MessageKind::Assistant => {
            if let Some(source) = message.source {
                println!("{}", source_badge(source).bright_black());
            }
            if message.content.starts_with("Error: ") {
                println!("{}", message.content.red());
            } else {
                for line in message.content.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            for (line, source) in citation_lines(message).iter().zip(&message.web_sources) {
                println!("  {}", line.cyan());
                if !source.snippet.is_empty() {
                    println!("      {}", source.snippet.bright_black());
                }
            }
        }
    }
}

pub fn print_transcript(messages: &[Message]) {
    for message in messages {
        print_message(message);
        println!();
    }
}

pub fn notebook_line(index: usize, notebook: &Notebook) -> String {
    format!(
        "{:>2}. {}  ({}, {} chunks, {} messages)  {}",
        index + 1,
        notebook.name,
        notebook.pdf_filename,
        notebook.num_chunks,
        notebook.messages.len(),
        format_date(&notebook.last_accessed),
    )
}

pub fn print_notebooks(notebooks: &[Notebook]) {
    if notebooks.is_empty() {
        println!(
            "{}",
            "No notebooks yet. Create one from a PDF to get started.".bright_black()
        );
        return;
    }
    for (index, notebook) in notebooks.iter().enumerate() {
        println!("{}", notebook_line(index, notebook));
        println!("    {}", notebook.id.bright_black());
    }
}

pub fn print_session(state: &SessionState) {
    match (&state.pdf_filename, state.is_loaded()) {
        (Some(filename), true) => println!(
            "{} {} ({} chunks)",
            "Loaded:".bright_green(),
            filename,
            state.chunk_count().unwrap_or(0)
        ),
        _ => println!("{}", "No PDF loaded.".bright_black()),
    }
}

pub fn print_api_error(err: &ApiError) {
    eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
}
