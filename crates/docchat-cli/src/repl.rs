//! Interactive notebook REPL.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::bootstrap::AppContext;
use crate::commands;
use crate::confirm;
use crate::render;
use docchat_application::SendOutcome;
use docchat_core::DocchatError;
use docchat_core::api::ApiError;
use std::path::Path;

const LIST_COMMANDS: &[&str] = &["/list", "/open", "/new", "/delete", "/status", "/help", "/quit"];
const NOTEBOOK_COMMANDS: &[&str] = &["/back", "/clear", "/status", "/help", "/quit"];

/// rustyline helper providing completion, highlighting, and hints for `/` commands.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = LIST_COMMANDS
            .iter()
            .chain(NOTEBOOK_COMMANDS)
            .map(|cmd| cmd.to_string())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Question(&'a str),
    List,
    Open(&'a str),
    New { file: &'a str, name: Option<&'a str> },
    Delete(&'a str),
    Back,
    Clear,
    Status,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if !line.starts_with('/') {
        return Input::Question(line);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match (command, rest) {
        ("/list", _) => Input::List,
        ("/open", key) if !key.is_empty() => Input::Open(key),
        ("/new", args) if !args.is_empty() => {
            let (file, name) = match args.split_once(char::is_whitespace) {
                Some((file, name)) => (file, Some(name.trim())),
                None => (args, None),
            };
            Input::New { file, name }
        }
        ("/delete", key) if !key.is_empty() => Input::Delete(key),
        ("/back", _) => Input::Back,
        ("/clear", _) => Input::Clear,
        ("/status", _) => Input::Status,
        ("/help", _) => Input::Help,
        ("/quit" | "/exit", _) => Input::Quit,
        _ => Input::Unknown(command),
    }
}

fn print_help(in_notebook: bool) {
    if in_notebook {
        println!("{}", "Type a question to ask about this notebook's PDF.".bright_black());
        println!("  /back           return to the notebook list");
        println!("  /clear          clear this notebook's chat (asks first)");
    } else {
        println!("  /list           show notebooks");
        println!("  /open <n|id>    open a notebook");
        println!("  /new <file.pdf> [name]  upload a PDF into a new notebook");
        println!("  /delete <n|id>  delete a notebook and its messages (asks first)");
    }
    println!("  /status         show the loaded PDF");
    println!("  /help           show this help");
    println!("  /quit           exit");
}

fn report(err: &anyhow::Error) {
    let api_error = err
        .downcast_ref::<ApiError>()
        .or_else(|| err.downcast_ref::<DocchatError>().and_then(DocchatError::as_api));
    match api_error {
        Some(api_error) => render::print_api_error(api_error),
        None => eprintln!("{} {}", "Error:".red().bold(), err.to_string().red()),
    }
}

async fn open_notebook(ctx: &AppContext, key: &str) -> Result<String> {
    let notebook = commands::notebook::resolve(&ctx.notebooks.list().await, key)?;
    let opened = ctx.notebooks.select(&notebook.id).await?;

    println!();
    println!("{}", format!("=== {} ===", opened.name).bright_magenta().bold());
    println!(
        "{}",
        format!(
            "{} · {} chunks · created {}",
            opened.pdf_filename,
            opened.num_chunks,
            render::format_date(&opened.created_at)
        )
        .bright_black()
    );
    println!();
    render::print_transcript(&opened.messages);
    Ok(opened.name)
}

async fn ask(ctx: &AppContext, question: &str) -> Result<()> {
    println!("{}", "thinking...".bright_black());
    match ctx.notebooks.ask(question).await? {
        SendOutcome::Answered(reply) => {
            render::print_message(&reply);
            println!();
        }
        SendOutcome::Ignored => {
            println!(
                "{}",
                "No PDF loaded. Open a notebook or create one with /new.".yellow()
            );
        }
        SendOutcome::Discarded => {}
    }
    Ok(())
}

/// Runs the REPL until `/quit` or EOF. `open` names a notebook to start in.
pub async fn run(ctx: &AppContext, open: Option<&str>) -> Result<()> {
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== docchat ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}", ctx.config.api_root()).bright_black()
    );
    println!("{}", "Type /help for commands, /quit to exit.".bright_black());
    println!();

    // Name of the open notebook; `None` is the list view.
    let mut current: Option<String> = None;
    match open {
        Some(key) => match open_notebook(ctx, key).await {
            Ok(name) => current = Some(name),
            Err(e) => report(&e),
        },
        None => render::print_notebooks(&ctx.notebooks.list().await),
    }

    loop {
        let prompt = match &current {
            Some(name) => format!("{}> ", name),
            None => "docchat> ".to_string(),
        };

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };
        let input = parse_input(&line);
        if input != Input::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        let in_notebook = current.is_some();
        let result = match input {
            Input::Empty => Ok(()),
            Input::Quit => break,
            Input::Help => {
                print_help(in_notebook);
                Ok(())
            }
            Input::Status => {
                render::print_session(&ctx.session_store.get().await);
                Ok(())
            }
            Input::Question(question) => ask(ctx, question).await,
            Input::Back if in_notebook => {
                current = None;
                match ctx.notebooks.back_to_list().await {
                    Ok(()) => {
                        render::print_notebooks(&ctx.notebooks.list().await);
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Input::Clear if in_notebook => {
                let name = current.clone().unwrap_or_default();
                match confirm::confirm(&mut rl, &confirm::clear_question(&name)) {
                    Ok(true) => match ctx.notebooks.clear_chat().await {
                        Ok(()) => {
                            println!("{}", "Chat cleared.".bright_black());
                            Ok(())
                        }
                        Err(e) => Err(e.into()),
                    },
                    Ok(false) => {
                        println!("{}", "Cancelled.".bright_black());
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            Input::List if !in_notebook => {
                render::print_notebooks(&ctx.notebooks.list().await);
                Ok(())
            }
            Input::Open(key) if !in_notebook => match open_notebook(ctx, key).await {
                Ok(name) => {
                    current = Some(name);
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Input::New { file, name } if !in_notebook => {
                commands::notebook::create(ctx, Path::new(file), name)
                    .await
                    .map(|_| ())
            }
            Input::Delete(key) if !in_notebook => {
                commands::notebook::delete(ctx, key, |found| {
                    confirm::confirm(&mut rl, &confirm::delete_question(&found.name))
                })
                .await
            }
            Input::Unknown(command) => {
                println!("{}", format!("Unknown command {}", command).bright_black());
                Ok(())
            }
            _ => {
                let hint = if in_notebook {
                    "Not available inside a notebook. Use /back first."
                } else {
                    "Open a notebook first."
                };
                println!("{}", hint.bright_black());
                Ok(())
            }
        };

        if let Err(e) = result {
            report(&e);
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(parse_input("  what is this?  "), Input::Question("what is this?"));
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/back"), Input::Back);
        assert_eq!(parse_input("/open 2"), Input::Open("2"));
        assert_eq!(parse_input("/delete  abcd1234 "), Input::Delete("abcd1234"));
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(parse_input("/open"), Input::Unknown("/open"));
        assert_eq!(parse_input("/frobnicate"), Input::Unknown("/frobnicate"));
    }

    #[test]
    fn test_new_with_and_without_name() {
        assert_eq!(
            parse_input("/new paper.pdf"),
            Input::New {
                file: "paper.pdf",
                name: None
            }
        );
        assert_eq!(
            parse_input("/new paper.pdf  Q3 results "),
            Input::New {
                file: "paper.pdf",
                name: Some("Q3 results")
            }
        );
    }

    #[test]
    fn test_hints_complete_commands() {
        let helper = ReplHelper::new();
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);

        assert_eq!(helper.hint("/ba", 3, &ctx).as_deref(), Some("ck"));
        assert_eq!(helper.hint("/back", 5, &ctx), None);
        assert_eq!(helper.hint("what is /ba", 11, &ctx), None);
    }
}
