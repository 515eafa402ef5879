//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL keeps one store open, so filter, page and comment pages carry
//! over between commands the way they do while browsing.

use crate::commands::{self, render_list, render_show};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use verity_domain::ListFilter;
use verity_store::{KeyValueStorage, NewsStore, VoteRequest};

/// Error entries shown by `errors` without a limit
const DEFAULT_ERROR_LIMIT: usize = 20;

/// Run the interactive REPL.
pub fn run_repl<S: KeyValueStorage>(
    store: &mut NewsStore<S>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("Verity REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("verity [{} p{}]> ", store.view().filter(), store.view().page());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, store, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    List,
    Filter(ListFilter),
    Page(usize),
    Next,
    Prev,
    Size(usize),
    Show { id: String, page: Option<usize> },
    Vote { id: String, is_fake: bool, comment: Option<String> },
    Counts(String),
    Errors(usize),
    ClearErrors,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let args = &parts[1..];
    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "list" | "ls" => Ok(ReplCommand::List),
        "next" | "n" => Ok(ReplCommand::Next),
        "prev" | "p" => Ok(ReplCommand::Prev),
        "filter" => {
            let name = args
                .first()
                .ok_or_else(|| CliError::InvalidInput("Usage: filter <all|fake|nonfake>".to_string()))?;
            let filter = name
                .parse::<ListFilter>()
                .map_err(|e| CliError::InvalidInput(e.to_string()))?;
            Ok(ReplCommand::Filter(filter))
        }
        "page" => Ok(ReplCommand::Page(parse_number(args.first(), "Usage: page <n>")?)),
        "size" => Ok(ReplCommand::Size(parse_number(args.first(), "Usage: size <n>")?)),
        "show" => {
            let id = args
                .first()
                .ok_or_else(|| CliError::InvalidInput("Usage: show <id> [comments page]".to_string()))?;
            let page = match args.get(1) {
                Some(_) => Some(parse_number(args.get(1), "Usage: show <id> [comments page]")?),
                None => None,
            };
            Ok(ReplCommand::Show {
                id: id.to_string(),
                page,
            })
        }
        "vote" => parse_vote_command(args),
        "counts" => {
            let id = args
                .first()
                .ok_or_else(|| CliError::InvalidInput("Usage: counts <id>".to_string()))?;
            Ok(ReplCommand::Counts(id.to_string()))
        }
        "errors" => match args.first() {
            Some(&"clear") => Ok(ReplCommand::ClearErrors),
            Some(_) => Ok(ReplCommand::Errors(parse_number(args.first(), "Usage: errors [limit|clear]")?)),
            None => Ok(ReplCommand::Errors(DEFAULT_ERROR_LIMIT)),
        },
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_vote_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || CliError::InvalidInput("Usage: vote <id> <fake|genuine> [comment]".to_string());
    if args.len() < 2 {
        return Err(usage());
    }

    let is_fake = match args[1].to_lowercase().as_str() {
        "fake" | "f" => true,
        "genuine" | "real" | "g" => false,
        _ => return Err(usage()),
    };
    let comment = (args.len() > 2).then(|| args[2..].join(" "));

    Ok(ReplCommand::Vote {
        id: args[0].to_string(),
        is_fake,
        comment,
    })
}

fn parse_number(arg: Option<&&str>, usage: &str) -> Result<usize> {
    match arg.and_then(|s| s.parse::<usize>().ok()) {
        Some(n) if n >= 1 => Ok(n),
        _ => Err(CliError::InvalidInput(usage.to_string())),
    }
}

/// Execute a REPL command.
fn execute_repl_command<S: KeyValueStorage>(
    cmd: ReplCommand,
    store: &mut NewsStore<S>,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::List => {}
        ReplCommand::Filter(filter) => store.set_filter(filter),
        ReplCommand::Page(page) => store.set_page(page),
        ReplCommand::Size(size) => store.set_page_size(size),
        ReplCommand::Next => {
            let info = store.list_page_info();
            if !info.has_next() {
                println!("{}", formatter.warning("Already on the last page"));
                return Ok(());
            }
            store.set_page(info.page + 1);
        }
        ReplCommand::Prev => {
            let info = store.list_page_info();
            if !info.has_previous() {
                println!("{}", formatter.warning("Already on the first page"));
                return Ok(());
            }
            store.set_page(info.page - 1);
        }
        ReplCommand::Show { id, page } => {
            store.guard_news(&id)?;
            if let Some(page) = page {
                store.set_detail_comments_page(id.as_str(), page);
            }
            println!("{}", render_show(store, &id, formatter)?);
            return Ok(());
        }
        ReplCommand::Vote { id, is_fake, comment } => {
            let mut request = VoteRequest::new(id, is_fake);
            if let Some(text) = comment {
                request = request.with_comment(text);
            }
            let submission = store.submit_vote(request)?;
            println!("{}", formatter.format_submission(&submission)?);
            return Ok(());
        }
        ReplCommand::Counts(id) => {
            store.guard_news(&id)?;
            let counts = store.vote_counts(&id);
            println!(
                "{}: {} fake / {} genuine, {}",
                id,
                counts.fake_count,
                counts.non_fake_count,
                formatter.status_badge(store.computed_status(&id))
            );
            return Ok(());
        }
        ReplCommand::Errors(limit) => {
            println!("{}", formatter.format_errors(store.error_log().recent(limit))?);
            return Ok(());
        }
        ReplCommand::ClearErrors => {
            let args = crate::cli::ErrorsArgs { limit: 0, clear: true };
            return commands::execute_errors(args, store, formatter);
        }
        ReplCommand::Exit | ReplCommand::Help => return Ok(()),
    }

    // View changes re-render the list
    println!("{}", render_list(store, formatter)?);
    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let verity_dir = Config::home()?;
    std::fs::create_dir_all(&verity_dir)?;
    Ok(verity_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  list, ls                       - Show the current page of news");
    println!("  filter <all|fake|nonfake>      - Filter by status (back to page 1)");
    println!("  page <n>                       - Go to page n");
    println!("  next, n / prev, p              - Next or previous page");
    println!("  size <n>                       - Items per page (back to page 1)");
    println!("  show <id> [page]               - Show a news item and a page of its comments");
    println!("  vote <id> <fake|genuine> [txt] - Vote, optionally with a comment");
    println!("  counts <id>                    - Vote tally and status");
    println!("  errors [limit|clear]           - Recorded storage errors");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
