//! Verity CLI - Command-line interface for voting on news truthfulness.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use verity_cli::commands;
use verity_cli::repl;
use verity_cli::session::open_store;
use verity_cli::{Cli, Command, Config, Formatter};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> verity_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config from the given path or ~/.verity/config.toml
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let seeds_dir = config.resolve_seeds_dir(cli.seeds);
    let data_dir = config.resolve_data_dir(cli.data_dir)?;
    let mut store = open_store(&config, &seeds_dir, &data_dir, &formatter)?;

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut store, &config, &formatter)?;
        }
        Some(Command::List(args)) => {
            commands::execute_list(args, &mut store, &formatter)?;
        }
        Some(Command::Show(args)) => {
            commands::execute_show(args, &mut store, &formatter)?;
        }
        Some(Command::Vote(args)) => {
            commands::execute_vote(args, &mut store, &formatter)?;
        }
        Some(Command::Errors(args)) => {
            commands::execute_errors(args, &mut store, &formatter)?;
        }
    }

    Ok(())
}
