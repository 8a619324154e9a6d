mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, count, edit, enumerate, format, init, parse, render, CheckArgs, CountArgs, EditArgs,
    EnumerateArgs, FormatArgs, InitArgs, ParseArgs, RenderArgs,
};
use tracing::Level;

/// Choicetext CLI - parse, count, render and edit {a|b} choice text
#[derive(Parser, Debug)]
#[command(name = "choicetext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default choicetext.config.json and an example file
    Init(InitArgs),

    /// Print the tree and recovery diagnostics as JSON
    Parse(ParseArgs),

    /// Print the canonical text
    Format(FormatArgs),

    /// Count the distinct renderings
    Count(CountArgs),

    /// Print random renderings
    Render(RenderArgs),

    /// List every rendering
    Enumerate(EnumerateArgs),

    /// Apply a JSON script of edits, with undo/redo
    Edit(EditArgs),

    /// Check every choice-text file in a directory
    Check(CheckArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Parse(args) => parse(args, &cwd),
        Command::Format(args) => format(args, &cwd),
        Command::Count(args) => count(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Enumerate(args) => enumerate(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Check(args) => check(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
