pub mod check;
pub mod count;
pub mod edit;
pub mod enumerate;
pub mod format;
pub mod init;
pub mod parse;
pub mod render;

pub use check::{check, CheckArgs};
pub use count::{count, CountArgs};
pub use edit::{edit, EditArgs};
pub use enumerate::{enumerate, EnumerateArgs};
pub use format::{format, FormatArgs};
pub use init::{init, InitArgs};
pub use parse::{parse, ParseArgs};
pub use render::{render, RenderArgs};

use anyhow::{anyhow, Context, Result};
use choicetext_parser::error::pretty::format_errors;
use choicetext_parser::ParseError;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Where a command reads its choice text from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file
    #[arg(conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Inline choice text instead of a file
    #[arg(short, long)]
    pub text: Option<String>,
}

impl InputArgs {
    /// Display name and contents of the input
    pub fn read(&self) -> Result<(String, String)> {
        match (&self.input, &self.text) {
            (_, Some(text)) => Ok(("<text>".to_string(), text.clone())),
            (Some(path), None) => {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok((path.display().to_string(), source))
            }
            (None, None) => Err(anyhow!("Provide an input file or --text")),
        }
    }
}

/// Print recovered parse problems to stderr
pub fn report_diagnostics(name: &str, diagnostics: &[ParseError], normalized: &str) {
    if diagnostics.is_empty() {
        return;
    }

    eprintln!(
        "{} {} recovered from {} problem(s)",
        "⚠".yellow(),
        name.bright_white(),
        diagnostics.len()
    );
    eprint!(
        "{}",
        format_errors(diagnostics, name, normalized)
    );
}
