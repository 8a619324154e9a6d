use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::{anyhow, Result};
use choicetext_parser::{parse_with_options, serialize};
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only report whether the input is already canonical
    #[arg(long)]
    pub check: bool,
}

pub fn format(args: FormatArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let output = parse_with_options(&source, config.editor.parse_options());
    report_diagnostics(&name, &output.diagnostics, &output.normalized);
    let canonical = serialize(&output.root);

    if !args.check {
        println!("{}", canonical);
        return Ok(());
    }

    if is_canonical(&source, &canonical) {
        println!("{} {} is canonical", "✓".green(), name);
        Ok(())
    } else {
        Err(anyhow!("{} is not in canonical form", name))
    }
}

/// Trailing newlines are not part of the text
fn is_canonical(source: &str, canonical: &str) -> bool {
    source.trim_end_matches(|c: char| c == '\r' || c == '\n') == canonical
}
