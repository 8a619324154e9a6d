use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::Result;
use choicetext_parser::parse_with_options;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Single-line JSON output
    #[arg(short, long)]
    pub compact: bool,
}

/// Tree and diagnostics as printed by `parse`
#[derive(Serialize)]
struct ParseReport<'a> {
    tree: &'a choicetext_parser::Node,
    diagnostics: &'a [choicetext_parser::ParseError],
}

pub fn parse(args: ParseArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let output = parse_with_options(&source, config.editor.parse_options());
    report_diagnostics(&name, &output.diagnostics, &output.normalized);

    let report = ParseReport {
        tree: &output.root,
        diagnostics: &output.diagnostics,
    };
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    Ok(())
}
