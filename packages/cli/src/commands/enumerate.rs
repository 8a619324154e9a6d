use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::Result;
use choicetext_evaluator::enumerate_variations;
use choicetext_parser::parse_with_options;
use clap::Args;

#[derive(Args, Debug)]
pub struct EnumerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Refuse to list more than this many variations
    #[arg(short, long, default_value_t = 1000)]
    pub limit: u64,
}

pub fn enumerate(args: EnumerateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let output = parse_with_options(&source, config.editor.parse_options());
    report_diagnostics(&name, &output.diagnostics, &output.normalized);

    for variation in enumerate_variations(&output.root, args.limit)? {
        println!("{}", variation);
    }

    Ok(())
}
