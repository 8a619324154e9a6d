use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::Result;
use choicetext_evaluator::{VariationCount, VariationCounter};
use choicetext_parser::parse_with_options;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Override the configured overflow ceiling
    #[arg(long)]
    pub ceiling: Option<u64>,
}

pub fn count(args: CountArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let output = parse_with_options(&source, config.editor.parse_options());
    report_diagnostics(&name, &output.diagnostics, &output.normalized);

    let counter = match args.ceiling {
        Some(ceiling) => VariationCounter::with_ceiling(ceiling),
        None => config.editor.counter(),
    };

    match counter.count(&output.root) {
        VariationCount::Finite(n) => println!("{}", n),
        VariationCount::Overflow => println!(
            "{} (more than {})",
            "overflow".yellow().bold(),
            counter.ceiling()
        ),
    }

    Ok(())
}
