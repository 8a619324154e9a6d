use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use choicetext_editor::{Document, Mutation};
use choicetext_parser::normalize;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// JSON file holding a list of steps
    #[arg(short, long)]
    pub script: PathBuf,

    /// Print the final tree as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Stop at the first rejected step
    #[arg(long)]
    pub strict: bool,
}

/// History commands usable as script steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryCommand {
    Undo,
    Redo,
    ClearAll,
}

/// One script step: `"undo"`, `"redo"`, `"clearAll"` or a mutation object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    History(HistoryCommand),
    Mutation(Mutation),
}

impl Step {
    fn describe(&self) -> String {
        match self {
            Step::History(HistoryCommand::Undo) => "undo".to_string(),
            Step::History(HistoryCommand::Redo) => "redo".to_string(),
            Step::History(HistoryCommand::ClearAll) => "clearAll".to_string(),
            Step::Mutation(mutation) => format!("{} {}", mutation.name(), mutation.path()),
        }
    }
}

/// Outcome of running a script against a document
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub applied: usize,
    pub unchanged: usize,
    pub rejected: usize,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let mut doc = Document::from_source_with_config(&source, config.editor.clone());
    report_diagnostics(&name, doc.diagnostics(), &normalize(&source));

    let summary = run_script(&mut doc, &steps, args.strict)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(doc.tree().as_ref())?);
    } else {
        println!("{}", doc.source());
    }

    eprintln!(
        "{} {} applied, {} unchanged, {} rejected (version {}, {} variations)",
        "✓".green(),
        summary.applied,
        summary.unchanged,
        summary.rejected,
        doc.version,
        doc.variations()
    );

    Ok(())
}

/// Run `steps` in order, reporting rejected ones on stderr
pub fn run_script(doc: &mut Document, steps: &[Step], strict: bool) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (i, step) in steps.iter().enumerate() {
        let changed = match step {
            Step::History(HistoryCommand::Undo) => Ok(doc.undo()),
            Step::History(HistoryCommand::Redo) => Ok(doc.redo()),
            Step::History(HistoryCommand::ClearAll) => Ok(doc.clear_all().changed),
            Step::Mutation(mutation) => doc.apply(mutation).map(|result| result.changed),
        };

        match changed {
            Ok(true) => summary.applied += 1,
            Ok(false) => summary.unchanged += 1,
            Err(err) => {
                if strict {
                    return Err(anyhow!("Step {} ({}) rejected: {}", i + 1, step.describe(), err));
                }
                eprintln!(
                    "{} step {} ({}): {}",
                    "✗".red(),
                    i + 1,
                    step.describe(),
                    err
                );
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
