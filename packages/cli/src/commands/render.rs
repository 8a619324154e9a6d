use super::{report_diagnostics, InputArgs};
use crate::config::Config;
use anyhow::Result;
use choicetext_evaluator::Renderer;
use choicetext_parser::parse_with_options;
use clap::Args;

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of independent samples
    #[arg(short = 'n', long, default_value_t = 1)]
    pub samples: usize,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (name, source) = args.input.read()?;

    let output = parse_with_options(&source, config.editor.parse_options());
    report_diagnostics(&name, &output.diagnostics, &output.normalized);

    let samples = match args.seed {
        Some(seed) => Renderer::seeded(seed).render_many(&output.root, args.samples),
        None => Renderer::new(rand::thread_rng()).render_many(&output.root, args.samples),
    };

    for sample in samples {
        println!("{}", sample);
    }

    Ok(())
}
