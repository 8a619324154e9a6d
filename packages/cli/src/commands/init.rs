use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use choicetext_editor::EditorConfig;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// File extension of choice-text files
    #[arg(short, long, default_value = "choice")]
    pub extension: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing choice text project...".bright_blue().bold()
    );

    // Create source directory if it doesn't exist
    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_name = format!("example.{}", args.extension);
    let example_file = src_dir.join(&example_name);
    if !example_file.exists() {
        let example_content =
            "{Hello|Hi|Greetings} {world|there|{dear|old} friend}! How {are|were} you?\n";
        fs::write(&example_file, example_content)?;
        println!("  {} Created {}", "✓".green(), example_name);
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        extension: args.extension.clone(),
        editor: EditorConfig::default(),
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/{}", args.src_dir, example_name);
    println!("  2. Run: choicetext check");
    println!("  3. Run: choicetext render {}/{} -n 5", args.src_dir, example_name);

    Ok(())
}
