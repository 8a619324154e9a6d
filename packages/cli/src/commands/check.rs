use super::report_diagnostics;
use crate::config::Config;
use anyhow::{anyhow, Result};
use choicetext_evaluator::VariationCounter;
use choicetext_parser::{parse_with_options, ParseOptions};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File or directory to check (defaults to the configured source directory)
    pub input: Option<PathBuf>,

    /// Fail if any file needed recovery
    #[arg(long)]
    pub strict: bool,
}

/// Result of checking one file
#[derive(Debug, PartialEq, Eq)]
struct FileReport {
    diagnostics: usize,
    variations: String,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = args.input.unwrap_or_else(|| config.get_src_dir(cwd));

    println!("🔍 {} choice text", "Checking".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_files(&input, &config.extension)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let options = config.editor.parse_options();
    let counter = config.editor.counter();
    let mut total_diagnostics = 0;

    for file in &files {
        let report = check_file(file, options, &counter)?;
        let marker = if report.diagnostics > 0 {
            "⚠".yellow()
        } else {
            "✓".green()
        };
        println!(
            "{} {} ({} variations)",
            marker,
            file.display(),
            report.variations
        );
        total_diagnostics += report.diagnostics;
    }

    println!();
    println!("   Files checked: {}", files.len());
    if total_diagnostics > 0 {
        println!("   {} {}", "Recovered problems:".yellow(), total_diagnostics);
    } else {
        println!("   {} No issues found!", "✓".green());
    }

    if args.strict && total_diagnostics > 0 {
        return Err(anyhow!("{} problem(s) found", total_diagnostics));
    }

    Ok(())
}

fn check_file(path: &Path, options: ParseOptions, counter: &VariationCounter) -> Result<FileReport> {
    let source = fs::read_to_string(path)?;
    let output = parse_with_options(&source, options);
    let name = path.display().to_string();

    report_diagnostics(&name, &output.diagnostics, &output.normalized);

    Ok(FileReport {
        diagnostics: output.diagnostics.len(),
        variations: counter.count(&output.root).to_string(),
    })
}

fn find_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map_or(false, |e| e == extension))
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_files_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.choice"), "{a|b}").unwrap();
        fs::write(dir.path().join("nested/b.choice"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "{a|b}").unwrap();

        let files = find_files(dir.path(), "choice");
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "choice"));
    }

    #[test]
    fn test_check_file_reports_recovery() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.choice");
        fs::write(&path, "{a|b").unwrap();

        let report =
            check_file(&path, ParseOptions::default(), &VariationCounter::new()).unwrap();
        assert_eq!(
            report,
            FileReport {
                diagnostics: 1,
                variations: "2".to_string()
            }
        );
    }
}
