use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use easel_model::{diagnose, serializer, Diagnostic, DiagnosticLevel};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Stored document (JSON element list or body object)
    pub document: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.document);
    let source =
        fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;

    let diagnostics = check_source(&source)?;
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        println!("🔍 {} {}", "Checking".green().bold(), path.display());
        println!();

        for diagnostic in &diagnostics {
            let level_str = match diagnostic.level {
                DiagnosticLevel::Error => "error".red().bold(),
                DiagnosticLevel::Warning => "warning".yellow().bold(),
            };
            match &diagnostic.node_id {
                Some(id) => println!(
                    "  {} [{}] {} {}",
                    level_str,
                    diagnostic.rule,
                    diagnostic.message,
                    format!("({})", id).dimmed()
                ),
                None => println!("  {} [{}] {}", level_str, diagnostic.rule, diagnostic.message),
            }
        }

        if diagnostics.is_empty() {
            println!("   {} No issues found!", "✓".green());
        } else {
            println!();
            if errors > 0 {
                println!("   {} {}", "Errors:".red(), errors);
            }
            if warnings > 0 {
                println!("   {} {}", "Warnings:".yellow(), warnings);
            }
        }
    }

    if errors > 0 || (args.strict && warnings > 0) {
        bail!("{} failed validation", path.display());
    }

    Ok(())
}

/// Diagnostics for a stored document that at least decodes
pub fn check_source(source: &str) -> Result<Vec<Diagnostic>> {
    let elements = serializer::decode(source).context("Document is not valid JSON")?;
    Ok(diagnose(&elements))
}
