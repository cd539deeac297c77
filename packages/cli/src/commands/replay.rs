use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use easel_editor::{Editor, EditorOptions, Intent, Transition};
use easel_model::serializer;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Stored document (JSON element list or body object)
    pub document: PathBuf,

    /// JSON array of intents, dispatched in order
    pub intents: PathBuf,

    /// Write the final document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Counts of what the replayed intents did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub recorded: usize,
    pub noops: usize,
    pub restored: usize,
    pub ignored: usize,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let base = PathBuf::from(cwd);

    let document_path = base.join(&args.document);
    let intents_path = base.join(&args.intents);
    let document = fs::read_to_string(&document_path)
        .with_context(|| format!("Cannot read {}", document_path.display()))?;
    let intents = fs::read_to_string(&intents_path)
        .with_context(|| format!("Cannot read {}", intents_path.display()))?;

    eprintln!("▶️  {} {}", "Replaying".green().bold(), intents_path.display());

    let (editor, summary) = replay_source(&document, &intents, config.editor_options())?;
    let output = serializer::to_json_pretty(editor.elements())?;

    match &args.output {
        Some(path) => {
            let path = base.join(path);
            fs::write(&path, output)?;
            eprintln!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", output),
    }

    eprintln!();
    eprintln!("   Intents:   {}", summary.dispatched);
    eprintln!("   Recorded:  {}", summary.recorded);
    if summary.noops > 0 {
        eprintln!("   {} {}", "No-ops:".yellow(), summary.noops);
    }
    eprintln!(
        "   History:   {} of {} (undo {}, redo {})",
        editor.history().current_index(),
        editor.history().len() - 1,
        editor.history().undo_levels(),
        editor.history().redo_levels(),
    );

    Ok(())
}

/// Load `document`, dispatch every intent in `intents`, and report what happened
pub fn replay_source(
    document: &str,
    intents: &str,
    options: EditorOptions,
) -> Result<(Editor, ReplaySummary)> {
    let elements = serializer::from_json(document).context("Invalid document")?;
    let intents = Intent::list_from_json(intents).context("Invalid intent list")?;

    let mut editor = Editor::with_document(elements, options)?;
    let mut summary = ReplaySummary::default();

    for intent in intents {
        summary.dispatched += 1;
        match editor.dispatch(intent) {
            Transition::Recorded { outcome, .. } => {
                summary.recorded += 1;
                if !outcome.is_applied() {
                    summary.noops += 1;
                }
            }
            Transition::Restored { .. } => summary.restored += 1,
            Transition::Ignored => summary.ignored += 1,
            Transition::Applied | Transition::Reset => {}
        }
    }

    Ok((editor, summary))
}
