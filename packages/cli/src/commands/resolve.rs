use anyhow::{anyhow, Context, Result};
use clap::Args;
use easel_editor::responsive::{overridden_properties, resolve_node};
use easel_editor::resolve_tree;
use easel_model::{serializer, tree, Device};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Stored document (JSON element list or body object)
    pub document: PathBuf,

    /// Breakpoint to resolve for (desktop, tablet, mobile)
    #[arg(short, long, default_value = "desktop")]
    pub device: Device,

    /// Resolve a single node instead of the whole tree
    #[arg(short, long)]
    pub node: Option<String>,
}

pub fn resolve(args: ResolveArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.document);
    let source =
        fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;

    let resolved = resolve_source(&source, args.device, args.node.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);

    Ok(())
}

/// Resolved JSON for a whole document, or for one node with its overridden
/// style properties listed
pub fn resolve_source(source: &str, device: Device, node_id: Option<&str>) -> Result<Value> {
    let elements = serializer::from_json(source).context("Invalid document")?;

    match node_id {
        None => Ok(serde_json::to_value(resolve_tree(&elements, device))?),
        Some(id) => {
            let node = tree::find(&elements, id).ok_or_else(|| anyhow!("No node with id {}", id))?;
            Ok(json!({
                "device": device,
                "node": resolve_node(node, device),
                "overridden": overridden_properties(node, device),
            }))
        }
    }
}
