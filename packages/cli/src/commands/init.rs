use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use easel_model::{serializer, Device, Node, NodeKind};
use std::fs;
use std::path::{Path, PathBuf};

pub const EXAMPLE_DOCUMENT_NAME: &str = "page.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Breakpoint the editor starts on (desktop, tablet, mobile)
    #[arg(short, long, default_value = "desktop")]
    pub device: Device,

    /// Maximum number of undo snapshots (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub history_limit: usize,

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

    println!("{}", "📝 Initializing Easel project...".bright_blue().bold());

    let config = Config {
        history_limit: args.history_limit,
        default_device: args.device,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if write_example_document(Path::new(cwd))? {
        println!("  {} Created {}", "✓".green(), EXAMPLE_DOCUMENT_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: easel check {}", EXAMPLE_DOCUMENT_NAME);
    println!("  2. Run: easel resolve {} --device mobile", EXAMPLE_DOCUMENT_NAME);

    Ok(())
}

/// Write a small starter page unless one is already there
fn write_example_document(dir: &Path) -> Result<bool> {
    let path = dir.join(EXAMPLE_DOCUMENT_NAME);
    if path.exists() {
        return Ok(false);
    }

    fs::write(&path, serializer::to_json_pretty(&example_document())?)?;
    Ok(true)
}

fn example_document() -> Vec<Node> {
    let hero = Node::new("hero", NodeKind::Section)
        .with_style("padding", "64px")
        .with_responsive_style(Device::Mobile, "padding", "16px")
        .with_child(
            Node::new("headline", NodeKind::Text)
                .with_style("fontSize", "48px")
                .with_responsive_style(Device::Mobile, "fontSize", "28px")
                .with_field("innerText", "Welcome to our site")
                .with_responsive_field(Device::Mobile, "innerText", "Welcome"),
        )
        .with_child(
            Node::new("cta", NodeKind::Button)
                .with_field("innerText", "Get started")
                .with_field("href", "#signup"),
        );

    vec![Node::body().with_child(hero)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_model::validate;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("easel-init-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_example_document_is_valid() {
        assert!(validate(&example_document()).is_ok());
    }

    #[test]
    fn test_init_writes_config_and_example() {
        let dir = scratch_dir("fresh");
        let cwd = dir.display().to_string();

        init(
            InitArgs {
                device: Device::Tablet,
                history_limit: 25,
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.default_device, Device::Tablet);

        let page = fs::read_to_string(dir.join(EXAMPLE_DOCUMENT_NAME)).unwrap();
        assert!(serializer::from_json(&page).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = scratch_dir("existing");
        let cwd = dir.display().to_string();
        fs::write(dir.join(DEFAULT_CONFIG_NAME), r#"{ "historyLimit": 3 }"#).unwrap();

        init(
            InitArgs {
                device: Device::Desktop,
                history_limit: 0,
                force: false,
            },
            &cwd,
        )
        .unwrap();
        assert_eq!(Config::load(&cwd).unwrap().history_limit, 3);

        fs::remove_dir_all(&dir).unwrap();
    }
}
