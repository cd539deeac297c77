use easel_editor::EditorOptions;
use easel_model::Device;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "easel.config.json";

/// Easel configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Maximum number of undo snapshots kept (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Breakpoint the editor starts on
    #[serde(default)]
    pub default_device: Device,

    /// Key the generated node ids are seeded from
    #[serde(default = "default_id_seed")]
    pub id_seed: String,
}

fn default_id_seed() -> String {
    "easel".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            history_limit: self.history_limit,
            id_seed: self.id_seed.clone(),
            default_device: self.default_device,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: 0,
            default_device: Device::Desktop,
            id_seed: default_id_seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "historyLimit": 50,
            "defaultDevice": "mobile",
            "idSeed": "landing-page"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.default_device, Device::Mobile);
        assert_eq!(config.id_seed, "landing-page");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.id_seed, "easel");
    }

    #[test]
    fn test_editor_options() {
        let config = Config {
            history_limit: 10,
            ..Config::default()
        };
        let options = config.editor_options();
        assert_eq!(options.history_limit, 10);
        assert_eq!(options.default_device, Device::Desktop);
    }

    #[test]
    fn test_load_without_file_is_default() {
        let dir = std::env::temp_dir().join("easel-config-missing");
        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
