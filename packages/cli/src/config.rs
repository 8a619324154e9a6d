use choicetext_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "choicetext.config.json";

/// Choicetext configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory searched by `check` when no input is given
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// File extension of choice-text files (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Parser, counter and history settings
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_extension() -> String {
    "choice".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            extension: default_extension(),
            editor: EditorConfig::default(),
        }
    }
}
