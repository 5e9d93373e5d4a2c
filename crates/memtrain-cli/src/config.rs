//! Front-end configuration loaded from `memtrain.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "memtrain.toml";

/// Terminal front-end preferences. Table settings live in the table itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Clear the terminal before each question.
    #[serde(default)]
    pub clear_screen: bool,
    /// Width used when wrapping long summary lines.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    /// Seed for the question order when `--seed` is not given.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_wrap_width() -> usize {
    80
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            clear_screen: false,
            wrap_width: default_wrap_width(),
            seed: None,
        }
    }
}

/// Load config from an explicit path, or `./memtrain.toml` if present.
pub fn load_config_from(path: Option<&Path>) -> Result<CliConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()),
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CliConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CliConfig::default(),
    };

    tracing::debug!(?config, "loaded front-end config");
    Ok(config)
}
