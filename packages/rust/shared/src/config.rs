//! Application configuration for mdattrs.
//!
//! User config lives at `~/.mdattrs/mdattrs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdAttrsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdattrs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdattrs";

// ---------------------------------------------------------------------------
// Config structs (matching mdattrs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Rendering settings.
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

/// `[markdown]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Apply title attributes to images.
    #[serde(default = "default_true")]
    pub images: bool,

    /// Apply title attributes to links.
    #[serde(default = "default_true")]
    pub links: bool,

    /// GitHub-style tables.
    #[serde(default = "default_true")]
    pub tables: bool,

    /// Footnote references and definitions.
    #[serde(default)]
    pub footnotes: bool,

    /// `~~strikethrough~~`.
    #[serde(default = "default_true")]
    pub strikethrough: bool,

    /// `- [x]` task list items.
    #[serde(default)]
    pub tasklists: bool,

    /// Curly quotes, dashes and ellipses.
    #[serde(default)]
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            images: true,
            links: true,
            tables: true,
            footnotes: false,
            strikethrough: true,
            tasklists: false,
            smart_punctuation: false,
        }
    }
}

impl MarkdownConfig {
    /// Whether title attributes are applied to anything at all.
    pub fn title_attributes_enabled(&self) -> bool {
        self.images || self.links
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdattrs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdAttrsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdattrs/mdattrs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdAttrsError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        MdAttrsError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(?path, "loaded config");
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, creating it if needed.
/// An existing file is left alone.
pub(crate) fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| MdAttrsError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        tracing::info!(?path, "config file already exists");
        return Ok(path);
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| MdAttrsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MdAttrsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
