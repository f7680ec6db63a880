use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Data directory used when neither the flag nor the config names one.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Log level used when neither `SHELF_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub library: LibrarySection,
    pub librarian: Option<LibrarianSection>,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LibrarySection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibrarianSection {
    pub id: String,
    /// Argon2 PHC string, as printed by `shelf hash-password`
    pub password_hash: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
}

impl ShelfConfig {
    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<ShelfConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Load the config named by `--config`, or the default file if it exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// means "all defaults".
pub fn load_config(cli: &Cli) -> anyhow::Result<ShelfConfig> {
    if let Some(path) = cli.config.as_deref() {
        return read_config(Path::new(path));
    }
    match default_config_path() {
        Ok(path) if path.exists() => read_config(&path),
        _ => Ok(ShelfConfig::default()),
    }
}

/// Flag (or `SHELF_DATA_DIR`) beats the config file, which beats `./data`.
pub fn resolve_data_dir(cli: &Cli, config: &ShelfConfig) -> PathBuf {
    cli.data_dir
        .as_deref()
        .or(config.library.data_dir.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("shelf"));
        }
    }
    Ok(home_dir()?.join(".config").join("shelf"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
