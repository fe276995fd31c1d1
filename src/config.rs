/// Application configuration.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Path-like settings of the app. Relative values are resolved against the
/// directory the executable lives in (the install directory); absolute
/// values are taken as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File name of the database.
    pub db_name: String,
    /// Directory holding the database.
    pub db_dir: String,
    /// Directory holding the `strings.<code>.toml` language files.
    pub languages_dir: String,
    /// Directory holding one icon per language code.
    pub icons_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_name: "records.db".to_string(),
            db_dir: "data".to_string(),
            languages_dir: "languages".to_string(),
            icons_dir: "icons".to_string(),
        }
    }
}

impl Config {
    pub fn db_path(&self, install_dir: &Path) -> PathBuf {
        resolve(install_dir, &self.db_dir).join(&self.db_name)
    }

    pub fn languages_path(&self, install_dir: &Path) -> PathBuf {
        resolve(install_dir, &self.languages_dir)
    }

    pub fn icons_path(&self, install_dir: &Path) -> PathBuf {
        resolve(install_dir, &self.icons_dir)
    }
}

fn resolve(install_dir: &Path, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        install_dir.join(path)
    }
}

/// Directory the running executable lives in.
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn config_path(install_dir: &Path) -> PathBuf {
    install_dir.join("config.toml")
}

/// Load the configuration, writing the defaults on first run.
pub fn load_config(install_dir: &Path) -> Result<Config> {
    let path = config_path(install_dir);

    if !path.exists() {
        let config = Config::default();
        save_config(install_dir, &config)?;
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;

    Ok(config)
}

/// Save the configuration.
pub fn save_config(install_dir: &Path, config: &Config) -> Result<()> {
    let path = config_path(install_dir);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
