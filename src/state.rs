/// Persisted UI state.
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// State that survives restarts. Saved as JSON next to the executable on
/// exit, loaded on startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiState {
    /// Code of the language that was selected when the app last exited.
    pub language: Option<String>,
}

fn state_file_path(install_dir: &Path) -> PathBuf {
    install_dir.join("state.json")
}

/// Load the persisted state, falling back to the default when no state file
/// exists yet.
pub fn load_state(install_dir: &Path) -> Result<UiState> {
    let path = state_file_path(install_dir);

    if !path.exists() {
        return Ok(UiState::default());
    }

    let content = std::fs::read_to_string(path)?;
    let state: UiState = serde_json::from_str(&content)?;

    Ok(state)
}

/// Save the state to the state file.
pub fn save_state(install_dir: &Path, state: &UiState) -> Result<()> {
    let path = state_file_path(install_dir);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_state_file_yields_default() {
        let dir = tempdir().unwrap();
        let state = load_state(dir.path()).unwrap();
        assert!(state.language.is_none());
    }

    #[test]
    fn test_state_roundtrip() {
        let dir = tempdir().unwrap();
        let state = UiState {
            language: Some("de".to_string()),
        };
        save_state(dir.path(), &state).unwrap();

        let loaded = load_state(dir.path()).unwrap();
        assert_eq!(loaded.language.as_deref(), Some("de"));
    }
}
