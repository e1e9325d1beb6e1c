use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Settings file name inside the XDG config directory.
pub const SETTINGS_FILENAME: &str = "config.toml";

/// Optional user defaults, overridden by command-line flags.
///
/// ```toml
/// vimdir = "~/.vim"
/// vimrc = "~/.vimrc"
/// verbose = false
/// shell = "bash"
/// search_url = "https://vimawesome.com/api/plugins"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub vimdir: Option<PathBuf>,
    pub vimrc: Option<PathBuf>,
    pub verbose: Option<bool>,
    pub shell: Option<String>,
    pub search_url: Option<String>,
}

impl Settings {
    /// Get the settings path (~/.config/vimpm/config.toml).
    pub fn global_path() -> Option<PathBuf> {
        let dirs = xdg::BaseDirectories::with_prefix("vimpm");
        dirs.get_config_home().map(|p| p.join(SETTINGS_FILENAME))
    }

    /// Load the user settings, or defaults if there is no settings file.
    pub fn load_global() -> Result<Self> {
        match Self::global_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|reason| Error::SettingsParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Expand a leading `~/` against the home directory.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
