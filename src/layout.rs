use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// File name of the fragment that is always sourced first.
pub const COMMON_FRAGMENT: &str = "common.vimrc";

/// File name the pre-existing hand-written vimrc is preserved under.
pub const LEGACY_BACKUP_FRAGMENT: &str = "_old_config.vimrc";

/// Encapsulates the managed vim directory structure conventions.
///
/// Provides lazy-cached path accessors for the locations under the vim root:
/// - `bundle/` - one git working copy per installed plugin
/// - `autoload/` - holds the bootstrapped `pathogen.vim`
/// - `configs/` - the config fragments sourced by the generated vimrc
/// - `states.json` - the persisted install-state map
#[derive(Debug)]
pub struct VimLayout {
    base_path: PathBuf,
    bundle_dir: OnceCell<PathBuf>,
    autoload_dir: OnceCell<PathBuf>,
    configs_dir: OnceCell<PathBuf>,
    states_file: OnceCell<PathBuf>,
}

impl Clone for VimLayout {
    fn clone(&self) -> Self {
        // Clone the base_path, create fresh cells (paths will be recomputed lazily)
        Self::new(self.base_path.clone())
    }
}

impl VimLayout {
    /// Create a new VimLayout rooted at the given vim directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            bundle_dir: OnceCell::new(),
            autoload_dir: OnceCell::new(),
            configs_dir: OnceCell::new(),
            states_file: OnceCell::new(),
        }
    }

    /// Returns reference to the vim root directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns reference to the bundle directory path.
    pub fn bundle_dir(&self) -> &Path {
        self.bundle_dir.get_or_init(|| self.base_path.join("bundle"))
    }

    /// Returns reference to the autoload directory path.
    pub fn autoload_dir(&self) -> &Path {
        self.autoload_dir
            .get_or_init(|| self.base_path.join("autoload"))
    }

    /// Returns reference to the config fragment directory path.
    pub fn configs_dir(&self) -> &Path {
        self.configs_dir
            .get_or_init(|| self.base_path.join("configs"))
    }

    /// Returns reference to the state file path.
    pub fn states_file(&self) -> &Path {
        self.states_file
            .get_or_init(|| self.base_path.join("states.json"))
    }

    /// Path of the bootstrapped plugin loader.
    pub fn pathogen_vim(&self) -> PathBuf {
        self.autoload_dir().join("pathogen.vim")
    }

    /// Install directory for a single plugin.
    pub fn plugin_dir(&self, name: &str) -> PathBuf {
        self.bundle_dir().join(name)
    }

    pub fn common_fragment(&self) -> PathBuf {
        self.configs_dir().join(COMMON_FRAGMENT)
    }

    pub fn legacy_backup(&self) -> PathBuf {
        self.configs_dir().join(LEGACY_BACKUP_FRAGMENT)
    }

    /// Ensure the managed directories exist.
    pub fn ensure_dirs(&self) -> crate::Result<()> {
        for dir in [self.bundle_dir(), self.autoload_dir(), self.configs_dir()] {
            std::fs::create_dir_all(dir).map_err(|e| crate::Error::DirCreate {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
