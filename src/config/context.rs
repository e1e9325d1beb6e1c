use std::path::{Path, PathBuf};

use crate::layout::VimLayout;

/// Default plugin search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://vimawesome.com/api/plugins";

/// Where the plugin loader is bootstrapped from.
pub const PATHOGEN_VIM_URL: &str =
    "https://raw.githubusercontent.com/tpope/vim-pathogen/master/autoload/pathogen.vim";

/// Paths and flags for one run, passed by reference to every operation.
#[derive(Debug, Clone)]
pub struct Context {
    pub layout: VimLayout,
    pub vimrc_path: PathBuf,
    /// Name the tool was invoked as, rendered into the generated header.
    pub cmd_name: String,
    /// Used to shorten sourced paths to `~/...`.
    pub home_dir: Option<PathBuf>,
    /// Show git output instead of discarding it.
    pub verbose: bool,
    /// Reinstall plugins even when the state store says they are present.
    pub force: bool,
    /// Interpreter for fragment install scripts.
    pub shell: String,
    pub search_url: String,
    pub pathogen_url: String,
}

impl Context {
    pub fn new(vim_dir: impl Into<PathBuf>, vimrc_path: impl Into<PathBuf>) -> Self {
        Self {
            layout: VimLayout::new(vim_dir),
            vimrc_path: vimrc_path.into(),
            cmd_name: env!("CARGO_PKG_NAME").to_string(),
            home_dir: None,
            verbose: false,
            force: false,
            shell: "bash".to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            pathogen_url: PATHOGEN_VIM_URL.to_string(),
        }
    }

    /// Render `path` the way it should appear in the generated vimrc.
    pub fn display_path(&self, path: &Path) -> String {
        if let Some(home) = &self.home_dir {
            if let Ok(rest) = path.strip_prefix(home) {
                return format!("~/{}", rest.display());
            }
        }
        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_under_home() {
        let mut ctx = Context::new("/home/me/.vim", "/home/me/.vimrc");
        ctx.home_dir = Some(PathBuf::from("/home/me"));

        assert_eq!(
            ctx.display_path(Path::new("/home/me/.vim/configs/common.vimrc")),
            "~/.vim/configs/common.vimrc"
        );
    }

    #[test]
    fn test_display_path_outside_home() {
        let mut ctx = Context::new("/opt/vim", "/opt/vimrc");
        ctx.home_dir = Some(PathBuf::from("/home/me"));

        assert_eq!(
            ctx.display_path(Path::new("/opt/vim/configs/a.vimrc")),
            "/opt/vim/configs/a.vimrc"
        );
    }

    #[test]
    fn test_display_path_sibling_prefix_is_not_home() {
        let mut ctx = Context::new("/home/me/.vim", "/home/me/.vimrc");
        ctx.home_dir = Some(PathBuf::from("/home/me"));

        // Component-wise prefix, not string prefix
        assert_eq!(
            ctx.display_path(Path::new("/home/meg/.vim/configs/a.vimrc")),
            "/home/meg/.vim/configs/a.vimrc"
        );
    }
}
