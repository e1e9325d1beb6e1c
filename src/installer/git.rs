use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

use crate::{Error, Result};

/// The version-control operations an install needs.
pub trait Vcs {
    /// Fresh clone of `url` into `dest`, which must not exist.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Bring an existing working copy up to date.
    fn pull(&self, repo: &Path) -> Result<()>;

    /// `git submodule update --init --recursive` in `repo`.
    fn update_submodules(&self, repo: &Path) -> Result<()>;
}

/// Whether `dir` is the top of a git working copy.
pub fn is_working_copy(dir: &Path) -> bool {
    git2::Repository::open(dir).is_ok()
}

/// Drives the `git` executable.
///
/// Stdin is always inherited so credential prompts still work; stdout and
/// stderr are only shown in verbose mode.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    verbose: bool,
}

impl GitCli {
    pub fn new(verbose: bool) -> Self {
        Self {
            program: "git".to_string(),
            verbose,
        }
    }

    #[instrument(skip(self), fields(program = %self.program))]
    fn run(&self, args: &[&str]) -> Result<()> {
        let output = || {
            if self.verbose {
                Stdio::inherit()
            } else {
                Stdio::null()
            }
        };

        debug!("spawning git");
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(output())
            .stderr(output())
            .status()
            .map_err(|e| Error::ToolSpawn {
                tool: self.program.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            debug!(%status, "git failed");
            Err(Error::ExternalTool {
                tool: self.program.clone(),
                args: args.iter().map(|a| a.to_string()).collect(),
                status,
            })
        }
    }
}

impl Vcs for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.run(&["clone", url, &dest])
    }

    fn pull(&self, repo: &Path) -> Result<()> {
        let repo = repo.to_string_lossy();
        self.run(&["-C", &repo, "pull"])
    }

    fn update_submodules(&self, repo: &Path) -> Result<()> {
        let repo = repo.to_string_lossy();
        self.run(&["-C", &repo, "submodule", "update", "--init", "--recursive"])
    }
}
