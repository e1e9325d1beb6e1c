mod install;
mod list;
mod remove;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{expand_tilde, Context, Settings, StateStore};
use crate::installer::{GitCli, PluginInstaller};
use crate::resolver::Resolver;
use crate::setup::{self, Diagnostic};
use crate::{console, prereq, Error, Result};

#[derive(Parser)]
#[command(name = "vimpm")]
#[command(about = "Install vim plugins and keep your vimrc in sync with them")]
#[command(version)]
pub struct Cli {
    /// Vim directory (default: ~/.vim)
    #[arg(short = 'd', long, global = true)]
    pub vimdir: Option<PathBuf>,

    /// Path of the generated vimrc (default: ~/.vimrc)
    #[arg(long, visible_alias = "rc", global = true)]
    pub vimrc: Option<PathBuf>,

    /// Update plugins even if they are already installed
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Show git output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Show debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install vim plugin(s) by name, repository path or git URL
    #[command(visible_alias = "i")]
    Install {
        /// Plugins to install
        #[arg(required = true)]
        plugins: Vec<String>,
    },

    /// List installed plugins
    #[command(visible_alias = "ls")]
    List,

    /// Remove installed plugin(s)
    #[command(visible_alias = "rm")]
    Remove {
        /// Plugin names, as shown by `list`
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let settings = Settings::load_global()?;
        let ctx = self.context(&settings, dirs::home_dir(), invoked_name())?;
        debug!(?ctx, "resolved context");

        prereq::check(&prereq::required(&ctx.shell))?;

        let resolver = Resolver::new(&ctx.search_url)?;
        let installer = PluginInstaller::new(&ctx, &resolver, GitCli::new(ctx.verbose));
        let mut state = StateStore::load(ctx.layout.states_file());

        let mut diagnostics = Vec::new();
        let result = setup::run(&ctx, &installer, &mut state).and_then(|report| {
            diagnostics.extend(report.diagnostics);
            match self.command {
                Commands::Install { plugins } => {
                    install::run(&installer, &mut state, &plugins, &mut diagnostics);
                    Ok(())
                }
                Commands::List => list::run(&ctx, &state),
                Commands::Remove { names } => {
                    remove::run(&ctx, &mut state, &names, &mut diagnostics);
                    Ok(())
                }
            }
        });

        if let Err(e) = state.save() {
            diagnostics.push(Diagnostic::new("state", e));
        }
        print_diagnostics(&diagnostics);
        result
    }

    /// Layer command-line flags over the settings file over the defaults.
    fn context(
        &self,
        settings: &Settings,
        home: Option<PathBuf>,
        cmd_name: Option<String>,
    ) -> Result<Context> {
        let pick = |flag: &Option<PathBuf>, setting: &Option<PathBuf>, default: &str| {
            match flag.as_ref().or(setting.as_ref()) {
                Some(path) => Ok(expand_tilde(path, home.as_deref())),
                None => home.as_deref().map(|h| h.join(default)).ok_or(Error::NoHomeDir),
            }
        };
        let vimdir = pick(&self.vimdir, &settings.vimdir, ".vim")?;
        let vimrc = pick(&self.vimrc, &settings.vimrc, ".vimrc")?;

        let mut ctx = Context::new(vimdir, vimrc);
        ctx.home_dir = home;
        ctx.verbose = self.verbose || settings.verbose.unwrap_or(false);
        ctx.force = self.force;
        if let Some(name) = cmd_name {
            ctx.cmd_name = name;
        }
        if let Some(shell) = &settings.shell {
            ctx.shell = shell.clone();
        }
        if let Some(url) = &settings.search_url {
            ctx.search_url = url.clone();
        }
        Ok(ctx)
    }
}

/// File name the binary was started as.
fn invoked_name() -> Option<String> {
    let arg0 = std::env::args_os().next()?;
    Path::new(&arg0)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    console::warn(&format!("{} problem(s) during this run:", diagnostics.len()));
    for d in diagnostics {
        console::item(&format!("{}: {}", d.subject, d.error));
    }
}
