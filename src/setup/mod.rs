//! Regenerates the vimrc from the config fragments.
//!
//! Every run reads the existing vimrc, preserves it as a fragment if it was
//! hand-written, makes sure the default fragments and the plugin loader
//! exist, installs whatever the fragments require and finally rewrites the
//! vimrc to source each fragment that was processed successfully.

mod assets;
mod fragment;
mod vimrc;

pub use assets::{install_defaults, replace_with_backup, write_if_missing, Asset, DEFAULT_FRAGMENTS};
pub use fragment::{classify, Directive, Fragment};
pub use vimrc::{GeneratedVimrc, LegacyVimrc, GENERATED_MARKER, PATHOGEN_BLOCK};

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::config::{Context, StateStore};
use crate::console;
use crate::installer::{ensure_downloaded, run_script, InstallOutcome, PluginInstaller, Vcs};
use crate::layout::COMMON_FRAGMENT;
use crate::{Error, Result};

/// A failure that did not stop the run.
#[derive(Debug)]
pub struct Diagnostic {
    pub subject: String,
    pub error: Error,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, error: Error) -> Self {
        Self {
            subject: subject.into(),
            error,
        }
    }
}

/// What a setup pass did.
#[derive(Debug, Default)]
pub struct Report {
    /// Fragments sourced by the new vimrc, in order.
    pub sourced: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the whole setup pass.
///
/// Errors returned from here are fatal: the managed directories, the plugin
/// loader and the vimrc itself must all be usable. Everything that concerns a
/// single fragment or asset is recorded in the report instead.
#[instrument(skip_all, fields(vimrc = %ctx.vimrc_path.display()))]
pub fn run<V: Vcs>(
    ctx: &Context,
    installer: &PluginInstaller<'_, V>,
    state: &mut StateStore,
) -> Result<Report> {
    let layout = &ctx.layout;
    layout.ensure_dirs()?;

    let mut report = Report::default();

    let legacy = LegacyVimrc::read(&ctx.vimrc_path)?;
    let generated = legacy.as_ref().is_none_or(|l| l.generated);
    debug!(exists = legacy.is_some(), generated, "inspected existing vimrc");

    if ensure_downloaded(&ctx.pathogen_url, &layout.pathogen_vim())? {
        console::info("installed pathogen");
    }

    // Set when the hand-written vimrc could not be saved; it is then the
    // only copy and must not be overwritten.
    let mut keep_vimrc = false;
    match legacy {
        Some(legacy) if !legacy.generated => {
            if !legacy.backup.is_empty() {
                let backup = layout.legacy_backup();
                match replace_with_backup(&backup, &legacy.backup) {
                    Ok(()) => console::info(&format!(
                        "saved your previous vimrc to {}",
                        ctx.display_path(&backup)
                    )),
                    Err(e) => {
                        keep_vimrc = true;
                        report
                            .diagnostics
                            .push(Diagnostic::new(ctx.display_path(&backup), e));
                    }
                }
            }
            install_defaults(layout.configs_dir(), false, &mut report.diagnostics);
        }
        _ => install_defaults(layout.configs_dir(), true, &mut report.diagnostics),
    }

    let mut vimrc = GeneratedVimrc::new(ctx);

    let common = layout.common_fragment();
    if common.is_file() {
        apply_fragment(ctx, installer, state, &common, &mut vimrc, &mut report);
    }

    let backup = layout.legacy_backup();
    if backup.is_file() {
        vimrc.source(&ctx.display_path(&backup));
        report.sourced.push(backup);
    }

    for path in list_fragments(layout.configs_dir())? {
        apply_fragment(ctx, installer, state, &path, &mut vimrc, &mut report);
    }

    if keep_vimrc {
        console::warn(&format!(
            "{} was not regenerated because your previous vimrc could not be saved",
            ctx.display_path(&ctx.vimrc_path)
        ));
    } else {
        vimrc.write_to(&ctx.vimrc_path)?;
        debug!(sourced = report.sourced.len(), "vimrc written");
    }
    Ok(report)
}

/// Process one fragment and source it if everything it asks for worked.
fn apply_fragment<V: Vcs>(
    ctx: &Context,
    installer: &PluginInstaller<'_, V>,
    state: &mut StateStore,
    path: &Path,
    vimrc: &mut GeneratedVimrc,
    report: &mut Report,
) {
    let shown = ctx.display_path(path);
    match process_fragment(ctx, installer, state, path) {
        Ok(()) => {
            vimrc.source(&shown);
            report.sourced.push(path.to_path_buf());
        }
        Err(e) => {
            console::error(&format!("skipping {}: {}", shown, e));
            report.diagnostics.push(Diagnostic::new(shown, e));
        }
    }
}

/// Install the fragment's plugins, then run its script.
///
/// Stops at the first failure.
#[instrument(skip(ctx, installer, state))]
pub fn process_fragment<V: Vcs>(
    ctx: &Context,
    installer: &PluginInstaller<'_, V>,
    state: &mut StateStore,
    path: &Path,
) -> Result<()> {
    let fragment = Fragment::load(path)?;
    debug!(plugins = fragment.plugins.len(), script = !fragment.script.is_empty(), "scanned fragment");

    for reference in &fragment.plugins {
        let (plugin, outcome) = installer.install(reference, state)?;
        match outcome {
            InstallOutcome::Cloned => console::success(&format!("installed {}", plugin)),
            InstallOutcome::Updated => console::success(&format!("updated {}", plugin)),
            InstallOutcome::AlreadyInstalled => debug!(name = %plugin.name, "already installed"),
        }
    }

    if !fragment.script.is_empty() {
        run_script(ctx, &fragment.script)?;
    }

    Ok(())
}

/// Regular files in `dir` that take part in sourcing, sorted by name.
///
/// The common fragment is handled separately; `_`-prefixed files are
/// internal and dot-files are rotated backups.
pub fn list_fragments(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |e: std::io::Error| Error::FileRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut fragments = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!(name = ?name, "skipping non UTF-8 file name");
            continue;
        };
        if name.starts_with('_') || name.starts_with('.') || name == COMMON_FRAGMENT {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            fragments.push(path);
        }
    }
    fragments.sort();
    Ok(fragments)
}
