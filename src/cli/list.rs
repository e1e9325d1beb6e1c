use std::path::Path;
use tracing::debug;

use crate::config::{Context, StateStore};
use crate::{console, Error, Result};

/// One directory under the bundle directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub name: String,
    /// `origin` remote, if the directory is a git working copy.
    pub origin: Option<String>,
    pub installed: bool,
}

/// List installed plugins.
pub fn run(ctx: &Context, state: &StateStore) -> Result<()> {
    let entries = scan(ctx.layout.bundle_dir(), state)?;

    println!("Plugins in {}:", ctx.display_path(ctx.layout.bundle_dir()));
    if entries.is_empty() {
        console::item("(none)");
    }
    for entry in &entries {
        let mut parts = vec![entry.name.clone()];
        if let Some(origin) = &entry.origin {
            parts.push(format!("({})", origin));
        }
        if !entry.installed {
            parts.push("[untracked]".to_string());
        }
        console::item(&parts.join(" "));
    }
    Ok(())
}

/// Sorted plugin directories under `bundle_dir`.
pub fn scan(bundle_dir: &Path, state: &StateStore) -> Result<Vec<BundleEntry>> {
    let read_err = |e: std::io::Error| Error::FileRead {
        path: bundle_dir.to_path_buf(),
        source: e,
    };

    let mut entries = Vec::new();
    for dirent in std::fs::read_dir(bundle_dir).map_err(read_err)? {
        let dirent = dirent.map_err(read_err)?;
        if !dirent.path().is_dir() {
            continue;
        }
        let name = dirent.file_name().to_string_lossy().to_string();
        entries.push(BundleEntry {
            origin: origin_url(&dirent.path()),
            installed: state.get_bool(&name),
            name,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn origin_url(dir: &Path) -> Option<String> {
    let repo = git2::Repository::open(dir).ok()?;
    let remote = match repo.find_remote("origin") {
        Ok(remote) => remote,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "no origin remote");
            return None;
        }
    };
    remote.url().map(str::to_string)
}
