use std::path::Path;
use tracing::debug;

use super::Diagnostic;
use crate::layout::COMMON_FRAGMENT;
use crate::{Error, Result};

/// A config fragment compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub content: &'static str,
}

pub const DEFAULT_FRAGMENTS: &[Asset] = &[
    Asset {
        name: COMMON_FRAGMENT,
        content: include_str!("../../assets/configs/common.vimrc"),
    },
    Asset {
        name: "airline.vimrc",
        content: include_str!("../../assets/configs/airline.vimrc"),
    },
    Asset {
        name: "nerdtree.vimrc",
        content: include_str!("../../assets/configs/nerdtree.vimrc"),
    },
];

/// Write the bundled fragments into `dir`, skipping any file that already
/// exists. Failures are recorded and the remaining assets still written.
pub fn install_defaults(dir: &Path, include_common: bool, diagnostics: &mut Vec<Diagnostic>) {
    for asset in DEFAULT_FRAGMENTS {
        if asset.name == COMMON_FRAGMENT && !include_common {
            continue;
        }
        let path = dir.join(asset.name);
        match write_if_missing(&path, asset.content) {
            Ok(true) => debug!(path = %path.display(), "wrote default fragment"),
            Ok(false) => debug!(path = %path.display(), "keeping existing fragment"),
            Err(error) => diagnostics.push(Diagnostic::new(asset.name, error)),
        }
    }
}

/// Write `content` to `path` unless the file exists. Returns whether it wrote.
pub fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

/// Write `content` to `path`, first renaming an existing file to a dot-file
/// beside it (`dir/name` becomes `dir/.name`).
pub fn replace_with_backup(path: &Path, content: &[u8]) -> Result<()> {
    if path.exists() {
        if let Some(name) = path.file_name() {
            let mut hidden = std::ffi::OsString::from(".");
            hidden.push(name);
            let rotated = path.with_file_name(hidden);
            std::fs::rename(path, &rotated).map_err(|e| Error::FileWrite {
                path: rotated.clone(),
                source: e,
            })?;
        }
    }
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
