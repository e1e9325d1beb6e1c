use regex::bytes::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::Context;
use crate::{Error, Result};

/// Prefix of the first line that marks a vimrc as ours.
pub const GENERATED_MARKER: &str = "\" THIS FILE IS GENERATED BY ";

/// The plugin-loader block every generated vimrc carries exactly once.
pub const PATHOGEN_BLOCK: &str = r#"
" Plugin loader (github.com/tpope/vim-pathogen)
execute pathogen#infect()
syntax on
filetype plugin indent on

"#;

// Matched on raw bytes; a legacy vimrc need not be UTF-8.
static PATHOGEN_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*exec(?:ute)?\s+pathogen#").expect("valid pathogen call regex")
});

/// A vimrc found on disk before this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyVimrc {
    /// The original bytes with every pathogen call commented out.
    pub backup: Vec<u8>,
    /// Whether the file carries the generated marker.
    pub generated: bool,
}

impl LegacyVimrc {
    /// Read the vimrc at `path`, or `None` if there is none.
    ///
    /// The file is not required to be UTF-8; vimrcs written for latin1
    /// terminals are passed through untouched.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Some(Self::parse(&content)))
    }

    pub fn parse(content: &[u8]) -> Self {
        let mut backup = Vec::with_capacity(content.len());
        let mut generated = false;

        for line in content.split_inclusive(|b| *b == b'\n') {
            if PATHOGEN_CALL_RE.is_match(line) {
                backup.extend_from_slice(b"\" ");
            }
            if line.starts_with(GENERATED_MARKER.as_bytes()) {
                generated = true;
            }
            backup.extend_from_slice(line);
            if !line.ends_with(b"\n") {
                backup.push(b'\n');
            }
        }

        Self { backup, generated }
    }
}

/// The vimrc being assembled for this run.
#[derive(Debug, Clone)]
pub struct GeneratedVimrc {
    buf: String,
}

impl GeneratedVimrc {
    /// Start with the header and the plugin-loader block.
    pub fn new(ctx: &Context) -> Self {
        let mut buf = header(
            &ctx.cmd_name,
            &ctx.display_path(ctx.layout.configs_dir()),
            &ctx.display_path(ctx.layout.bundle_dir()),
        );
        buf.push_str(PATHOGEN_BLOCK);
        Self { buf }
    }

    /// Append a `source` line for an already-rendered path.
    pub fn source(&mut self, path: &str) {
        self.buf.push_str("source ");
        self.buf.push_str(path);
        self.buf.push('\n');
    }

    pub fn finish(mut self) -> String {
        self.buf.push('\n');
        self.buf
    }

    /// Replace whatever is at `path` with the finished buffer.
    pub fn write_to(self, path: &Path) -> Result<()> {
        std::fs::write(path, self.finish()).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn header(cmd: &str, configs_dir: &str, bundle_dir: &str) -> String {
    format!(
        r#"
{marker}'{cmd}'
" Any change made here is lost on the next run.
"
" Edit the config fragments in {configs_dir} instead: every
" file there is sourced below, in name order.
"
" Plugins live in {bundle_dir} and are loaded by pathogen.
" Install more with:
"	{cmd} install <plugin> [<plugin>...]
"
" Fragments can pull in plugins and run install steps themselves:
"	" @require-plugin: github.com/owner/repo
"	" @run-script
"	" make -C "$VIMBUNDLEDIR/repo"
"	" @end-script
"
" Run '{cmd} -h' for more.
"
"#,
        marker = GENERATED_MARKER,
    )
}
