//! Directive extraction from config fragments.
//!
//! Fragments are plain vimrc files. Directives hide in vim comments so the
//! fragment stays valid vimscript:
//!
//! ```vim
//! " @require-plugin: github.com/scrooloose/nerdtree
//! " @run-script
//! " make -C "$VIMBUNDLEDIR/vimproc.vim"
//! " @end-script
//! ```

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::{Error, Result};

static SCRIPT_BEGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"\s+@run-script\s*(?:\(([^)]*)\))?"#).expect("valid script begin regex")
});
static SCRIPT_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"\s+@end-script"#).expect("valid script end regex"));
static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"\s+@require(?:-plugin)?\s*:\s*(.*)"#).expect("valid require regex")
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"(.*)"#).expect("valid comment regex"));

/// How a single fragment line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `" @run-script` with its optional parenthesized argument.
    ScriptBegin(Option<&'a str>),
    ScriptEnd,
    RequirePlugin(&'a str),
    /// Any other comment; holds the text after the `"`.
    Comment(&'a str),
    Other,
}

/// Classify one line. Earlier shapes win over later ones.
pub fn classify(line: &str) -> Directive<'_> {
    if let Some(caps) = SCRIPT_BEGIN_RE.captures(line) {
        return Directive::ScriptBegin(caps.get(1).map(|m| m.as_str()));
    }
    if SCRIPT_END_RE.is_match(line) {
        return Directive::ScriptEnd;
    }
    if let Some(caps) = REQUIRE_RE.captures(line) {
        let plugin = caps.get(1).map_or("", |m| m.as_str().trim());
        if plugin.is_empty() {
            return Directive::Other;
        }
        return Directive::RequirePlugin(plugin);
    }
    if let Some(caps) = COMMENT_RE.captures(line) {
        return Directive::Comment(caps.get(1).map_or("", |m| m.as_str()));
    }
    Directive::Other
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsideScript,
}

/// The directives extracted from one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub path: PathBuf,
    /// Plugin references in declaration order.
    pub plugins: Vec<String>,
    /// Concatenated script lines, each newline-terminated; empty if none.
    pub script: String,
}

impl Fragment {
    /// Read and scan the fragment at `path`.
    ///
    /// Bytes that are not UTF-8 are replaced before scanning; directives
    /// themselves are plain ASCII.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut fragment = Self::parse(&String::from_utf8_lossy(&content));
        fragment.path = path.to_path_buf();
        Ok(fragment)
    }

    /// Scan fragment text in a single pass.
    ///
    /// Plugin requirements count anywhere, including inside a script region.
    /// A script region that is never closed runs to the end of the text.
    pub fn parse(content: &str) -> Self {
        let mut fragment = Self::default();
        let mut state = ScanState::Outside;

        for line in content.lines() {
            match (classify(line), state) {
                (Directive::ScriptBegin(_), _) => state = ScanState::InsideScript,
                (Directive::ScriptEnd, _) => state = ScanState::Outside,
                (Directive::RequirePlugin(plugin), _) => fragment.plugins.push(plugin.to_string()),
                (Directive::Comment(text), ScanState::InsideScript) => {
                    fragment.script.push_str(text);
                    fragment.script.push('\n');
                }
                (Directive::Comment(_), ScanState::Outside) | (Directive::Other, _) => {}
            }
        }

        fragment
    }
}
