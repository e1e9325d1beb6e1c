use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `http(s)://`, `git://` and `ssh://` remotes with at least one path segment.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|git|ssh)://[^/\s]+(?:/[^/\s]+)+/?$").expect("valid url regex")
});

/// scp-like SSH remotes: `git@github.com:owner/repo.git`.
static SCP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+:[^\s:]+$").expect("valid scp regex")
});

/// Scheme-less `host.tld/owner/repo`.
static HOST_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w-]+(?:\.[\w-]+)+(?::\d+)?(?:/[^/\s]+){2,}/?$").expect("valid host path regex")
});

/// GitHub shorthand: `owner/repo`.
static SHORTHAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w-]+/[\w.-]+$").expect("valid shorthand regex")
});

/// A plugin identifier together with the git remote it installs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRef {
    pub name: String,
    pub url: String,
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

impl PluginRef {
    /// Parse `input` as a git remote.
    ///
    /// Returns `None` when the input does not look like a remote at all, in
    /// which case the caller treats it as a search keyword.
    pub fn from_git_url(input: &str) -> Option<Self> {
        let input = input.trim();

        let url = if URL_RE.is_match(input) || SCP_RE.is_match(input) {
            input.to_string()
        } else if HOST_PATH_RE.is_match(input) {
            format!("https://{}", input)
        } else if SHORTHAND_RE.is_match(input) {
            format!("https://github.com/{}", input)
        } else {
            return None;
        };

        let url = normalize(&url);
        let name = base_name(&url)?;
        Some(Self { name, url })
    }
}

/// Strip trailing slashes and a `.git` suffix.
fn normalize(url: &str) -> String {
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

fn base_name(url: &str) -> Option<String> {
    let name = url.rsplit(|c: char| c == '/' || c == ':').next()?;
    is_plugin_name(name).then(|| name.to_string())
}

/// Whether `name` can be used as a directory directly under the bundle dir.
pub fn is_plugin_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (String, String) {
        let r = PluginRef::from_git_url(input).unwrap();
        (r.name, r.url)
    }

    #[test]
    fn test_https_url_with_git_suffix() {
        assert_eq!(
            parse("https://example.com/foo/bar.git"),
            ("bar".to_string(), "https://example.com/foo/bar".to_string())
        );
    }

    #[test]
    fn test_http_url_with_trailing_slash() {
        assert_eq!(
            parse("http://git.example.com/vim/vim-surround/"),
            (
                "vim-surround".to_string(),
                "http://git.example.com/vim/vim-surround".to_string()
            )
        );
    }

    #[test]
    fn test_scp_like_ssh() {
        assert_eq!(
            parse("git@github.com:tpope/vim-fugitive.git"),
            (
                "vim-fugitive".to_string(),
                "git@github.com:tpope/vim-fugitive".to_string()
            )
        );
    }

    #[test]
    fn test_ssh_scheme() {
        assert_eq!(
            parse("ssh://git@example.com:2222/team/plugin.git"),
            (
                "plugin".to_string(),
                "ssh://git@example.com:2222/team/plugin".to_string()
            )
        );
    }

    #[test]
    fn test_host_path_gets_https() {
        assert_eq!(
            parse("github.com/x/y"),
            ("y".to_string(), "https://github.com/x/y".to_string())
        );
    }

    #[test]
    fn test_github_shorthand() {
        assert_eq!(
            parse("scrooloose/nerdtree"),
            (
                "nerdtree".to_string(),
                "https://github.com/scrooloose/nerdtree".to_string()
            )
        );
    }

    #[test]
    fn test_keywords_are_not_urls() {
        assert!(PluginRef::from_git_url("nerdtree").is_none());
        assert!(PluginRef::from_git_url("vim airline").is_none());
        assert!(PluginRef::from_git_url("").is_none());
        assert!(PluginRef::from_git_url("https://example.com").is_none());
    }

    #[test]
    fn test_relative_segments_are_not_plugin_names() {
        for input in [
            "https://example.com/foo/..",
            "https://example.com/foo/../",
            "https://example.com/foo/.",
            "github.com/x/.",
            "github.com/x/..",
            "git@github.com:x/..",
            "x/..",
        ] {
            assert!(PluginRef::from_git_url(input).is_none(), "{input}");
        }
    }

    #[test]
    fn test_plugin_names() {
        assert!(is_plugin_name("vim-airline"));
        assert!(is_plugin_name(".vim-hidden"));
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(!is_plugin_name(name), "{name}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse("  github.com/x/y  "),
            ("y".to_string(), "https://github.com/x/y".to_string())
        );
    }
}
