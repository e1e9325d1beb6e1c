mod reference;
mod search;

pub use reference::{is_plugin_name, PluginRef};
pub use search::{PluginSearch, SearchHit, SearchPage};

use tracing::{debug, instrument};

use crate::{Error, Result};

/// Turns user-supplied plugin references into installable git remotes.
pub struct Resolver {
    search: PluginSearch,
}

impl Resolver {
    pub fn new(search_url: &str) -> Result<Self> {
        Ok(Self {
            search: PluginSearch::new(search_url)?,
        })
    }

    /// Resolve `input`: a git remote is used as-is, anything else is looked up
    /// in the plugin directory and the best hit with a git remote wins.
    #[instrument(skip(self))]
    pub fn resolve(&self, input: &str) -> Result<PluginRef> {
        if let Some(plugin) = PluginRef::from_git_url(input) {
            debug!(name = %plugin.name, url = %plugin.url, "reference is a git remote");
            return Ok(plugin);
        }

        let keyword = input.trim();
        if keyword.is_empty() {
            return Err(Error::NameResolution {
                reference: input.to_string(),
                reason: "empty plugin reference".to_string(),
            });
        }

        let page = self
            .search
            .search(keyword, 1)
            .map_err(|e| Error::NameResolution {
                reference: input.to_string(),
                reason: e.to_string(),
            })?;

        pick_hit(&page.plugins).ok_or_else(|| Error::NameResolution {
            reference: input.to_string(),
            reason: if page.plugins.is_empty() {
                "no matching plugin found".to_string()
            } else {
                "no matching plugin has a git repository".to_string()
            },
        })
    }
}

/// First hit, in ranking order, whose source URL parses as a git remote.
fn pick_hit(hits: &[SearchHit]) -> Option<PluginRef> {
    hits.iter().find_map(|hit| {
        let plugin = hit.github_url.as_deref().and_then(PluginRef::from_git_url)?;
        debug!(
            hit = %hit.name,
            author = hit.author.as_deref().unwrap_or("unknown"),
            url = %plugin.url,
            "selected search hit"
        );
        Some(plugin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn hit(name: &str, url: Option<&str>) -> SearchHit {
        SearchHit {
            name: name.to_string(),
            short_desc: None,
            author: None,
            github_url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_pick_hit_skips_hits_without_repository() {
        let hits = vec![
            hit("archive-only", None),
            hit("NERDTree", Some("https://github.com/scrooloose/nerdtree")),
            hit("nerdtree-tabs", Some("https://github.com/jistr/vim-nerdtree-tabs")),
        ];
        let plugin = pick_hit(&hits).unwrap();
        assert_eq!(plugin.name, "nerdtree");
        assert_eq!(plugin.url, "https://github.com/scrooloose/nerdtree");
    }

    #[test]
    fn test_pick_hit_empty() {
        assert!(pick_hit(&[]).is_none());
        assert!(pick_hit(&[hit("archive-only", None)]).is_none());
    }

    #[test]
    fn test_pick_hit_skips_relative_repository_names() {
        let hits = vec![
            hit("dotdot", Some("https://github.com/x/..")),
            hit("dot", Some("https://github.com/x/.")),
            hit("NERDTree", Some("https://github.com/scrooloose/nerdtree")),
        ];
        assert_eq!(pick_hit(&hits).unwrap().name, "nerdtree");
        assert!(pick_hit(&hits[..2]).is_none());
    }

    #[test]
    fn test_resolve_rejects_search_hit_escaping_bundle() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/plugins")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"plugins": [{"name": "evil", "github_url": "https://github.com/x/.."}]}"#)
            .create();

        let resolver = Resolver::new(&format!("{}/api/plugins", server.url())).unwrap();
        let result = resolver.resolve("evil");
        assert!(matches!(result, Err(Error::NameResolution { .. })));
    }

    #[test]
    fn test_resolve_url_without_network() {
        // Unroutable search endpoint: a git URL must never reach it
        let resolver = Resolver::new("http://127.0.0.1:9/api/plugins").unwrap();
        let plugin = resolver.resolve("https://example.com/foo/bar.git").unwrap();
        assert_eq!(plugin.name, "bar");
        assert_eq!(plugin.url, "https://example.com/foo/bar");
    }

    #[test]
    fn test_resolve_keyword_via_search() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/plugins")
            .match_query(Matcher::UrlEncoded("query".into(), "fugitive".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"plugins": [{"name": "fugitive.vim", "author": "Tim Pope",
                    "github_url": "https://github.com/tpope/vim-fugitive"}]}"#,
            )
            .create();

        let resolver = Resolver::new(&format!("{}/api/plugins", server.url())).unwrap();
        let plugin = resolver.resolve("fugitive").unwrap();
        assert_eq!(plugin.name, "vim-fugitive");
        assert_eq!(plugin.url, "https://github.com/tpope/vim-fugitive");
        mock.assert();
    }

    #[test]
    fn test_resolve_keyword_no_results() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/plugins")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"plugins": [], "total_pages": 0}"#)
            .create();

        let resolver = Resolver::new(&format!("{}/api/plugins", server.url())).unwrap();
        let result = resolver.resolve("no-such-plugin");
        assert!(matches!(result, Err(Error::NameResolution { .. })));
    }

    #[test]
    fn test_resolve_keyword_search_failure() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/plugins")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let resolver = Resolver::new(&format!("{}/api/plugins", server.url())).unwrap();
        match resolver.resolve("nerdtree") {
            Err(Error::NameResolution { reference, reason }) => {
                assert_eq!(reference, "nerdtree");
                assert!(reason.contains("503"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
