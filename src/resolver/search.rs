use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::{Error, Result};

/// One candidate returned by the plugin directory.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub name: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Source-control URL, absent for plugins only published as archives.
    #[serde(default)]
    pub github_url: Option<String>,
}

/// One page of search results, best match first.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub plugins: Vec<SearchHit>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Blocking client for the remote plugin directory.
pub struct PluginSearch {
    client: Client,
    url: String,
}

impl PluginSearch {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network {
                url: url.clone(),
                source: e,
            })?;
        Ok(Self { client, url })
    }

    /// Fetch one page of results for `query`.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn search(&self, query: &str, page: u32) -> Result<SearchPage> {
        debug!("querying plugin directory");
        let page_param = page.to_string();
        let resp = self
            .client
            .get(&self.url)
            .query(&[("query", query), ("page", page_param.as_str())])
            .send()
            .map_err(|e| Error::Network {
                url: self.url.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%status, "search request rejected");
            return Err(Error::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let parsed: SearchPage = resp.json().map_err(|e| Error::Network {
            url: self.url.clone(),
            source: e,
        })?;

        debug!(hits = parsed.plugins.len(), total_pages = parsed.total_pages, "search complete");
        trace!(names = ?parsed.plugins.iter().map(|h| &h.name).collect::<Vec<_>>(), "search hits");
        Ok(parsed)
    }
}
