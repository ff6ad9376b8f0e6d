//! Rendered-content acquisition with content-addressed caching.
//!
//! The fetcher is the first pipeline stage: given a URL it either serves the
//! previously rendered blob from the cache store, or runs a rendering
//! session and persists the result before returning it. The cached blob is
//! the recovered doctype, a newline, and the rendered markup, so downstream
//! version detection sees the doctype even though the live DOM does not
//! carry one.

use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheStore, content_key};
use crate::render::Renderer;
use crate::Result;

/// Configuration for content fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Overall render deadline in seconds, covering navigation and content
    /// extraction together.
    pub timeout: u64,
    /// CSS selector whose presence signals the page is ready to snapshot.
    pub ready_selector: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 60, ready_selector: "body".to_string() }
    }
}

/// Obtains fully rendered HTML for a URL, reusing cached renders.
///
/// Both collaborators are injected: the cache store decides where blobs
/// live, the renderer decides how markup is produced. The fetcher itself
/// only sequences them.
///
/// # Example
///
/// ```rust,no_run
/// use sitelens_core::cache::FileCache;
/// use sitelens_core::fetch::{ContentFetcher, FetchConfig};
/// use sitelens_core::render::ChromeRenderer;
///
/// # async fn example() -> sitelens_core::Result<()> {
/// let fetcher = ContentFetcher::new(
///     Box::new(FileCache::default_location()),
///     Box::new(ChromeRenderer::new()),
/// );
/// let html = fetcher.fetch("https://example.com").await?;
/// # Ok(())
/// # }
/// ```
pub struct ContentFetcher {
    cache: Box<dyn CacheStore>,
    renderer: Box<dyn Renderer>,
    config: FetchConfig,
}

impl ContentFetcher {
    /// Creates a fetcher with the default configuration.
    pub fn new(cache: Box<dyn CacheStore>, renderer: Box<dyn Renderer>) -> Self {
        Self::with_config(cache, renderer, FetchConfig::default())
    }

    /// Creates a fetcher with a custom configuration.
    pub fn with_config(cache: Box<dyn CacheStore>, renderer: Box<dyn Renderer>, config: FetchConfig) -> Self {
        Self { cache, renderer, config }
    }

    /// Fetches the rendered HTML for `url`.
    ///
    /// A cache hit is returned verbatim with no re-render and no TTL check.
    /// On a miss the page is rendered, the `doctype + "\n" + markup` blob is
    /// persisted under the URL's content key, and the blob is returned.
    ///
    /// Cache I/O failures, navigation failures, and render timeouts all
    /// propagate as errors; nothing is retried here.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let key = content_key(url);

        if let Some(cached) = self.cache.get(&key)? {
            info!(url, key = %key, "serving rendered content from cache");
            return Ok(String::from_utf8_lossy(&cached).into_owned());
        }

        debug!(url, "cache miss, starting render session");
        let page = self
            .renderer
            .render(url, &self.config.ready_selector, Duration::from_secs(self.config.timeout))
            .await?;

        let blob = format!("{}\n{}", page.doctype, page.html);
        self.cache.put(&key, blob.as_bytes())?;
        info!(url, key = %key, bytes = blob.len(), "cached rendered content");

        Ok(blob)
    }
}
