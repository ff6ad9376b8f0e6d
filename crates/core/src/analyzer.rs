//! Main web-page analysis API.
//!
//! This module provides the primary entry point for running a full
//! analysis. The main type is [`Analyzer`], along with the convenience
//! function [`analyze_url`].
//!
//! An analysis is a strictly sequential pipeline: fetch the rendered
//! content, parse it, extract structure, resolve and classify links, probe
//! their reachability, assemble the result. The first fatal error aborts
//! the run; individual unreachable links are result data, not errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitelens_core::analyze_url;
//!
//! # async fn example() -> sitelens_core::Result<()> {
//! let analysis = analyze_url("https://example.com").await?;
//! println!("{} headings, {} internal links", analysis.headings_count, analysis.internal_links_count);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use tracing::info;
use url::Url;

use crate::cache::CacheStore;
use crate::dom::Document;
use crate::fetch::{ContentFetcher, FetchConfig};
use crate::links::resolve_links;
use crate::probe::{LinkProber, ProbeConfig, ProbeTransport, PROBE_USER_AGENT};
use crate::render::Renderer;
use crate::report::Analysis;
use crate::version::HtmlVersion;
use crate::{Result, SitelensError};

/// Checks whether a URL string is acceptable input for analysis.
///
/// Requires an `http`/`https` scheme and a dotted host, optionally followed
/// by a port and path. The request-handling layer validates too; the
/// pipeline refuses malformed input regardless.
///
/// # Example
///
/// ```rust
/// use sitelens_core::analyzer::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(!is_valid_url("ftp://example.com"));
/// assert!(!is_valid_url("example.com"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    let pattern = Regex::new(r"^https?://[A-Za-z0-9.-]+\.[A-Za-z]{2,}(:\d+)?(/.*)?$").unwrap();
    pattern.is_match(url)
}

/// Configuration for the analysis pipeline.
///
/// # Example
///
/// ```rust
/// use sitelens_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .fetch_timeout(30)
///     .probe_concurrency(5)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Render deadline in seconds (default: 60).
    pub fetch_timeout: u64,

    /// Readiness selector awaited before snapshotting (default: `body`).
    pub ready_selector: String,

    /// Maximum in-flight reachability probes (default: 10).
    pub probe_concurrency: usize,

    /// Per-probe deadline in seconds (default: 3).
    pub probe_timeout: u64,

    /// User-Agent sent with probe requests.
    pub user_agent: String,

    /// Cache directory override (default: platform cache dir).
    pub cache_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: 60,
            ready_selector: "body".to_string(),
            probe_concurrency: 10,
            probe_timeout: 3,
            user_agent: PROBE_USER_AGENT.to_string(),
            cache_dir: None,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
///
/// Provides a fluent API for configuring the pipeline.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the render deadline in seconds.
    pub fn fetch_timeout(mut self, value: u64) -> Self {
        self.config.fetch_timeout = value;
        self
    }

    /// Sets the readiness selector.
    pub fn ready_selector(mut self, value: impl Into<String>) -> Self {
        self.config.ready_selector = value.into();
        self
    }

    /// Sets the probe concurrency limit.
    pub fn probe_concurrency(mut self, value: usize) -> Self {
        self.config.probe_concurrency = value;
        self
    }

    /// Sets the per-probe deadline in seconds.
    pub fn probe_timeout(mut self, value: u64) -> Self {
        self.config.probe_timeout = value;
        self
    }

    /// Sets the probe User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Sets the cache directory.
    pub fn cache_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = Some(value.into());
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs web-page analyses.
///
/// The fetcher (cache + renderer) and prober (transport) are wired from the
/// configuration, or injected explicitly via [`Analyzer::with_parts`] for
/// embedding and testing.
pub struct Analyzer {
    fetcher: ContentFetcher,
    prober: LinkProber,
}

impl Analyzer {
    /// Creates an analyzer with default configuration: headless-Chrome
    /// rendering, a file cache in the platform cache directory, and HTTP
    /// HEAD probing.
    #[cfg(feature = "render")]
    pub fn new() -> Result<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    #[cfg(feature = "render")]
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        use crate::cache::FileCache;
        use crate::render::ChromeRenderer;

        let cache: Box<dyn CacheStore> = match &config.cache_dir {
            Some(dir) => Box::new(FileCache::new(dir)),
            None => Box::new(FileCache::default_location()),
        };
        Self::with_parts(cache, Box::new(ChromeRenderer::new()), None, config)
    }

    /// Creates an analyzer from explicit collaborators.
    ///
    /// When `transport` is `None` the HTTP probe transport is built from
    /// the configuration.
    pub fn with_parts(
        cache: Box<dyn CacheStore>,
        renderer: Box<dyn Renderer>,
        transport: Option<Arc<dyn ProbeTransport>>,
        config: AnalyzerConfig,
    ) -> Result<Self> {
        let fetch_config = FetchConfig { timeout: config.fetch_timeout, ready_selector: config.ready_selector.clone() };
        let probe_config = ProbeConfig {
            concurrency: config.probe_concurrency,
            timeout: config.probe_timeout,
            user_agent: config.user_agent.clone(),
        };

        let prober = match transport {
            Some(transport) => LinkProber::with_transport(transport, probe_config),
            None => LinkProber::new(probe_config)?,
        };

        Ok(Self { fetcher: ContentFetcher::with_config(cache, renderer, fetch_config), prober })
    }

    /// Analyzes the page at `url`.
    ///
    /// Validates the URL, then runs the pipeline stages in order. Fetch and
    /// parse failures abort the analysis; probe failures only mark links
    /// inaccessible in the result.
    pub async fn analyze(&self, url: &str) -> Result<Analysis> {
        if !is_valid_url(url) {
            return Err(SitelensError::InvalidUrl(format!(
                "{}: expected http(s)://host[:port][/path] with a dotted host",
                url
            )));
        }
        let base = Url::parse(url).map_err(|e| SitelensError::InvalidUrl(e.to_string()))?;

        info!(url, "starting analysis");
        let raw = self.fetcher.fetch(url).await?;

        // `Document` is not `Send`; keep it in a block so the future stays `Send`
        // across the probe await below.
        let (page_title, headings_count, contains_login_form, links) = {
            let doc = Document::parse(&raw)?;
            (doc.title(), doc.heading_count(), doc.has_login_form(), resolve_links(&base, &doc))
        };
        let internal_links_count = links.iter().filter(|l| l.is_internal()).count();
        let external_links_count = links.len() - internal_links_count;

        info!(url, links = links.len(), "probing link reachability");
        let probe = self.prober.probe(&links).await;

        let analysis = Analysis {
            html_version: HtmlVersion::detect(&raw),
            page_title,
            headings_count,
            internal_links_count,
            external_links_count,
            inaccessible_links_count: probe.inaccessible_count,
            inaccessible_links: probe.inaccessible_links,
            contains_login_form,
        };
        info!(url, inaccessible = analysis.inaccessible_links_count, "analysis complete");

        Ok(analysis)
    }
}

/// Analyzes a URL with the default analyzer.
///
/// Convenience wrapper over [`Analyzer::new`] + [`Analyzer::analyze`].
#[cfg(feature = "render")]
pub async fn analyze_url(url: &str) -> Result<Analysis> {
    Analyzer::new()?.analyze(url).await
}
