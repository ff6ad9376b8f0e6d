pub mod analyzer;
pub mod cache;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod links;
pub mod probe;
pub mod render;
pub mod report;
pub mod version;

pub use analyzer::{Analyzer, AnalyzerConfig, AnalyzerConfigBuilder, is_valid_url};
#[cfg(feature = "render")]
pub use analyzer::analyze_url;
pub use cache::{CacheStore, FileCache, MemoryCache, content_key};
pub use dom::Document;
pub use error::{Result, SitelensError};
pub use fetch::{ContentFetcher, FetchConfig};
pub use links::{LinkKind, ResolvedLink, resolve_links};
#[cfg(feature = "render")]
pub use render::ChromeRenderer;
pub use render::{RenderedPage, Renderer};
pub use probe::{HttpProbeTransport, LinkProber, ProbeConfig, ProbeReport, ProbeTransport, PROBE_USER_AGENT};
pub use report::Analysis;
pub use version::HtmlVersion;
