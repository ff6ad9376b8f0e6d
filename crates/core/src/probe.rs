//! Concurrent link reachability probing.
//!
//! Each resolved link gets a lightweight HEAD-style existence check with its
//! own short deadline. Probes fan out concurrently under a fixed admission
//! limit, and failures are collected into a single lock-guarded accumulator.
//! A probe failure is data ("this link is inaccessible"), never a pipeline
//! error: timeouts, connection failures, and >= 400 responses are all folded
//! into the same bucket.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::links::ResolvedLink;
use crate::Result;

/// Identifying User-Agent sent with every probe request.
pub const PROBE_USER_AGENT: &str = "Mozilla/5.0 (compatible; Sitelens/1.0)";

/// Configuration for link probing.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Maximum number of in-flight probes at any time.
    pub concurrency: usize,
    /// Per-request deadline in seconds.
    pub timeout: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { concurrency: 10, timeout: 3, user_agent: PROBE_USER_AGENT.to_string() }
    }
}

/// Transport used to issue one existence check.
///
/// The error side is an opaque description: the prober treats any error and
/// any status >= 400 identically, so implementations never need to
/// distinguish failure modes.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Issues a HEAD request and returns the response status code.
    async fn head(&self, url: &Url) -> std::result::Result<u16, String>;
}

/// reqwest-backed probe transport.
///
/// One client is shared across all probes for connection pooling; the
/// request timeout and User-Agent come from [`ProbeConfig`].
pub struct HttpProbeTransport {
    client: Client,
}

impl HttpProbeTransport {
    /// Builds a transport from the probe configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for HttpProbeTransport {
    async fn head(&self, url: &Url) -> std::result::Result<u16, String> {
        let response = self.client.head(url.clone()).send().await.map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}

/// Aggregated probe outcome.
///
/// `inaccessible_count` always equals `inaccessible_links.len()`. Link order
/// is probe completion order and is not deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Number of links that failed their existence check.
    pub inaccessible_count: usize,
    /// Absolute URLs of the failing links, in completion order.
    pub inaccessible_links: Vec<String>,
}

/// Shared accumulator; one lock guards both the counter and the list.
#[derive(Default)]
struct FailureLog {
    count: usize,
    links: Vec<String>,
}

/// Probes resolved links concurrently and aggregates the failures.
///
/// # Example
///
/// ```rust,no_run
/// use sitelens_core::probe::{LinkProber, ProbeConfig};
///
/// # async fn example(links: Vec<sitelens_core::links::ResolvedLink>) -> sitelens_core::Result<()> {
/// let prober = LinkProber::new(ProbeConfig::default())?;
/// let report = prober.probe(&links).await;
/// println!("{} inaccessible", report.inaccessible_count);
/// # Ok(())
/// # }
/// ```
pub struct LinkProber {
    transport: Arc<dyn ProbeTransport>,
    config: ProbeConfig,
}

impl LinkProber {
    /// Creates a prober with the HTTP transport.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let transport = Arc::new(HttpProbeTransport::new(&config)?);
        Ok(Self { transport, config })
    }

    /// Creates a prober with an injected transport.
    pub fn with_transport(transport: Arc<dyn ProbeTransport>, config: ProbeConfig) -> Self {
        Self { transport, config }
    }

    /// Probes every link and returns the aggregated report.
    ///
    /// At most `concurrency` probes run at once; additional links wait for a
    /// slot. The call returns only after every dispatched probe has
    /// completed, so no background work outlives it. Individual failures are
    /// recorded, never escalated.
    pub async fn probe(&self, links: &[ResolvedLink]) -> ProbeReport {
        let failures = Arc::new(Mutex::new(FailureLog::default()));

        stream::iter(links)
            .for_each_concurrent(self.config.concurrency, |link| {
                let transport = Arc::clone(&self.transport);
                let failures = Arc::clone(&failures);
                async move {
                    match transport.head(&link.url).await {
                        Ok(status) if status < 400 => {
                            debug!(url = %link.url, status, "link accessible");
                        }
                        outcome => {
                            warn!(url = %link.url, ?outcome, "link inaccessible");
                            // Lock held for the append only, never across
                            // the network call.
                            let mut log = failures.lock().unwrap();
                            log.count += 1;
                            log.links.push(link.url.to_string());
                        }
                    }
                }
            })
            .await;

        let log = std::mem::take(&mut *failures.lock().unwrap());
        ProbeReport { inaccessible_count: log.count, inaccessible_links: log.links }
    }
}
