//! Headless rendering of web pages.
//!
//! A [`Renderer`] turns a URL into fully rendered markup: it navigates,
//! waits for a readiness selector, recovers the doctype declaration, and
//! snapshots the live DOM. The production implementation drives headless
//! Chrome; tests inject stub renderers via the trait.
//!
//! The rendering surface only exposes the live DOM, which has no doctype
//! node serialization, so the doctype is recovered by a script evaluated in
//! the page and returned separately from the markup.

use std::time::Duration;

use async_trait::async_trait;

use crate::{Result, SitelensError};

/// Script evaluated in the page to reconstruct the doctype declaration.
///
/// Rebuilds the full declaration including publicId/systemId so that legacy
/// DTD strings (HTML 4.01, XHTML 1.0) survive the round trip; the doctype
/// name alone is always just `html` on rendered pages.
const DOCTYPE_SCRIPT: &str = r#"(() => {
    const dt = document.doctype;
    if (!dt) return '';
    let decl = '<!DOCTYPE ' + dt.name;
    if (dt.publicId) decl += ' PUBLIC "' + dt.publicId + '"';
    if (!dt.publicId && dt.systemId) decl += ' SYSTEM';
    if (dt.systemId) decl += ' "' + dt.systemId + '"';
    return decl + '>';
})()"#;

/// The output of one rendering session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Recovered doctype declaration, empty when the document has none.
    pub doctype: String,
    /// Outer HTML of the rendered document element.
    pub html: String,
}

/// Renders a URL into markup after the page has signalled readiness.
///
/// Implementations must navigate to the URL, wait until `ready_selector`
/// matches, and capture both the recovered doctype and the rendered markup,
/// all within `timeout`.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders the page at `url`.
    async fn render(&self, url: &str, ready_selector: &str, timeout: Duration) -> Result<RenderedPage>;
}

/// Headless-Chrome renderer.
///
/// Launches a browser per render session. The blocking browser protocol
/// work runs on the tokio blocking pool, and the whole session is bounded
/// by the caller-supplied timeout covering navigation and extraction
/// together.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use sitelens_core::render::{ChromeRenderer, Renderer};
///
/// # async fn example() -> sitelens_core::Result<()> {
/// let renderer = ChromeRenderer::new();
/// let page = renderer.render("https://example.com", "body", Duration::from_secs(60)).await?;
/// println!("{} bytes of markup", page.html.len());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "render")]
#[derive(Debug, Default)]
pub struct ChromeRenderer;

#[cfg(feature = "render")]
impl ChromeRenderer {
    /// Creates a new Chrome renderer.
    pub fn new() -> Self {
        Self
    }

    fn render_blocking(url: &str, ready_selector: &str, timeout: Duration) -> Result<RenderedPage> {
        use headless_chrome::{Browser, LaunchOptions};

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| SitelensError::Render(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| SitelensError::Render(e.to_string()))?;

        let tab = browser.new_tab().map_err(|e| SitelensError::Render(e.to_string()))?;
        tab.set_default_timeout(timeout);

        tab.navigate_to(url).map_err(|e| SitelensError::Render(e.to_string()))?;
        tab.wait_until_navigated().map_err(|e| SitelensError::Render(e.to_string()))?;
        tab.wait_for_element(ready_selector)
            .map_err(|e| SitelensError::Render(e.to_string()))?;

        let doctype = tab
            .evaluate(DOCTYPE_SCRIPT, false)
            .map_err(|e| SitelensError::Render(e.to_string()))?
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let html = tab.get_content().map_err(|e| SitelensError::Render(e.to_string()))?;

        Ok(RenderedPage { doctype, html })
    }
}

#[cfg(feature = "render")]
#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, url: &str, ready_selector: &str, timeout: Duration) -> Result<RenderedPage> {
        let url = url.to_string();
        let selector = ready_selector.to_string();

        let session = tokio::task::spawn_blocking(move || Self::render_blocking(&url, &selector, timeout));

        match tokio::time::timeout(timeout, session).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(SitelensError::Render(join_err.to_string())),
            Err(_) => Err(SitelensError::Timeout { timeout: timeout.as_secs() }),
        }
    }
}
