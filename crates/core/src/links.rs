//! Anchor extraction, resolution, and internal/external classification.
//!
//! Anchors are walked in document order, deduplicated by their *raw* href
//! text, resolved against the page's base URL, and tagged internal or
//! external. Hrefs that fail to parse or carry an explicit non-http(s)
//! scheme (`mailto:`, `tel:`, `ftp:`, ...) are skipped entirely: they are
//! neither counted nor probed.
//!
//! The classification rule intentionally mixes the resolved host with the
//! raw href text (leading `/` or `#`); see the tests pinning that behavior.

use std::collections::HashSet;

use scraper::Selector;
use url::Url;

use crate::dom::Document;

/// Classification of a resolved link relative to the base origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Same host and port as the base URL, or authored as a site-relative
    /// or fragment-only href.
    Internal,
    /// Everything else.
    External,
}

/// An anchor href resolved to an absolute URL, ready for probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Absolute URL after reference resolution against the base.
    pub url: Url,
    /// Internal/external tag.
    pub kind: LinkKind,
}

impl ResolvedLink {
    /// Whether this link classified as internal.
    pub fn is_internal(&self) -> bool {
        self.kind == LinkKind::Internal
    }
}

/// Extracts, resolves, and classifies the document's anchors.
///
/// Deduplication happens on the raw href string before resolution: the same
/// literal href authored twice is emitted once, but two different hrefs that
/// resolve to the same absolute URL both survive.
///
/// # Example
///
/// ```rust
/// use url::Url;
/// use sitelens_core::dom::Document;
/// use sitelens_core::links::resolve_links;
///
/// let base = Url::parse("https://example.com").unwrap();
/// let doc = Document::parse(r#"<a href="/about">About</a><a href="mailto:x@y.z">Mail</a>"#).unwrap();
/// let links = resolve_links(&base, &doc);
///
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url.as_str(), "https://example.com/about");
/// ```
pub fn resolve_links(base: &Url, doc: &Document) -> Vec<ResolvedLink> {
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.html().select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.is_empty() || seen.contains(href) {
            continue;
        }

        // Absolute hrefs keep their own scheme through join; relative ones
        // inherit the base scheme. Anything outside http(s) is skipped.
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        seen.insert(href.to_string());

        let same_host =
            resolved.host_str() == base.host_str() && resolved.port() == base.port();
        let kind = if same_host || href.starts_with('/') || href.starts_with('#') {
            LinkKind::Internal
        } else {
            LinkKind::External
        };

        links.push(ResolvedLink { url: resolved, kind });
    }

    links
}
