//! Library API integration tests
//!
//! Runs the full pipeline end to end with injected collaborators: an
//! in-memory cache, a scripted renderer, and a path-keyed probe transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use sitelens_core::*;
use sitelens_core::cache::MemoryCache;

const PAGE_BODY: &str = r#"
<html>
<head><title>Example Domain</title></head>
<body>
    <h1>Welcome</h1>
    <h2>Section</h2>
    <h3>Subsection</h3>
    <form action="/login"><input type="text" name="user"><input type="password" name="pass"></form>
    <a href="/ok">fine</a>
    <a href="/missing">dead internal</a>
    <a href="https://other.example.org/broken">dead external</a>
    <a href="mailto:admin@example.com">mail</a>
</body>
</html>
"#;

struct ScriptedRenderer {
    doctype: &'static str,
    html: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn render(&self, _url: &str, _selector: &str, _timeout: Duration) -> Result<RenderedPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RenderedPage { doctype: self.doctype.to_string(), html: self.html.to_string() })
    }
}

/// 404s any path containing "missing", errors on "broken", 200s the rest.
struct PathTransport;

#[async_trait]
impl ProbeTransport for PathTransport {
    async fn head(&self, url: &Url) -> std::result::Result<u16, String> {
        if url.path().contains("missing") {
            Ok(404)
        } else if url.path().contains("broken") {
            Err("connection reset".to_string())
        } else {
            Ok(200)
        }
    }
}

fn analyzer_with(renderer: ScriptedRenderer) -> Analyzer {
    Analyzer::with_parts(
        Box::new(MemoryCache::new()),
        Box::new(renderer),
        Some(Arc::new(PathTransport)),
        AnalyzerConfig::default(),
    )
    .unwrap()
}

fn scripted(calls: &Arc<AtomicUsize>) -> ScriptedRenderer {
    ScriptedRenderer { doctype: "<!DOCTYPE html>", html: PAGE_BODY, calls: calls.clone() }
}

#[tokio::test]
async fn test_full_analysis() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(scripted(&calls));

    let analysis = analyzer.analyze("https://example.com").await.expect("should analyze");

    assert_eq!(analysis.html_version, HtmlVersion::Html5);
    assert_eq!(analysis.page_title, "Example Domain");
    assert_eq!(analysis.headings_count, 3);
    assert!(analysis.contains_login_form);

    // /ok and /missing are internal, other.example.org is external, mailto
    // excluded entirely.
    assert_eq!(analysis.internal_links_count, 2);
    assert_eq!(analysis.external_links_count, 1);

    assert_eq!(analysis.inaccessible_links_count, 2);
    assert_eq!(analysis.inaccessible_links_count, analysis.inaccessible_links.len());
    let mut failing = analysis.inaccessible_links.clone();
    failing.sort();
    assert_eq!(failing, vec!["https://example.com/missing", "https://other.example.org/broken"]);
}

#[tokio::test]
async fn test_reanalysis_hits_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(scripted(&calls));

    let first = analyzer.analyze("https://example.com").await.unwrap();
    let second = analyzer.analyze("https://example.com").await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "second analysis must not re-render");
    assert_eq!(first.page_title, second.page_title);
    assert_eq!(first.html_version, second.html_version);
    assert_eq!(first.headings_count, second.headings_count);
    assert_eq!(first.internal_links_count, second.internal_links_count);
    assert_eq!(first.external_links_count, second.external_links_count);
}

#[tokio::test]
async fn test_invalid_url_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(scripted(&calls));

    let result = analyzer.analyze("ftp://example.com").await;

    assert!(matches!(result, Err(SitelensError::InvalidUrl(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0, "validation failure must not fetch");
}

#[tokio::test]
async fn test_render_failure_aborts_analysis() {
    struct BrokenRenderer;

    #[async_trait]
    impl Renderer for BrokenRenderer {
        async fn render(&self, _url: &str, _selector: &str, _timeout: Duration) -> Result<RenderedPage> {
            Err(SitelensError::Render("chrome exited".to_string()))
        }
    }

    let analyzer = Analyzer::with_parts(
        Box::new(MemoryCache::new()),
        Box::new(BrokenRenderer),
        Some(Arc::new(PathTransport)),
        AnalyzerConfig::default(),
    )
    .unwrap();

    let result = analyzer.analyze("https://example.com").await;
    assert!(matches!(result, Err(SitelensError::Render(_))));
}

#[tokio::test]
async fn test_all_links_dead_still_succeeds() {
    struct AlwaysDown;

    #[async_trait]
    impl ProbeTransport for AlwaysDown {
        async fn head(&self, _url: &Url) -> std::result::Result<u16, String> {
            Err("no route to host".to_string())
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = Analyzer::with_parts(
        Box::new(MemoryCache::new()),
        Box::new(scripted(&calls)),
        Some(Arc::new(AlwaysDown)),
        AnalyzerConfig::default(),
    )
    .unwrap();

    let analysis = analyzer.analyze("https://example.com").await.expect("probe failures are data");
    assert_eq!(analysis.inaccessible_links_count, 3);
}

#[tokio::test]
async fn test_legacy_doctype_detected_from_raw_text() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(ScriptedRenderer {
        doctype: r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
        html: "<html><head><title>Old</title></head><body></body></html>",
        calls: calls.clone(),
    });

    let analysis = analyzer.analyze("https://legacy.example.com").await.unwrap();
    assert_eq!(analysis.html_version, HtmlVersion::Html4_01);
    assert_eq!(analysis.page_title, "Old");
}

#[tokio::test]
async fn test_missing_doctype_is_unknown() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(ScriptedRenderer {
        doctype: "",
        html: "<html><body><p>bare</p></body></html>",
        calls: calls.clone(),
    });

    let analysis = analyzer.analyze("https://bare.example.com").await.unwrap();
    assert_eq!(analysis.html_version, HtmlVersion::Unknown);
    assert_eq!(analysis.page_title, "");
    assert_eq!(analysis.headings_count, 0);
    assert!(!analysis.contains_login_form);
}

#[tokio::test]
async fn test_result_serializes_with_wire_names() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = analyzer_with(scripted(&calls));

    let analysis = analyzer.analyze("https://example.com").await.unwrap();
    let json = analysis.to_json().unwrap();

    assert_eq!(json["htmlVersion"], "HTML5");
    assert_eq!(json["pageTitle"], "Example Domain");
    assert_eq!(json["headingsCount"], 3);
    assert_eq!(json["internalLinksCount"], 2);
    assert_eq!(json["externalLinksCount"], 1);
    assert_eq!(json["containsLoginForm"], true);
    assert_eq!(
        json["inaccessibleLinksCount"].as_u64().unwrap() as usize,
        json["inaccessibleLinks"].as_array().unwrap().len()
    );
}
