//! HTML parsing and structural extraction.
//!
//! This module provides the [`Document`] type for parsing an HTML string
//! into a queryable DOM and extracting the structural facts the analysis
//! reports: page title, heading count, and login-form presence.
//!
//! Parsing is permissive (html5ever semantics via scraper): malformed but
//! tolerable markup still yields a document.
//!
//! # Example
//!
//! ```rust
//! use sitelens_core::dom::Document;
//!
//! let html = "<html><head><title>Home</title></head><body><h1>Hi</h1></body></html>";
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title(), "Home");
//! assert_eq!(doc.heading_count(), 1);
//! assert!(!doc.has_login_form());
//! ```

use scraper::{Html, Selector};

use crate::{Result, SitelensError};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A parsed HTML document.
///
/// Wraps `scraper::Html` and exposes the queries the analysis pipeline
/// needs. Link extraction lives in [`crate::links`]; this type only answers
/// structural questions.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing follows permissive HTML5 semantics, so this effectively only
    /// fails on markup that cannot be tokenized at all.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SitelensError::HtmlParse`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<scraper::ElementRef<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| SitelensError::HtmlParse(format!("Invalid selector: {}", e)))?;
        Ok(self.html.select(&sel).collect())
    }

    /// Text of the first `<title>` element, empty when none is present.
    pub fn title(&self) -> String {
        let selector = Selector::parse("title").unwrap();
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
    }

    /// Total count of heading elements, ranks 1 through 6.
    pub fn heading_count(&self) -> usize {
        HEADING_TAGS
            .iter()
            .map(|tag| {
                let sel = Selector::parse(tag).unwrap();
                self.html.select(&sel).count()
            })
            .sum()
    }

    /// Whether the document contains a login form.
    ///
    /// True iff at least one `<form>` has a password-type input descendant.
    pub fn has_login_form(&self) -> bool {
        let form_sel = Selector::parse("form").unwrap();
        let password_sel = Selector::parse(r#"input[type="password"]"#).unwrap();
        self.html
            .select(&form_sel)
            .any(|form| form.select(&password_sel).next().is_some())
    }
}
