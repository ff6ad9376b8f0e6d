//! HTML version detection from raw fetched markup.
//!
//! Detection runs against the raw fetched text, not the parsed document:
//! the parser normalizes doctypes away, but the fetcher preserves the
//! recovered declaration on the first line of the cached blob.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document type/version derived from the doctype declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HtmlVersion {
    /// `<!doctype html>`
    #[serde(rename = "HTML5")]
    Html5,
    /// An HTML 4.01 DTD reference.
    #[serde(rename = "HTML 4.01")]
    Html4_01,
    /// An XHTML 1.0 DTD reference.
    #[serde(rename = "XHTML 1.0")]
    Xhtml1_0,
    /// No recognizable doctype.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl HtmlVersion {
    /// Detects the HTML version from raw markup.
    ///
    /// Case-insensitive substring checks, evaluated in fixed priority
    /// order: the HTML5 marker wins over the legacy DTD markers when both
    /// appear.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sitelens_core::version::HtmlVersion;
    ///
    /// assert_eq!(HtmlVersion::detect("<!DOCTYPE html>\n<html></html>"), HtmlVersion::Html5);
    /// assert_eq!(HtmlVersion::detect(""), HtmlVersion::Unknown);
    /// ```
    pub fn detect(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("<!doctype html>") {
            HtmlVersion::Html5
        } else if lower.contains("html 4.01") {
            HtmlVersion::Html4_01
        } else if lower.contains("xhtml 1.0") {
            HtmlVersion::Xhtml1_0
        } else {
            HtmlVersion::Unknown
        }
    }

    /// The wire spelling of this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlVersion::Html5 => "HTML5",
            HtmlVersion::Html4_01 => "HTML 4.01",
            HtmlVersion::Xhtml1_0 => "XHTML 1.0",
            HtmlVersion::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("<!DOCTYPE html>", HtmlVersion::Html5)]
    #[case("<!doctype HTML>", HtmlVersion::Html5)]
    #[case(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#, HtmlVersion::Html4_01)]
    #[case(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN">"#, HtmlVersion::Xhtml1_0)]
    #[case("", HtmlVersion::Unknown)]
    #[case("<html><body></body></html>", HtmlVersion::Unknown)]
    fn test_detect(#[case] raw: &str, #[case] expected: HtmlVersion) {
        assert_eq!(HtmlVersion::detect(raw), expected);
    }

    #[test]
    fn test_priority_order_html5_first() {
        // A blob carrying both markers resolves to HTML5 because it is
        // checked first.
        let raw = r#"<!DOCTYPE html> <!-- migrated from HTML 4.01 -->"#;
        assert_eq!(HtmlVersion::detect(raw), HtmlVersion::Html5);
    }

    #[test]
    fn test_display_matches_wire_spelling() {
        assert_eq!(HtmlVersion::Html4_01.to_string(), "HTML 4.01");
        assert_eq!(HtmlVersion::Xhtml1_0.to_string(), "XHTML 1.0");
    }

    #[test]
    fn test_serialize_as_wire_string() {
        assert_eq!(serde_json::to_value(HtmlVersion::Html5).unwrap(), "HTML5");
        assert_eq!(serde_json::to_value(HtmlVersion::Unknown).unwrap(), "Unknown");
    }
}
