//! The assembled analysis result.
//!
//! [`Analysis`] is created once per request, immutable after assembly, and
//! serialized with the stable camelCase wire names the HTTP layer exposes.

use serde::{Deserialize, Serialize};

use crate::version::HtmlVersion;

/// Structural and reachability metrics for one analyzed page.
///
/// # Example
///
/// ```rust
/// use sitelens_core::report::Analysis;
/// use sitelens_core::version::HtmlVersion;
///
/// let analysis = Analysis {
///     html_version: HtmlVersion::Html5,
///     page_title: "Home".to_string(),
///     headings_count: 3,
///     internal_links_count: 2,
///     external_links_count: 1,
///     inaccessible_links_count: 0,
///     inaccessible_links: vec![],
///     contains_login_form: false,
/// };
///
/// let json = analysis.to_json().unwrap();
/// assert_eq!(json["htmlVersion"], "HTML5");
/// assert_eq!(json["pageTitle"], "Home");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Document type derived from the doctype declaration.
    pub html_version: HtmlVersion,
    /// Text of the first title element, empty when absent.
    pub page_title: String,
    /// Sum of heading elements across ranks 1-6.
    pub headings_count: usize,
    /// Distinct links classified internal.
    pub internal_links_count: usize,
    /// Distinct links classified external.
    pub external_links_count: usize,
    /// Always equal to `inaccessible_links.len()`.
    pub inaccessible_links_count: usize,
    /// Absolute URLs that failed their reachability probe, in probe
    /// completion order.
    pub inaccessible_links: Vec<String>,
    /// Whether some form contains a password-type input.
    pub contains_login_form: bool,
}

impl Analysis {
    /// Serializes the analysis to a JSON value.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
