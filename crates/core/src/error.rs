//! Error types for Sitelens operations.
//!
//! This module defines the main error type [`SitelensError`] which represents
//! all possible errors that can occur while fetching, rendering, and
//! analyzing a web page.
//!
//! Individual link-probe failures are deliberately *not* represented here:
//! an unreachable link is part of the analysis result, never an error.
//!
//! # Example
//!
//! ```rust
//! use sitelens_core::{SitelensError, Result};
//!
//! fn check_input(url: &str) -> Result<()> {
//!     if url.is_empty() {
//!         return Err(SitelensError::InvalidUrl("empty URL".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for web-page analysis operations.
///
/// This enum represents all possible fatal errors that can occur during
/// URL validation, content fetching/rendering, cache I/O, and HTML parsing.
///
/// # Example
///
/// ```rust,no_run
/// use sitelens_core::{SitelensError, analyze_url};
///
/// # async fn example() {
/// match analyze_url("not a url").await {
///     Ok(analysis) => println!("Title: {}", analysis.page_title),
///     Err(SitelensError::InvalidUrl(msg)) => println!("Bad input: {}", msg),
///     Err(e) => println!("Error: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum SitelensError {
    /// Invalid URL provided.
    ///
    /// Returned when the input URL does not match the required
    /// `http(s)://host[:port][/path]` pattern or cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Headless rendering failed.
    ///
    /// Covers navigation failures, browser launch failures, and any other
    /// error raised inside the rendering session.
    #[error("Failed to render page: {0}")]
    Render(String),

    /// Rendering deadline exceeded.
    ///
    /// Returned when navigation plus content extraction does not complete
    /// within the configured render timeout.
    #[error("Rendering timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Cache store I/O failure.
    ///
    /// Wraps standard I/O errors raised while reading or writing cached
    /// rendered content.
    #[error("Cache store error: {0}")]
    Cache(#[from] std::io::Error),

    /// HTML parsing errors.
    ///
    /// Returned when markup cannot be tokenized at all, or when an internal
    /// CSS selector is invalid. Malformed-but-tolerable HTML still parses.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// HTTP client errors from reqwest.
    ///
    /// Raised when the probe transport cannot be constructed. Per-link
    /// request failures are folded into the result instead.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for SitelensError.
///
/// This is a convenience alias for `std::result::Result<T, SitelensError>`.
pub type Result<T> = std::result::Result<T, SitelensError>;
