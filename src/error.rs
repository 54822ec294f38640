// src/error.rs
// =============================================================================
// Error types for the crawl core.
//
// Only two things can make a whole crawl fail:
// - the target string is not an absolute http(s) URL with a host
// - the page itself could not be fetched
//
// Everything else (a broken link, a failed doctype sniff, messy HTML) is
// absorbed into the result instead of becoming an error.
//
// We use `thiserror` to derive std::error::Error and Display for the enum.
// The binary layer (main.rs) wraps these in anyhow like the rest of the app.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The target could not be used as a crawl entry point
    #[error("invalid target URL '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// The page fetch failed before any analysis could happen
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// The HTTP client could not be constructed (bad TLS backend, bad header...)
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CrawlError {
    pub fn invalid_target(url: &str, reason: impl ToString) -> Self {
        CrawlError::InvalidTarget {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch_failure(url: &str, reason: impl ToString) -> Self {
        CrawlError::FetchFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
