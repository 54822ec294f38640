// src/config.rs
// =============================================================================
// Runtime configuration for a crawl.
//
// A CrawlConfig is built once (from CLI flags in main.rs) and handed to the
// crawl by reference. Nothing in the core reads global state, so two crawls
// with different settings can run side by side.
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::time::Duration;

/// Per-probe timeout used when nothing else is configured
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Timeout for the page fetch itself
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// How many leading bytes of the document the doctype sniff looks at
pub const DEFAULT_SNIFF_BYTES: usize = 1024;

// How a link's host is compared against the target host
//
// #[derive(ValueEnum)] lets clap accept `--host-match exact|substring`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMatch {
    /// Same host, or a subdomain of it
    Exact,
    /// The link text merely contains the target host (legacy behavior)
    Substring,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub sniff_bytes: usize,
    pub user_agent: String,
    pub host_match: HostMatch,
    /// Count and probe every anchor occurrence instead of each distinct URL once
    pub keep_duplicates: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            sniff_bytes: DEFAULT_SNIFF_BYTES,
            user_agent: format!("page-sentinel/{}", env!("CARGO_PKG_VERSION")),
            host_match: HostMatch::Exact,
            keep_duplicates: false,
        }
    }
}
