// src/checker/classify.rs
// =============================================================================
// Splits resolved links into internal (same site as the target) and external.
//
// Two comparison modes exist (see config::HostMatch):
// - Exact: the link host equals the target host or is a subdomain of it.
//   Ports are ignored, hosts compare case-insensitively.
// - Substring: the whole link text contains the target host (including its
//   port, if any). This reproduces how older versions of the tool counted
//   links, including its false positives such as
//   "https://example.com.evil.test/" counting as internal for "example.com".
// =============================================================================

use crate::config::HostMatch;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Internal,
    External,
}

// The target's host, captured once per crawl
#[derive(Debug, Clone)]
pub struct TargetHost {
    host: String,
    /// host[:port] exactly as it appears in the target URL
    authority: String,
    mode: HostMatch,
}

impl TargetHost {
    // Returns None when the target has no host (e.g. "file:///tmp/x")
    pub fn new(target: &Url, mode: HostMatch) -> Option<Self> {
        let host = target.host_str()?.to_ascii_lowercase();
        let authority = match target.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };
        Some(Self {
            host,
            authority,
            mode,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn classify(&self, link: &Url) -> LinkKind {
        let internal = match self.mode {
            HostMatch::Exact => link
                .host_str()
                .map(|host| self.is_same_site(host))
                .unwrap_or(false),
            HostMatch::Substring => link.as_str().contains(&self.authority),
        };

        if internal {
            LinkKind::Internal
        } else {
            LinkKind::External
        }
    }

    fn is_same_site(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .map(|prefix| prefix.ends_with('.'))
                .unwrap_or(false)
    }
}

// Link counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: usize,
    pub external: usize,
}

impl LinkCounts {
    pub fn record(&mut self, kind: LinkKind) {
        match kind {
            LinkKind::Internal => self.internal += 1,
            LinkKind::External => self.external += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.internal + self.external
    }
}
