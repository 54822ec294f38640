// src/checker/http.rs
// =============================================================================
// This module checks whether links are alive.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Every link gets its own tokio task; there is no concurrency cap
// - A JoinSet acts as the completion barrier: probe_all only returns once
//   every task has finished, timed out or panicked
// - Broken links are pushed into one shared, mutex-guarded Vec
//
// Outcome rules:
// - status 400..=599           -> broken, recorded with that status
// - transport failure/timeout  -> broken, recorded with status -1
// - non-http(s) scheme, or a checker that panicked -> also -1
// - anything else              -> healthy, nothing recorded
//
// Rust concepts:
// - Traits + async-trait: the prober works with any LinkChecker, which is
//   how tests inject slow or scripted responses
// - Arc<Mutex<T>>: shared ownership of state mutated by many tasks
// =============================================================================

use crate::config::CrawlConfig;
use crate::error::Result;
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

/// Status recorded for links that could not be reached at all
pub const UNREACHABLE: i32 = -1;

// What a single probe observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this status code
    Status(u16),
    /// Timeout, DNS failure, refused connection, TLS error...
    Unreachable,
}

impl ProbeOutcome {
    // The status to record if this outcome means the link is broken
    pub fn broken_status(&self) -> Option<i32> {
        match self {
            ProbeOutcome::Status(code @ 400..=599) => Some(i32::from(*code)),
            ProbeOutcome::Status(_) => None,
            ProbeOutcome::Unreachable => Some(UNREACHABLE),
        }
    }
}

// One broken link in the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    /// HTTP status, or -1 when the link was unreachable
    pub status_code: i32,
}

impl BrokenLink {
    pub fn is_unreachable(&self) -> bool {
        self.status_code == UNREACHABLE
    }
}

// Anything that can tell us how a URL responds
#[async_trait]
pub trait LinkChecker: Send + Sync {
    async fn check(&self, url: &Url) -> ProbeOutcome;
}

// The real checker: a HEAD request with a fixed timeout
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        // One client for every probe (connection pooling), cloned into tasks
        let client = Client::builder()
            .timeout(config.probe_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkChecker for HttpChecker {
    async fn check(&self, url: &Url) -> ProbeOutcome {
        // mailto:, tel:, javascript: and friends have nothing to send a HEAD to
        if !matches!(url.scheme(), "http" | "https") {
            debug!("Not probing {}: unsupported scheme", url);
            return ProbeOutcome::Unreachable;
        }

        match self.client.head(url.clone()).send().await {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => {
                debug!("Probe failed for {}: {}", url, describe_error(&e));
                ProbeOutcome::Unreachable
            }
        }
    }
}

// Short label for a transport error, used in diagnostics only
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

// Probes every link concurrently and returns the broken ones
//
// Parameters:
//   checker: shared checker, cloned (cheaply, it's an Arc) into each task
//   links: the links to probe, in discovery order
//
// Returns: broken links in the same order as `links`, whatever order the
// probes happened to finish in. Duplicate entries in `links` are probed
// (and reported) once per occurrence.
pub async fn probe_all(checker: Arc<dyn LinkChecker>, links: &[Url]) -> Vec<BrokenLink> {
    // (position in `links`, broken link) so order can be restored afterwards
    let broken: Arc<Mutex<Vec<(usize, BrokenLink)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut probes = JoinSet::new();

    for (index, link) in links.iter().cloned().enumerate() {
        let checker = Arc::clone(&checker);
        let broken = Arc::clone(&broken);

        probes.spawn(async move {
            // A checker that panics must still leave a record behind
            let outcome = AssertUnwindSafe(checker.check(&link))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    warn!("Probe for {} panicked, counting it as unreachable", link);
                    ProbeOutcome::Unreachable
                });
            if let Some(status_code) = outcome.broken_status() {
                let entry = BrokenLink {
                    url: link.to_string(),
                    status_code,
                };
                // A poisoned lock only means another probe panicked mid-push;
                // the Vec itself is still usable
                let mut guard = broken.lock().unwrap_or_else(|p| p.into_inner());
                guard.push((index, entry));
            }
        });
    }

    // Completion barrier: wait for every probe before reading results
    while let Some(joined) = probes.join_next().await {
        if let Err(e) = joined {
            warn!("Probe task did not complete: {}", e);
        }
    }

    let mut broken = std::mem::take(&mut *broken.lock().unwrap_or_else(|p| p.into_inner()));
    broken.sort_by_key(|(index, _)| *index);
    broken.into_iter().map(|(_, link)| link).collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a JoinSet instead of fire-and-forget tokio::spawn?
//    - Spawned tasks run in the background; nothing waits for them
//    - join_next() hands back each task as it finishes, and returns None
//      only when all of them are done, so the loop above is the barrier
//
// 2. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - The lock is held for a single push and never across an .await
//    - A blocking mutex is cheaper for that and works fine inside tasks
//
// 3. Why does a timeout count as broken?
//    - From a reader's point of view a link that never answers is as broken
//      as one that answers 404; -1 just tells the two apart
// -----------------------------------------------------------------------------
