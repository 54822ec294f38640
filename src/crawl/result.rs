// src/crawl/result.rs
// =============================================================================
// The final result of a crawl and the function that assembles it.
//
// aggregate() is a pure combination step: no I/O, no waiting. By the time it
// is called the prober has already passed its completion barrier, so the
// broken-link list it receives is final.
//
// CrawlResult fields are private and only readable through accessors, which
// keeps `broken_links == broken_details.len()` true for every value.
// =============================================================================

use crate::checker::{BrokenLink, HtmlVersion, LinkCounts, PageAnalysis};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    html_version: HtmlVersion,
    title: String,
    h1_count: usize,
    h2_count: usize,
    internal_links: usize,
    external_links: usize,
    broken_links: usize,
    has_login_form: bool,
    broken_details: Vec<BrokenLink>,
}

impl CrawlResult {
    pub fn html_version(&self) -> HtmlVersion {
        self.html_version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn h1_count(&self) -> usize {
        self.h1_count
    }

    pub fn h2_count(&self) -> usize {
        self.h2_count
    }

    pub fn internal_links(&self) -> usize {
        self.internal_links
    }

    pub fn external_links(&self) -> usize {
        self.external_links
    }

    pub fn broken_links(&self) -> usize {
        self.broken_links
    }

    pub fn has_login_form(&self) -> bool {
        self.has_login_form
    }

    pub fn broken_details(&self) -> &[BrokenLink] {
        &self.broken_details
    }
}

// Combines the outputs of the fetcher, analyzer, classifier and prober
pub fn aggregate(
    html_version: HtmlVersion,
    analysis: PageAnalysis,
    counts: LinkCounts,
    broken: Vec<BrokenLink>,
) -> CrawlResult {
    CrawlResult {
        html_version,
        title: analysis.title,
        h1_count: analysis.h1_count,
        h2_count: analysis.h2_count,
        internal_links: counts.internal,
        external_links: counts.external,
        broken_links: broken.len(),
        has_login_form: analysis.has_login_form,
        broken_details: broken,
    }
}
