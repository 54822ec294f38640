// src/crawl/page.rs
// =============================================================================
// Runs one complete crawl of a single page.
//
// How it works:
// 1. Validate the target URL (InvalidTarget if it is not usable)
// 2. Fetch the page and sniff its doctype, both at once
// 3. Analyze the document: title, headings, login form, links
// 4. Classify each link as internal or external as it is collected
// 5. Probe every link concurrently and wait for all of them
// 6. Aggregate everything into one CrawlResult
//
// Only step 1 and the page fetch in step 2 can fail the crawl. No state
// outlives a call, so separate crawls never see each other's data.
// =============================================================================

use super::result::{aggregate, CrawlResult};
use crate::checker::{
    analyze_document, build_page_client, fetch_page, probe_all, sniff_html_version,
    HttpChecker, LinkChecker, LinkCounts, TargetHost,
};
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

// Crawls `target` with the real HTTP link checker
pub async fn crawl_page(target: &str, config: &CrawlConfig) -> Result<CrawlResult> {
    let checker: Arc<dyn LinkChecker> = Arc::new(HttpChecker::new(config)?);
    crawl_page_with(target, config, checker).await
}

// Same as crawl_page, but probes go through the given checker
pub async fn crawl_page_with(
    target: &str,
    config: &CrawlConfig,
    checker: Arc<dyn LinkChecker>,
) -> Result<CrawlResult> {
    let (url, target_host) = parse_target(target, config)?;
    let client = build_page_client(config)?;
    debug!("Links on host {} count as internal ({:?} match)", target_host.host(), config.host_match);

    info!("Fetching {}", url);
    let (html_version, page) = tokio::join!(
        sniff_html_version(&client, &url, config.sniff_bytes),
        fetch_page(&client, &url),
    );
    let page = page?;
    debug!(
        "Page {} answered HTTP {} ({} bytes), doctype {}",
        page.final_url,
        page.status,
        page.body.len(),
        html_version
    );

    let analysis = analyze_document(&page.body, &page.final_url);
    let links = select_links(&analysis.links, config.keep_duplicates);

    let mut counts = LinkCounts::default();
    for link in &links {
        counts.record(target_host.classify(link));
    }

    info!(
        "Probing {} link(s) on {} ({} internal, {} external)",
        links.len(),
        url,
        counts.internal,
        counts.external
    );
    let broken = probe_all(checker, &links).await;

    let result = aggregate(html_version, analysis, counts, broken);
    info!(
        "Crawl of {} done: {} broken of {} link(s)",
        url,
        result.broken_links(),
        counts.total()
    );

    Ok(result)
}

// Accepts only absolute http(s) URLs that have a host
fn parse_target(target: &str, config: &CrawlConfig) -> Result<(Url, TargetHost)> {
    let url = Url::parse(target.trim()).map_err(|e| CrawlError::invalid_target(target, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::invalid_target(
            target,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    let host = TargetHost::new(&url, config.host_match)
        .ok_or_else(|| CrawlError::invalid_target(target, "URL has no host"))?;

    Ok((url, host))
}

// Keeps the first occurrence of each URL unless duplicates were asked for
fn select_links(links: &[Url], keep_duplicates: bool) -> Vec<Url> {
    if keep_duplicates {
        return links.to_vec();
    }

    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| seen.insert(link.as_str().to_string()))
        .cloned()
        .collect()
}
