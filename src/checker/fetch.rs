// src/checker/fetch.rs
// =============================================================================
// This module performs the outbound GET requests for the target page.
//
// Two separate requests are made:
// - fetch_page: downloads the whole document for the HTML analyzer
// - fetch_leading_bytes: reads only the first ~1KB of the body, which is
//   enough to find a doctype declaration
//
// The sniff is best-effort. If it fails the version is simply Unknown and
// the crawl carries on; only a failed page fetch aborts the crawl.
//
// Rust concepts:
// - Streams: the body is read chunk by chunk so we can stop early
// - Display / Serialize on an enum: one source of truth for the labels
// =============================================================================

use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

// The HTML version inferred from a document's doctype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HtmlVersion {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "HTML 4.01")]
    Html401,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl HtmlVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HtmlVersion::Html5 => "HTML5",
            HtmlVersion::Html401 => "HTML 4.01",
            HtmlVersion::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// A successfully downloaded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the request ended up after redirects; links resolve against this
    pub final_url: Url,
    pub status: u16,
    pub body: Vec<u8>,
}

// Builds the client used for the page fetch and the doctype sniff
pub fn build_page_client(config: &CrawlConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.fetch_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

// Downloads the full target page
//
// A transport error or a non-2xx status is a FetchFailure: there is no
// document to analyze in either case.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    debug!("Fetching page: {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| CrawlError::fetch_failure(url.as_str(), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::fetch_failure(
            url.as_str(),
            format!("HTTP {}", status.as_u16()),
        ));
    }

    let final_url = response.url().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| CrawlError::fetch_failure(url.as_str(), e))?;

    debug!("Fetched {} bytes from {}", body.len(), final_url);

    Ok(FetchedPage {
        final_url,
        status: status.as_u16(),
        body: body.to_vec(),
    })
}

// Reads at most `limit` bytes of the response body and then drops the
// connection. The status code is ignored on purpose: error pages carry
// doctypes too.
pub async fn fetch_leading_bytes(
    client: &Client,
    url: &Url,
    limit: usize,
) -> std::result::Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url.clone()).send().await?;
    let mut stream = response.bytes_stream();
    let mut leading = Vec::with_capacity(limit);

    while leading.len() < limit {
        let chunk = match stream.next().await {
            Some(chunk) => chunk?,
            None => break,
        };
        let take = chunk.len().min(limit - leading.len());
        leading.extend_from_slice(&chunk[..take]);
    }

    Ok(leading)
}

// Case-insensitive substring match for the two doctypes we recognize
//
// Examples:
//   "<!DOCTYPE html>..."                                   -> Html5
//   "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\"" -> Html401
//   "<html>..."                                            -> Unknown
pub fn detect_html_version(leading: &[u8]) -> HtmlVersion {
    let text = String::from_utf8_lossy(leading).to_ascii_lowercase();

    if text.contains("<!doctype html>") {
        HtmlVersion::Html5
    } else if text.contains(r#"<!doctype html public "-//w3c//dtd html 4.01"#) {
        HtmlVersion::Html401
    } else {
        HtmlVersion::Unknown
    }
}

// Fetches the leading bytes and classifies them, degrading to Unknown
pub async fn sniff_html_version(client: &Client, url: &Url, limit: usize) -> HtmlVersion {
    match fetch_leading_bytes(client, url, limit).await {
        Ok(leading) => detect_html_version(&leading),
        Err(e) => {
            warn!("Doctype sniff failed for {}: {}", url, e);
            HtmlVersion::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html5() {
        assert_eq!(
            detect_html_version(b"<!DOCTYPE html>\n<html><head></head></html>"),
            HtmlVersion::Html5
        );
    }

    #[test]
    fn test_detect_html401() {
        let doc = br#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;
        assert_eq!(detect_html_version(doc), HtmlVersion::Html401);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_html_version(b"<html><body>hi</body></html>"), HtmlVersion::Unknown);
        assert_eq!(detect_html_version(b""), HtmlVersion::Unknown);
        // XHTML 1.0 is not one of the recognized versions
        let xhtml = br#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN">"#;
        assert_eq!(detect_html_version(xhtml), HtmlVersion::Unknown);
    }

    #[test]
    fn test_version_labels() {
        assert_eq!(HtmlVersion::Html401.to_string(), "HTML 4.01");
        assert_eq!(serde_json::to_string(&HtmlVersion::Html5).unwrap(), "\"HTML5\"");
    }

    #[tokio::test]
    async fn test_leading_bytes_are_bounded() {
        let mut server = mockito::Server::new_async().await;
        let body = format!("<!DOCTYPE html>{}", "x".repeat(10_000));
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = build_page_client(&CrawlConfig::default()).unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let leading = fetch_leading_bytes(&client, &url, 1024).await.unwrap();

        assert_eq!(leading.len(), 1024);
        assert_eq!(detect_html_version(&leading), HtmlVersion::Html5);
    }

    #[tokio::test]
    async fn test_sniff_ignores_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/gone")
            .with_status(404)
            .with_body("<!doctype html><title>Not found</title>")
            .create_async()
            .await;

        let client = build_page_client(&CrawlConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/gone", server.url())).unwrap();
        assert_eq!(sniff_html_version(&client, &url, 1024).await, HtmlVersion::Html5);
    }

    #[tokio::test]
    async fn test_sniff_degrades_to_unknown() {
        let client = build_page_client(&CrawlConfig::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        assert_eq!(sniff_html_version(&client, &url, 1024).await, HtmlVersion::Unknown);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(500)
            .create_async()
            .await;

        let client = build_page_client(&CrawlConfig::default()).unwrap();
        let url = Url::parse(&server.url()).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, CrawlError::FetchFailure { .. }));
    }
}
