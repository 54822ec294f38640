// src/crawl/job.rs
// =============================================================================
// Wraps a crawl in a job report: the shape handed to whatever stores or
// displays results.
//
// A job moves queued -> running -> done | error, exactly once. A failed
// crawl carries an error message and no result; a successful one always
// carries a fully populated result, even if every link on the page is broken.
// =============================================================================

use super::page::crawl_page;
use super::result::CrawlResult;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub url: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CrawlResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobReport {
    pub fn queued(url: &str) -> Self {
        Self {
            url: url.to_string(),
            status: JobStatus::Queued,
            result: None,
            error: None,
        }
    }

    // Moves a job to its terminal state from the crawl outcome
    pub fn finish(mut self, outcome: Result<CrawlResult, CrawlError>) -> Self {
        match outcome {
            Ok(result) => {
                self.status = JobStatus::Done;
                self.result = Some(result);
            }
            Err(e) => {
                self.status = JobStatus::Error;
                self.error = Some(e.to_string());
            }
        }
        self
    }

    pub fn has_broken_links(&self) -> bool {
        self.result
            .as_ref()
            .map(|r| r.broken_links() > 0)
            .unwrap_or(false)
    }
}

// Runs one crawl job from start to finish
pub async fn run_job(url: &str, config: &CrawlConfig) -> JobReport {
    let mut report = JobReport::queued(url);

    report.status = JobStatus::Running;
    info!("Job {} is {:?}", url, report.status);

    let report = report.finish(crawl_page(url, config).await);
    match &report.error {
        Some(e) => warn!("Job {} failed: {}", url, e),
        None => info!("Job {} is {:?}", url, report.status),
    }
    report
}
