// src/crawl/mod.rs
// =============================================================================
// This module runs whole-page crawls.
//
// Submodules:
// - page: the crawl pipeline (fetch, analyze, classify, probe)
// - result: the CrawlResult value and the aggregation step
// - job: job status tracking and the report handed to callers
// =============================================================================

mod job;
mod page;
mod result;

pub use job::{run_job, JobReport, JobStatus};
