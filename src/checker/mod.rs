// src/checker/mod.rs
// =============================================================================
// This module contains the building blocks of a page check.
//
// Submodules:
// - fetch: downloads the target page and sniffs its doctype
// - html: extracts title, headings, login form and links from a document
// - classify: tags each link as internal or external
// - http: probes links concurrently to find broken ones
//
// The crawl module wires these together; this file just re-exports the
// public API so callers can write `checker::probe_all()` and so on.
// =============================================================================

mod classify;
mod fetch;
mod html;
mod http;

pub use classify::{LinkCounts, TargetHost};
pub use fetch::{build_page_client, fetch_page, sniff_html_version, HtmlVersion};
pub use html::{analyze_document, PageAnalysis};
pub use http::{probe_all, BrokenLink, HttpChecker, LinkChecker, ProbeOutcome};
