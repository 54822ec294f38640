// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by Rust structs
// and attributes, and clap generates the parsing code.
//
// Configuration flags can also come from PAGE_SENTINEL_* environment
// variables (clap's `env` feature), which is handy in CI.
// =============================================================================

use crate::config::{CrawlConfig, HostMatch};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "page-sentinel",
    version,
    about = "Analyze a web page and find broken links on it",
    long_about = "page-sentinel fetches a single page, reports its title, heading counts, \
                  HTML version and login form presence, and probes every link on it \
                  concurrently to find broken destinations."
)]
pub struct Cli {
    /// Print debug diagnostics to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one or more pages and probe all of their links
    ///
    /// Example: page-sentinel analyze https://example.com --json
    Analyze {
        /// Page URL(s) to analyze; each one is an independent crawl
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output one JSON job report per page instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Only detect the HTML version from the page's doctype
    ///
    /// Example: page-sentinel sniff https://example.com
    Sniff {
        /// Page URL to sniff
        url: String,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

// Flags shared by every subcommand that talks to the network
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Seconds to wait for each link probe before counting it as unreachable
    #[arg(
        long,
        env = "PAGE_SENTINEL_PROBE_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = 3
    )]
    pub probe_timeout_secs: u64,

    /// Seconds to wait for the page fetch
    #[arg(
        long,
        env = "PAGE_SENTINEL_FETCH_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = 10
    )]
    pub fetch_timeout_secs: u64,

    /// Number of leading document bytes inspected for a doctype
    #[arg(long, env = "PAGE_SENTINEL_SNIFF_BYTES", default_value_t = 1024)]
    pub sniff_bytes: usize,

    /// How link hosts are compared against the page host
    #[arg(long, value_enum, env = "PAGE_SENTINEL_HOST_MATCH", default_value_t = HostMatch::Exact)]
    pub host_match: HostMatch,

    /// Count and probe a link once per anchor instead of once per distinct URL
    #[arg(long)]
    pub keep_duplicates: bool,

    /// User-Agent header sent with every request
    #[arg(long, env = "PAGE_SENTINEL_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl CrawlArgs {
    // Turns parsed flags into the config value the crawl core consumes
    pub fn to_config(&self) -> CrawlConfig {
        let defaults = CrawlConfig::default();
        CrawlConfig {
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            sniff_bytes: self.sniff_bytes,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            host_match: self.host_match,
            keep_duplicates: self.keep_duplicates,
        }
    }
}
