// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing) on stderr
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the reports
// 5. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod checker;
mod cli;
mod config;
mod crawl;
mod error;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use crawl::{JobReport, JobStatus};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays parseable.
// RUST_LOG wins over --verbose when both are set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "page_sentinel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = every page crawled, no broken links
//   Ok(1) = broken links found
//   Ok(2) = at least one crawl failed
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Analyze { urls, json, crawl } => handle_analyze(&urls, json, &crawl).await,
        Commands::Sniff { url, crawl } => handle_sniff(&url, &crawl).await,
    }
}

// Handles the 'analyze' subcommand
//
// Each URL is its own crawl; they run one after another and share nothing.
async fn handle_analyze(urls: &[String], json: bool, args: &CrawlArgs) -> Result<i32> {
    let config = args.to_config();
    let mut reports = Vec::with_capacity(urls.len());

    for url in urls {
        if !json {
            println!("🔍 Analyzing page: {}", url);
        }
        reports.push(crawl::run_job(url, &config).await);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    Ok(exit_code(&reports))
}

// Handles the 'sniff' subcommand: doctype only, no analysis or probing
async fn handle_sniff(url: &str, args: &CrawlArgs) -> Result<i32> {
    let config = args.to_config();
    let target = Url::parse(url).with_context(|| format!("invalid target URL '{}'", url))?;
    let client = checker::build_page_client(&config)?;

    let version = checker::sniff_html_version(&client, &target, config.sniff_bytes).await;
    println!("{}", version);
    Ok(0)
}

fn exit_code(reports: &[JobReport]) -> i32 {
    if reports.iter().any(|r| r.status == JobStatus::Error) {
        2
    } else if reports.iter().any(JobReport::has_broken_links) {
        1
    } else {
        0
    }
}

// Prints one job report in human-readable form
fn print_report(report: &JobReport) {
    println!();
    println!("📄 {}", report.url);

    let result = match (&report.result, &report.error) {
        (Some(result), _) => result,
        (None, Some(error)) => {
            println!("   ⚠️  Crawl failed: {}", error);
            return;
        }
        (None, None) => {
            println!("   ⚠️  No result");
            return;
        }
    };

    let title = if result.title().is_empty() { "(none)" } else { result.title() };
    println!("   HTML version:  {}", result.html_version());
    println!("   Title:         {}", title);
    println!("   Headings:      {} h1, {} h2", result.h1_count(), result.h2_count());
    println!("   Login form:    {}", if result.has_login_form() { "yes" } else { "no" });
    println!(
        "   Links:         {} internal, {} external",
        result.internal_links(),
        result.external_links()
    );

    if result.broken_details().is_empty() {
        println!("   ✅ No broken links");
        return;
    }

    println!("   ❌ Broken links: {}", result.broken_links());
    println!();
    println!("   {:<70} {:<12}", "URL", "STATUS");
    println!("   {}", "=".repeat(82));
    for broken in result.broken_details() {
        let url_display = if broken.url.chars().count() > 67 {
            format!("{}...", broken.url.chars().take(67).collect::<String>())
        } else {
            broken.url.clone()
        };
        let status_display = if broken.is_unreachable() {
            "unreachable".to_string()
        } else {
            format!("HTTP {}", broken.status_code)
        };
        println!("   {:<70} {:<12}", url_display, status_display);
    }
}
