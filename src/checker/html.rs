// src/checker/html.rs
// =============================================================================
// This module analyzes a fetched HTML document.
//
// From one parse we pull out:
// - the <title> text
// - how many <h1> and <h2> elements there are
// - whether a password input exists (a login form)
// - every anchor href, resolved to an absolute URL
//
// We use the `scraper` crate which is built on html5ever, the same parser
// browsers use. It never fails on malformed markup: broken HTML just gives
// a smaller tree, so missing elements end up as zero counts or an empty title.
//
// We also use the `url` crate to resolve relative links against the page URL
// (or the document's <base href>, when it has one).
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Everything the analyzer extracts from a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAnalysis {
    pub title: String,
    pub h1_count: usize,
    pub h2_count: usize,
    pub has_login_form: bool,
    /// Resolved links in document order, one entry per anchor
    pub links: Vec<Url>,
}

// Parses the document and extracts title, headings, login form and links
//
// Parameters:
//   document: raw document bytes (decoded lossily as UTF-8)
//   base_url: the URL the document was served from
//
// Example:
//   document = "<title> Home </title><a href='/about'>About</a>"
//   base_url = "https://example.com/"
//   result.title = "Home", result.links = ["https://example.com/about"]
pub fn analyze_document(document: &[u8], base_url: &Url) -> PageAnalysis {
    let html = String::from_utf8_lossy(document);
    let document = Html::parse_document(&html);

    // These selectors are constants, so parsing them cannot fail at runtime
    let title_selector = Selector::parse("title").unwrap();
    let h1_selector = Selector::parse("h1").unwrap();
    let h2_selector = Selector::parse("h2").unwrap();
    let input_selector = Selector::parse("input[type]").unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    // `type` values are case-insensitive in HTML, so compare by hand
    let has_login_form = document.select(&input_selector).any(|element| {
        element
            .value()
            .attr("type")
            .map(|kind| kind.trim().eq_ignore_ascii_case("password"))
            .unwrap_or(false)
    });

    PageAnalysis {
        title,
        h1_count: document.select(&h1_selector).count(),
        h2_count: document.select(&h2_selector).count(),
        has_login_form,
        links: extract_links(&document, base_url),
    }
}

// Collects every anchor href as an absolute URL
fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let base = document_base(document, page_url);

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(&base, href))
        .collect()
}

// A <base href> overrides the page URL for resolution, when it parses
fn document_base(document: &Html, page_url: &Url) -> Url {
    let base_selector = Selector::parse("base[href]").unwrap();

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

// Resolves an href against the base URL
//
// Returns None for:
//   - same-page fragments ("#top")
//   - hrefs that cannot be parsed at all
//
// Any other scheme is kept as-is: a mailto: or tel: link still counts as a
// link, it just can never be reached by a probe. An empty href points at the
// base itself. The fragment is removed from the result.
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"             -> Some("https://example.com/docs")
//   href = "../other#intro"    -> Some("https://example.com/other")
//   href = "//cdn.example.net" -> Some("https://cdn.example.net/")
//   href = ""                  -> Some("https://example.com/page")
//   href = "mailto:a@b.test"   -> Some("mailto:a@b.test")
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.starts_with('#') {
        return None;
    }

    // join() handles both absolute hrefs and relative ones
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/page/").unwrap()
    }

    fn link_strings(analysis: &PageAnalysis) -> Vec<String> {
        analysis.links.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_title_is_trimmed() {
        let analysis = analyze_document(b"<html><head><title>\n  Hello World \n</title></head></html>", &base());
        assert_eq!(analysis.title, "Hello World");
    }

    #[test]
    fn test_missing_elements_yield_defaults() {
        let analysis = analyze_document(b"<p>nothing here", &base());
        assert_eq!(analysis, PageAnalysis::default());
    }

    #[test]
    fn test_heading_counts() {
        let html = b"<h1>A</h1><h2>B</h2><h2>C</h2><h3>D</h3><section><h1>E</h1></section>";
        let analysis = analyze_document(html, &base());
        assert_eq!(analysis.h1_count, 2);
        assert_eq!(analysis.h2_count, 2);
    }

    #[test]
    fn test_login_form_detection() {
        let with = analyze_document(br#"<form><input type="text"><input type="password"></form>"#, &base());
        assert!(with.has_login_form);

        let upper = analyze_document(br#"<input type="PASSWORD">"#, &base());
        assert!(upper.has_login_form);

        let without = analyze_document(br#"<form><input type="text" name="q"></form>"#, &base());
        assert!(!without.has_login_form);
    }

    #[test]
    fn test_resolve_relative_and_absolute_links() {
        let html = br#"
            <a href="https://www.rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="//cdn.example.net/lib.js">CDN</a>
        "#;
        let analysis = analyze_document(html, &base());
        assert_eq!(
            link_strings(&analysis),
            vec![
                "https://www.rust-lang.org/",
                "https://example.com/docs",
                "https://example.com/about",
                "https://cdn.example.net/lib.js",
            ]
        );
    }

    #[test]
    fn test_only_fragments_are_dropped() {
        let html = br##"
            <a href="#top">Top</a>
            <a href="/faq#shipping">FAQ</a>
            <a>No href</a>
        "##;
        let analysis = analyze_document(html, &base());
        assert_eq!(link_strings(&analysis), vec!["https://example.com/faq"]);
    }

    #[test]
    fn test_non_web_and_empty_links_are_kept() {
        let html = br#"
            <a href="mailto:x@example.com">m</a>
            <a href="tel:+1">t</a>
            <a href="">self</a>
            <a href="/a">a</a>
        "#;
        let page = Url::parse("https://example.com/").unwrap();
        let analysis = analyze_document(html, &page);
        assert_eq!(
            link_strings(&analysis),
            vec!["mailto:x@example.com", "tel:+1", "https://example.com/", "https://example.com/a"]
        );
    }

    #[test]
    fn test_unparseable_href_is_dropped() {
        let html = br#"<a href="http://[::1">broken</a><a href="/ok">ok</a>"#;
        let analysis = analyze_document(html, &base());
        assert_eq!(link_strings(&analysis), vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_base_element_changes_resolution() {
        let html = br#"<head><base href="https://static.example.org/root/"></head><a href="img/x">x</a>"#;
        let analysis = analyze_document(html, &base());
        assert_eq!(link_strings(&analysis), vec!["https://static.example.org/root/img/x"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_document_order() {
        let html = br#"<a href="/a">1</a><a href="/b">2</a><a href="/a">3</a>"#;
        let analysis = analyze_document(html, &base());
        assert_eq!(
            link_strings(&analysis),
            vec!["https://example.com/a", "https://example.com/b", "https://example.com/a"]
        );
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = b"<html><title>Broken<h1>Heading<a href='/x'>x<h2>sub";
        let analysis = analyze_document(html, &base());
        // html5ever treats everything after <title> as title text until EOF
        assert!(analysis.title.starts_with("Broken"));
    }
}
