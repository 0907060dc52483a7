//! HTML parser and link extractor
//!
//! This module wraps a parsed HTML document and answers the questions the
//! crawler asks of it:
//! - Which `href` values do its anchors carry, in document order
//! - Does any element bear a given class token
//! - What is its visible text

use crate::url::normalize_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text never reaches the reader
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed HTML page
///
/// Parsing never fails: malformed markup is recovered the way a browser
/// would, and non-HTML bodies end up as text inside an implied `<body>`.
pub struct ParsedPage {
    document: Html,
}

impl ParsedPage {
    /// Parses raw page content
    ///
    /// # Example
    ///
    /// ```
    /// use page_sift::crawler::ParsedPage;
    ///
    /// let page = ParsedPage::parse(r#"<div class="note">Hello</div>"#);
    /// assert!(page.has_class("note"));
    /// assert_eq!(page.text_content(), "Hello");
    /// ```
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Returns true if at least one element carries `class_name` as a class token
    pub fn has_class(&self, class_name: &str) -> bool {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|element| element.value().classes().any(|class| class == class_name))
    }

    /// Flattened text of the page body, skipping scripts, styles and templates
    ///
    /// Text nodes are concatenated as-is, without inserted separators.
    pub fn text_content(&self) -> String {
        let root = match Selector::parse("body") {
            Ok(body) => self
                .document
                .select(&body)
                .next()
                .unwrap_or_else(|| self.document.root_element()),
            Err(_) => self.document.root_element(),
        };

        let mut text = String::new();
        for node in root.descendants() {
            if let Some(fragment) = node.value().as_text() {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
                });
                if !hidden {
                    text.push_str(fragment);
                }
            }
        }
        text
    }

    /// Raw `href` values of every anchor-like element, in document order
    ///
    /// Elements without an `href` attribute are skipped.
    pub fn hrefs(&self) -> Vec<&str> {
        let selector = match Selector::parse("a[href], area[href]") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        self.document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .collect()
    }
}

/// Extracts the outbound links of a page as absolute URLs
///
/// Links are returned in document order. Duplicates are kept; the frontier
/// deduplicates. A link that cannot be resolved is dropped without
/// affecting the others.
///
/// # Example
///
/// ```
/// use page_sift::crawler::{extract_links, ParsedPage};
/// use url::Url;
///
/// let page = ParsedPage::parse(r#"<a href="/a">A</a><a href="https://other.test/x">X</a>"#);
/// let base = Url::parse("https://example.test/").unwrap();
/// assert_eq!(
///     extract_links(&page, &base),
///     vec!["https://example.test/a", "https://other.test/x"]
/// );
/// ```
pub fn extract_links(page: &ParsedPage, page_url: &Url) -> Vec<String> {
    page.hrefs()
        .into_iter()
        .filter_map(|href| {
            let resolved = normalize_link(href, page_url);
            if resolved.is_none() {
                tracing::trace!("Dropping unresolvable link {:?} on {}", href, page_url);
            }
            resolved
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.test/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let page = ParsedPage::parse(r#"<html><body><a href="https://other.test/page">Link</a></body></html>"#);
        let links = extract_links(&page, &base_url());
        assert_eq!(links, vec!["https://other.test/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let page = ParsedPage::parse(r#"<html><body><a href="/other">Link</a></body></html>"#);
        let links = extract_links(&page, &base_url());
        assert_eq!(links, vec!["https://example.test/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let page = ParsedPage::parse(r#"<html><body><a href="other">Link</a></body></html>"#);
        let links = extract_links(&page, &base_url());
        assert_eq!(links, vec!["https://example.test/other"]);
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let page = ParsedPage::parse(r#"<a name="top">Top</a><a href="/a">A</a>"#);
        let links = extract_links(&page, &base_url());
        assert_eq!(links, vec!["https://example.test/a"]);
    }

    #[test]
    fn test_area_elements_included() {
        let page = ParsedPage::parse(
            r#"<map name="m"><area href="/region" shape="rect" coords="0,0,1,1"></map>"#,
        );
        let links = extract_links(&page, &base_url());
        assert_eq!(links, vec!["https://example.test/region"]);
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = r#"
            <html>
            <body>
                <a href="/b">B</a>
                <a href="/a">A</a>
                <a href="/b">B again</a>
            </body>
            </html>
        "#;
        let page = ParsedPage::parse(html);
        let links = extract_links(&page, &base_url());
        assert_eq!(
            links,
            vec![
                "https://example.test/b",
                "https://example.test/a",
                "https://example.test/b",
            ]
        );
    }

    #[test]
    fn test_malformed_href_dropped_others_kept() {
        let html = r#"
            <html>
            <body>
                <a href="/valid">Valid</a>
                <a href="http://[::1">Broken</a>
                <a href="/another-valid">Valid</a>
            </body>
            </html>
        "#;
        let page = ParsedPage::parse(html);
        let links = extract_links(&page, &base_url());
        assert_eq!(
            links,
            vec![
                "https://example.test/valid",
                "https://example.test/another-valid",
            ]
        );
    }

    #[test]
    fn test_non_http_links_dropped() {
        let html = r#"
            <a href="mailto:test@example.test">Mail</a>
            <a href="javascript:void(0)">JS</a>
            <a href="/kept">Kept</a>
        "#;
        let page = ParsedPage::parse(html);
        assert_eq!(extract_links(&page, &base_url()), vec!["https://example.test/kept"]);
    }

    #[test]
    fn test_has_class() {
        let page = ParsedPage::parse(r#"<div class="card highlight big">hi</div>"#);
        assert!(page.has_class("highlight"));
        assert!(page.has_class("card"));
        assert!(!page.has_class("high"));
        assert!(!page.has_class("Highlight"));
    }

    #[test]
    fn test_has_class_on_body_and_html() {
        let page = ParsedPage::parse(r#"<html class="dark"><body class="home"></body></html>"#);
        assert!(page.has_class("dark"));
        assert!(page.has_class("home"));
    }

    #[test]
    fn test_text_content_skips_scripts_and_head() {
        let html = r#"
            <html>
            <head><title>Title text</title><style>.x { color: red }</style></head>
            <body><p>Visible</p><script>var hidden = 1;</script><p>text</p></body>
            </html>
        "#;
        let page = ParsedPage::parse(html);
        let text = page.text_content();
        assert!(text.contains("Visible"));
        assert!(text.contains("text"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("Title text"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_text_content_joins_inline_elements() {
        let page = ParsedPage::parse("<p><b>Contact</b> us</p>");
        assert_eq!(page.text_content(), "Contact us");
    }

    #[test]
    fn test_plain_text_body() {
        let page = ParsedPage::parse("just some text");
        assert_eq!(page.text_content(), "just some text");
        assert!(page.hrefs().is_empty());
    }
}
