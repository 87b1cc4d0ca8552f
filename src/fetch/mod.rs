use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::errors::StratError;

/// Hard cap on the plain-text excerpt handed to the model. Bounds the prompt
/// size of every downstream call.
pub const MAX_PAGE_TEXT_CHARS: usize = 15_000;

/// Maximum response body size (5 MB).
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

const USER_AGENT: &str = "stratgen/0.1 (strategy analyzer)";

/// Tags whose entire subtree is ignored: scripts, styling, and the usual
/// page chrome around the actual content.
const SKIP_TAGS: [&str; 7] = ["script", "style", "noscript", "svg", "nav", "header", "footer"];

pub fn http_client(timeout_secs: u64) -> Result<Client, StratError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| StratError::Fetch(e.to_string()))
}

/// Fetch a URL and reduce it to a bounded plain-text excerpt. Single attempt;
/// any failure surfaces immediately.
pub async fn extract_page_text(client: &Client, url: &str) -> Result<String, StratError> {
    let response = client.get(url).send().await.map_err(classify_transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(StratError::Fetch(format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    if response.content_length().unwrap_or(0) > MAX_BODY_BYTES as u64 {
        return Err(StratError::Fetch(format!(
            "response too large (max {} bytes)",
            MAX_BODY_BYTES
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(classify_transport_error)?;
    if body.len() > MAX_BODY_BYTES {
        return Err(StratError::Fetch(format!("response too large: {} bytes", body.len())));
    }

    Ok(page_to_text(&String::from_utf8_lossy(&body)))
}

fn classify_transport_error(err: reqwest::Error) -> StratError {
    if is_cross_origin_block(&err) {
        StratError::CrossOrigin(err.to_string())
    } else {
        StratError::Fetch(err.to_string())
    }
}

/// Failure-signature heuristic for browser-security blocks. Kept as a single
/// predicate so the signature set can be adapted per runtime without touching
/// pipeline logic.
pub fn is_cross_origin_block(err: &reqwest::Error) -> bool {
    let mut current: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = current {
        let msg = e.to_string().to_lowercase();
        if msg.contains("cors") || msg.contains("cross-origin") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Reduce raw HTML to readable text: prefer the `<main>` landmark, then
/// `<article>`, then the document body; skip boilerplate subtrees; collapse
/// whitespace; truncate to [`MAX_PAGE_TEXT_CHARS`].
pub fn page_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<String> = Vec::new();
    if let Some(root) = content_root(&document) {
        collect_element_text(root, &mut parts);
    } else {
        collect_element_text(document.root_element(), &mut parts);
    }

    let joined = parts.join(" ");
    truncate_chars(&collapse_whitespace(&joined), MAX_PAGE_TEXT_CHARS)
}

fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    for landmark in ["main", "article", "body"] {
        let selector = Selector::parse(landmark).unwrap();
        if let Some(el) = document.select(&selector).next() {
            return Some(el);
        }
    }
    None
}

fn collect_element_text(element: ElementRef, parts: &mut Vec<String>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_element_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_main_over_article_and_body() {
        let html = r#"<html><body>
            <nav>Menu Menu</nav>
            <article>Article text</article>
            <main>Main text</main>
            <p>Body filler</p>
        </body></html>"#;
        assert_eq!(page_to_text(html), "Main text");
    }

    #[test]
    fn falls_back_to_article_then_body() {
        let with_article = "<html><body><article>Article only</article><p>rest</p></body></html>";
        assert_eq!(page_to_text(with_article), "Article only");

        let body_only = "<html><body><h1>Hello</h1><p>World</p></body></html>";
        assert_eq!(page_to_text(body_only), "Hello World");
    }

    #[test]
    fn strips_scripts_styles_and_chrome() {
        let html = r#"<html><body>
            <script>var x = 1;</script>
            <style>.a { color: red; }</style>
            <nav>Home About</nav>
            <footer>Legal</footer>
            <p>Visible text</p>
        </body></html>"#;
        let text = page_to_text(html);
        assert_eq!(text, "Visible text");
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let html = "<html><body><p>a\n\n   b\t\tc</p></body></html>";
        assert_eq!(page_to_text(html), "a b c");
    }

    #[test]
    fn never_exceeds_the_char_cap() {
        let big = format!("<html><body><p>{}</p></body></html>", "word ".repeat(10_000));
        let text = page_to_text(&big);
        assert!(text.chars().count() <= MAX_PAGE_TEXT_CHARS);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let s = "é".repeat(20);
        assert_eq!(truncate_chars(&s, 10).chars().count(), 10);
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert!(page_to_text("").trim().is_empty());
    }
}
