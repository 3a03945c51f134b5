//! Read-only view of a parsed product page shared by all strategies

use crate::extract::canonical::CanonicalData;
use crate::extract::text::non_empty;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Document, source URL and facts resolved so far
#[derive(Clone, Copy)]
pub struct Page<'a> {
    pub document: &'a Html,
    pub url: &'a Url,
    pub canonical: Option<&'a CanonicalData>,
    /// Product name once the name strategies have run
    pub name: Option<&'a str>,
}

impl<'a> Page<'a> {
    pub fn new(document: &'a Html, url: &'a Url, canonical: Option<&'a CanonicalData>) -> Self {
        Self {
            document,
            url,
            canonical,
            name: None,
        }
    }

    /// Same page with the resolved product name attached
    pub fn with_name<'b>(&self, name: Option<&'b str>) -> Page<'b>
    where
        'a: 'b,
    {
        Page {
            document: self.document,
            url: self.url,
            canonical: self.canonical,
            name,
        }
    }

    /// All elements matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(css) {
            Ok(selector) => self.document.select(&selector).collect(),
            Err(e) => {
                tracing::warn!("Invalid selector '{}': {:?}", css, e);
                Vec::new()
            }
        }
    }

    /// First element matching `css`
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(css).ok()?;
        self.document.select(&selector).next()
    }

    /// Cleaned text of the first element matching `css`, if non-empty
    pub fn first_text(&self, css: &str) -> Option<String> {
        self.select_first(css).and_then(|el| non_empty(&element_text(&el)))
    }

    /// Cleaned `content` attribute of the first matching meta element
    pub fn meta_content(&self, css: &str) -> Option<String> {
        self.select_first(css)
            .and_then(|el| el.value().attr("content").and_then(non_empty))
    }

    /// Raw text the reader would see in the body, line breaks preserved
    pub fn visible_text(&self) -> String {
        let root = self
            .select_first("body")
            .unwrap_or_else(|| self.document.root_element());

        let mut out = String::new();
        for node in root.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| HIDDEN_ELEMENTS.contains(&el.value().name()));
            if !hidden {
                out.push_str(text);
            }
        }
        out
    }
}

/// Concatenated raw text of an element and its descendants
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Heading rank of `h1`..`h6`, None for other elements
pub fn heading_rank(element: &ElementRef<'_>) -> Option<u8> {
    let name = element.value().name();
    let rank = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&rank).then_some(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://shop.example/p1").unwrap()
    }

    #[test]
    fn test_first_text_skips_to_non_empty() {
        let document = Html::parse_document("<h1>  Fish \n Oil </h1>");
        let url = url();
        let page = Page::new(&document, &url, None);
        assert_eq!(page.first_text("h1").as_deref(), Some("Fish Oil"));
        assert_eq!(page.first_text("h2"), None);
    }

    #[test]
    fn test_meta_content() {
        let document = Html::parse_document(
            r#"<head><meta property="og:title" content=" Omega-3 | Shop "></head>"#,
        );
        let url = url();
        let page = Page::new(&document, &url, None);
        assert_eq!(
            page.meta_content(r#"meta[property="og:title"]"#).as_deref(),
            Some("Omega-3 | Shop")
        );
    }

    #[test]
    fn test_visible_text_excludes_scripts() {
        let document = Html::parse_document(
            r#"<html><head><title>60 g title</title></head><body>
            <p>Net 120 capsules</p>
            <script>var size = "500 mg";</script>
            <style>.x { width: 10px }</style>
            </body></html>"#,
        );
        let url = url();
        let page = Page::new(&document, &url, None);
        let text = page.visible_text();
        assert!(text.contains("Net 120 capsules"));
        assert!(!text.contains("500 mg"));
        assert!(!text.contains("width"));
        assert!(!text.contains("60 g title"));
    }

    #[test]
    fn test_heading_rank() {
        let document = Html::parse_document("<h3>a</h3><header>b</header><strong>c</strong>");
        let url = url();
        let page = Page::new(&document, &url, None);
        assert_eq!(heading_rank(&page.select_first("h3").unwrap()), Some(3));
        assert_eq!(heading_rank(&page.select_first("header").unwrap()), None);
        assert_eq!(heading_rank(&page.select_first("strong").unwrap()), None);
    }
}
