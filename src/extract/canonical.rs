//! Embedded canonical product data
//!
//! A page may publish its product record as JSON inside
//! `<script id="product-data">`. When present and well-formed, it wins over
//! every heuristic for the fields it supplies.

use scraper::{Html, Selector};
use serde::Deserialize;

/// Selector for the embedded product block
pub const CANONICAL_SELECTOR: &str = "script#product-data";

/// Fields a page may publish in its embedded product block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CanonicalData {
    pub name: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub usage: Option<Vec<String>>,
}

impl CanonicalData {
    /// `name`, falling back to `title`
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// `image`, falling back to `imageUrl`
    pub fn image_ref(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.image_url.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Reads the embedded product block, if any
///
/// Malformed JSON is logged and treated as absent so extraction falls
/// through to the heuristic tiers.
pub fn parse_canonical(document: &Html) -> Option<CanonicalData> {
    let selector = Selector::parse(CANONICAL_SELECTOR).ok()?;
    let element = document.select(&selector).next()?;
    let raw = element.text().collect::<String>();

    match serde_json::from_str::<CanonicalData>(raw.trim()) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::debug!("Ignoring malformed embedded product data: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Option<CanonicalData> {
        parse_canonical(&Html::parse_document(html))
    }

    #[test]
    fn test_parses_block() {
        let data = parse(
            r#"<html><head><script id="product-data" type="application/json">
            {"name":"Vitamin C","image":"/img/p1.jpg","highlights":["Boosts immunity"],"usage":[]}
            </script></head></html>"#,
        )
        .unwrap();

        assert_eq!(data.display_name(), Some("Vitamin C"));
        assert_eq!(data.image_ref(), Some("/img/p1.jpg"));
        assert_eq!(data.highlights, Some(vec!["Boosts immunity".to_string()]));
        assert_eq!(data.usage, Some(vec![]));
    }

    #[test]
    fn test_alternate_keys() {
        let data = parse(
            r#"<script id="product-data">{"title":"Fish Oil","imageUrl":"https://cdn.example/f.jpg"}</script>"#,
        )
        .unwrap();
        assert_eq!(data.display_name(), Some("Fish Oil"));
        assert_eq!(data.image_ref(), Some("https://cdn.example/f.jpg"));
        assert_eq!(data.highlights, None);
    }

    #[test]
    fn test_name_preferred_over_title() {
        let data = parse(r#"<script id="product-data">{"name":"A","title":"B"}</script>"#).unwrap();
        assert_eq!(data.display_name(), Some("A"));
    }

    #[test]
    fn test_malformed_json_is_absent() {
        assert_eq!(
            parse(r#"<script id="product-data">{"name": "broken",</script>"#),
            None
        );
        assert_eq!(parse(r#"<script id="product-data">["not", "an object"]</script>"#), None);
    }

    #[test]
    fn test_missing_block_is_absent() {
        assert_eq!(parse("<html><body><h1>Title</h1></body></html>"), None);
    }
}
