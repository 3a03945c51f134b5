//! Product extraction from retrieved HTML
//!
//! Each field group is resolved independently by its own strategy table, so
//! a page with embedded data for the name but none for the price still gets
//! a price from the selector tier.

pub mod canonical;
pub mod fields;
pub mod lists;
pub mod page;
pub mod strategy;
pub mod text;

pub use canonical::{parse_canonical, CanonicalData};
pub use page::Page;
pub use strategy::{run_strategies, Hit, Strategy, Tier};

use crate::record::ProductRecord;
use scraper::Html;
use url::Url;

/// Builds a [`ProductRecord`] from a parsed document
///
/// Never fails: every field that no strategy resolves keeps its default,
/// and the name falls back to the placeholder.
///
/// # Arguments
///
/// * `document` - Parsed page
/// * `page_url` - Final page URL, used to absolutize the image reference
pub fn extract(document: &Html, page_url: &Url) -> ProductRecord {
    let canonical = parse_canonical(document);
    let page = Page::new(document, page_url, canonical.as_ref());

    let name = run_strategies("name", fields::NAME_STRATEGIES, &page).map(|hit| hit.value);
    let page = page.with_name(name.as_deref());

    let mut builder = ProductRecord::builder(page_url.as_str());

    if let Some(name) = &name {
        builder = builder.name(name);
    }
    if let Some(hit) = run_strategies("subtitle", fields::SUBTITLE_STRATEGIES, &page) {
        builder = builder.subtitle(&hit.value);
    }
    if let Some(hit) = run_strategies("price", fields::PRICE_STRATEGIES, &page) {
        builder = builder.price(&hit.value);
    }
    if let Some(hit) = run_strategies("specs", fields::SPECS_STRATEGIES, &page) {
        builder = builder.specs(&hit.value);
    }
    if let Some(hit) = run_strategies("description", fields::DESCRIPTION_STRATEGIES, &page) {
        builder = builder.description(&hit.value);
    }
    if let Some(hit) = run_strategies("image", fields::IMAGE_STRATEGIES, &page) {
        builder = builder.image(&hit.value);
    }
    if let Some(hit) = run_strategies("highlights", lists::HIGHLIGHT_STRATEGIES, &page) {
        builder = builder.highlights(hit.value.iter().map(String::as_str));
    }
    if let Some(hit) = run_strategies("usage", lists::USAGE_STRATEGIES, &page) {
        builder = builder.usage(hit.value.iter().map(String::as_str));
    }

    let record = builder.build();
    tracing::debug!(
        "Extracted '{}' ({} highlights, {} usage rows, image: {})",
        record.name,
        record.highlights.len(),
        record.usage.len(),
        record.image.is_some()
    );
    record
}

/// Parses raw HTML and extracts its product record
///
/// # Example
///
/// ```
/// use product_poster::extract_product;
/// use url::Url;
///
/// let url = Url::parse("https://shop.example/p/1").unwrap();
/// let record = extract_product("<h1 class=\"product_title\">Fish Oil</h1>", &url);
/// assert_eq!(record.name, "Fish Oil");
/// ```
pub fn extract_product(html: &str, page_url: &Url) -> ProductRecord {
    let document = Html::parse_document(html);
    extract(&document, page_url)
}
