//! Strategy tables for the scalar fields: name, subtitle, price, specs,
//! description and image

use crate::extract::page::{element_text, Page};
use crate::extract::strategy::{always, has_canonical, Strategy, Tier};
use crate::extract::text::{clean_text, non_empty};
use crate::url::resolve_asset_url;
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

const NAME_SELECTORS: &[&str] = &[
    "h1.product_title",
    "h1.entry-title",
    ".product-title",
    "h1",
    ".product-name h1",
    ".product-name",
    r#"[itemprop="name"]"#,
];

const SUBTITLE_SELECTORS: &[&str] = &[
    ".product-subtitle",
    ".product_title + p",
    "h1 + p",
    ".woocommerce-product-details__short-description p:first-child",
];

const PRICE_SELECTORS: &[&str] = &[
    ".price .amount",
    ".price ins .amount",
    ".price",
    r#"[itemprop="price"]"#,
    ".product-price",
    ".woocommerce-Price-amount",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    ".woocommerce-product-details__short-description",
    ".product-description",
    ".entry-summary > p:first-of-type",
];

const IMAGE_SELECTORS: &[&str] = &[
    ".woocommerce-product-gallery__image img",
    ".product-image img",
    ".wp-post-image",
    r#"img[class*="product"]"#,
    ".entry-content img:first-of-type",
    r#"meta[property="og:image"]"#,
];

/// Image attributes holding the real source, lazy-loading ones included
const IMAGE_SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src"];

/// URL or alt-text tokens marking site chrome rather than product photos
const IMAGE_EXCLUDE_TOKENS: &[&str] = &["logo", "icon", "placeholder"];

/// Images narrower than this (by `width` attribute) are never a fallback pick
const MIN_FALLBACK_IMAGE_WIDTH: u32 = 100;

const MAX_SUBTITLE_CHARS: usize = 100;
const MIN_DESCRIPTION_CHARS: usize = 20;

// ===== Name =====

pub const NAME_STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "canonical-name",
        tier: Tier::Canonical,
        applies: has_canonical,
        extract: name_from_canonical,
    },
    Strategy {
        name: "title-selectors",
        tier: Tier::Structural,
        applies: always,
        extract: name_from_selectors,
    },
    Strategy {
        name: "og-title",
        tier: Tier::Structural,
        applies: always,
        extract: name_from_og_title,
    },
    Strategy {
        name: "title-element",
        tier: Tier::Structural,
        applies: always,
        extract: name_from_title_element,
    },
];

fn name_from_canonical(page: &Page<'_>) -> Option<String> {
    page.canonical?.display_name().and_then(non_empty)
}

fn name_from_selectors(page: &Page<'_>) -> Option<String> {
    NAME_SELECTORS.iter().find_map(|css| page.first_text(css))
}

fn name_from_og_title(page: &Page<'_>) -> Option<String> {
    page.meta_content(r#"meta[property="og:title"]"#)
        .and_then(|title| strip_site_suffix(&title))
}

fn name_from_title_element(page: &Page<'_>) -> Option<String> {
    page.first_text("title")
        .and_then(|title| strip_site_suffix(&title))
}

/// Removes a trailing site name from a page title
///
/// The suffix starts at the first `|`, or at the first dash written as a
/// separator (surrounded by spaces), so hyphenated names like `Omega-3`
/// survive.
pub fn strip_site_suffix(title: &str) -> Option<String> {
    let head = title.split('|').next().unwrap_or("");
    let head = [" - ", " – ", " — "]
        .iter()
        .filter_map(|sep| head.find(sep))
        .min()
        .map_or(head, |pos| &head[..pos]);
    non_empty(head)
}

// ===== Subtitle =====

pub const SUBTITLE_STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "subtitle-selectors",
        tier: Tier::Structural,
        applies: always,
        extract: subtitle_from_selectors,
    },
    Strategy {
        name: "heading-block-lines",
        tier: Tier::Structural,
        applies: always,
        extract: subtitle_from_heading_block,
    },
];

fn is_subtitle_candidate(text: &str, name: Option<&str>) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
        && Some(text) != name
        && text.chars().count() < MAX_SUBTITLE_CHARS
}

fn subtitle_from_selectors(page: &Page<'_>) -> Option<String> {
    SUBTITLE_SELECTORS
        .iter()
        .filter_map(|css| page.first_text(css))
        .find(|text| is_subtitle_candidate(text, page.name))
}

/// Secondary line inside the block that holds the main heading
fn subtitle_from_heading_block(page: &Page<'_>) -> Option<String> {
    let heading = page.select_first("h1")?;
    let parent = heading.parent().and_then(ElementRef::wrap)?;
    let heading_text = clean_text(&element_text(&heading));

    let block = element_text(&parent);
    let lines: Vec<String> = block.lines().filter_map(non_empty).collect();
    if lines.len() < 2 {
        return None;
    }

    lines
        .into_iter()
        .find(|line| *line != heading_text && is_subtitle_candidate(line, page.name))
}

// ===== Price =====

pub const PRICE_STRATEGIES: &[Strategy<String>] = &[Strategy {
    name: "price-selectors",
    tier: Tier::Structural,
    applies: always,
    extract: price_from_selectors,
}];

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$[\d,]+\.?\d*").expect("valid price pattern"))
}

fn price_from_selectors(page: &Page<'_>) -> Option<String> {
    PRICE_SELECTORS.iter().find_map(|css| {
        let element = page.select_first(css)?;
        let text = element_text(&element);
        price_pattern().find(&text).map(|m| m.as_str().to_string())
    })
}

// ===== Specs =====

pub const SPECS_STRATEGIES: &[Strategy<String>] = &[Strategy {
    name: "body-text-patterns",
    tier: Tier::Lexical,
    applies: always,
    extract: specs_from_text,
}];

/// Ordered quantity/unit patterns; capture group 1 is the value
fn specs_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(\d+\s*粒\s*[/|]\s*瓶)",
            r"(\d+\s*粒)",
            r"(\d+\s*颗)",
            r"(?i)(\d+\s*(?:capsules|softgels|tablets|caplets))",
            r"(?i)(\d+\s*mg)(?:[^a-z]|$)",
            r"(?i)(\d+\s*ml)(?:[^a-z]|$)",
            r"(\d+\s*g)(?:[^A-Za-z]|$)",
            r"(?:规格|(?i:specs?|size))\s*[：:]\s*([^\n]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid specs pattern"))
        .collect()
    })
}

/// First quantity/unit match in `text`, by pattern priority
pub fn scan_specs(text: &str) -> Option<String> {
    specs_patterns().iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let value = caps.get(1).or_else(|| caps.get(0))?;
        non_empty(value.as_str())
    })
}

fn specs_from_text(page: &Page<'_>) -> Option<String> {
    scan_specs(&page.visible_text())
}

// ===== Description =====

pub const DESCRIPTION_STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "description-selectors",
        tier: Tier::Structural,
        applies: always,
        extract: description_from_selectors,
    },
    Strategy {
        name: "meta-description",
        tier: Tier::Structural,
        applies: always,
        extract: description_from_meta,
    },
];

fn is_description(text: &str) -> bool {
    text.chars().count() > MIN_DESCRIPTION_CHARS
}

fn description_from_selectors(page: &Page<'_>) -> Option<String> {
    DESCRIPTION_SELECTORS
        .iter()
        .filter_map(|css| page.first_text(css))
        .find(|text| is_description(text))
}

fn description_from_meta(page: &Page<'_>) -> Option<String> {
    page.meta_content(r#"meta[name="description"]"#)
        .filter(|text| is_description(text))
}

// ===== Image =====

pub const IMAGE_STRATEGIES: &[Strategy<String>] = &[
    Strategy {
        name: "canonical-image",
        tier: Tier::Canonical,
        applies: has_canonical,
        extract: image_from_canonical,
    },
    Strategy {
        name: "gallery-selectors",
        tier: Tier::Structural,
        applies: always,
        extract: image_from_selectors,
    },
    Strategy {
        name: "first-wide-image",
        tier: Tier::Fallback,
        applies: always,
        extract: image_from_wide_images,
    },
];

fn image_from_canonical(page: &Page<'_>) -> Option<String> {
    let raw = page.canonical?.image_ref()?;
    resolve_asset_url(raw, page.url)
}

/// True when a URL or alt text marks a logo, icon or placeholder
pub fn is_excluded_image(src: &str, alt: &str) -> bool {
    let src = src.to_lowercase();
    let alt = alt.to_lowercase();
    IMAGE_EXCLUDE_TOKENS
        .iter()
        .any(|token| src.contains(token) || alt.contains(token))
}

/// Source reference of an `img` (lazy-load attributes included) or `meta`
fn image_source<'e>(element: &'e ElementRef<'_>) -> Option<&'e str> {
    let value = element.value();
    if value.name() == "meta" {
        return value.attr("content").filter(|s| !s.trim().is_empty());
    }
    IMAGE_SOURCE_ATTRS
        .iter()
        .filter_map(|attr| value.attr(attr))
        .find(|s| !s.trim().is_empty())
}

fn image_from_selectors(page: &Page<'_>) -> Option<String> {
    IMAGE_SELECTORS.iter().find_map(|css| {
        let element = page.select_first(css)?;
        let src = image_source(&element)?;
        let alt = element.value().attr("alt").unwrap_or("");
        if is_excluded_image(src, alt) {
            return None;
        }
        resolve_asset_url(src, page.url)
    })
}

fn image_from_wide_images(page: &Page<'_>) -> Option<String> {
    page.select_all("img").into_iter().find_map(|element| {
        let width = element
            .value()
            .attr("width")
            .and_then(|w| w.trim().trim_end_matches("px").parse::<u32>().ok())
            .unwrap_or(0);
        if width <= MIN_FALLBACK_IMAGE_WIDTH {
            return None;
        }
        let src = image_source(&element)?;
        let alt = element.value().attr("alt").unwrap_or("");
        if is_excluded_image(src, alt) {
            return None;
        }
        resolve_asset_url(src, page.url)
    })
}
