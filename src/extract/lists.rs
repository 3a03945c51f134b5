//! Highlight and usage lists
//!
//! Lists come from the embedded block when it supplies them, otherwise from
//! the elements following the first heading that names the section. Only
//! highlights fall back to collecting every list item on the page.

use crate::extract::page::{element_text, heading_rank, Page};
use crate::extract::strategy::{always, has_canonical, Strategy, Tier};
use crate::extract::text::{clean_list_item, clean_text};
use scraper::ElementRef;

/// Elements that may introduce a section
const ANCHOR_SELECTOR: &str = "h2, h3, h4, strong";

pub const HIGHLIGHT_KEYWORDS: &[&str] = &[
    "功效",
    "特点",
    "成分",
    "优势",
    "好处",
    "benefits",
    "features",
    "ingredients",
    "highlights",
];

pub const USAGE_KEYWORDS: &[&str] = &[
    "用法",
    "用量",
    "服用",
    "使用方法",
    "建议",
    "dosage",
    "directions",
    "how to use",
    "suggested use",
    "usage",
];

/// Words that make a bare paragraph read like a dosing instruction
const FREQUENCY_MARKERS: &[&str] = &[
    "每", "次", "天", "daily", "per day", "times", "once", "twice", "every",
];

const HIGHLIGHT_SIBLING_LIMIT: usize = 10;
const USAGE_SIBLING_LIMIT: usize = 5;

const MIN_HIGHLIGHT_CHARS: usize = 3;
const MIN_USAGE_CHARS: usize = 5;

/// Length window for the page-wide highlight fallback, exclusive
const FALLBACK_ITEM_CHARS: (usize, usize) = (5, 100);

/// How one kind of section is located and read
struct Section {
    keywords: &'static [&'static str],
    sibling_limit: usize,
    min_item_chars: usize,
    paragraphs: bool,
}

const HIGHLIGHTS: Section = Section {
    keywords: HIGHLIGHT_KEYWORDS,
    sibling_limit: HIGHLIGHT_SIBLING_LIMIT,
    min_item_chars: MIN_HIGHLIGHT_CHARS,
    paragraphs: false,
};

const USAGE: Section = Section {
    keywords: USAGE_KEYWORDS,
    sibling_limit: USAGE_SIBLING_LIMIT,
    min_item_chars: MIN_USAGE_CHARS,
    paragraphs: true,
};

pub const HIGHLIGHT_STRATEGIES: &[Strategy<Vec<String>>] = &[
    Strategy {
        name: "canonical-highlights",
        tier: Tier::Canonical,
        applies: has_canonical,
        extract: highlights_from_canonical,
    },
    Strategy {
        name: "anchored-highlights",
        tier: Tier::Anchored,
        applies: always,
        extract: highlights_from_anchor,
    },
    Strategy {
        name: "page-list-items",
        tier: Tier::Fallback,
        applies: always,
        extract: highlights_from_all_lists,
    },
];

pub const USAGE_STRATEGIES: &[Strategy<Vec<String>>] = &[
    Strategy {
        name: "canonical-usage",
        tier: Tier::Canonical,
        applies: has_canonical,
        extract: usage_from_canonical,
    },
    Strategy {
        name: "anchored-usage",
        tier: Tier::Anchored,
        applies: always,
        extract: usage_from_anchor,
    },
];

// An embedded list is authoritative even when empty.
fn highlights_from_canonical(page: &Page<'_>) -> Option<Vec<String>> {
    page.canonical?.highlights.clone()
}

fn usage_from_canonical(page: &Page<'_>) -> Option<Vec<String>> {
    page.canonical?.usage.clone()
}

fn highlights_from_anchor(page: &Page<'_>) -> Option<Vec<String>> {
    anchored_items(page, &HIGHLIGHTS)
}

fn usage_from_anchor(page: &Page<'_>) -> Option<Vec<String>> {
    anchored_items(page, &USAGE)
}

fn highlights_from_all_lists(page: &Page<'_>) -> Option<Vec<String>> {
    let (min, max) = FALLBACK_ITEM_CHARS;
    let items: Vec<String> = page
        .select_all("ul li, ol li")
        .iter()
        .map(|li| clean_list_item(&element_text(li)))
        .filter(|item| {
            let len = item.chars().count();
            len > min && len < max
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

/// First anchor element whose text names the section
fn find_anchor<'a>(page: &Page<'a>, keywords: &[&str]) -> Option<ElementRef<'a>> {
    page.select_all(ANCHOR_SELECTOR)
        .into_iter()
        .find(|el| contains_keyword(&element_text(el), keywords))
}

/// True when `element` is a heading that closes the anchor's section
fn closes_section(anchor: &ElementRef<'_>, element: &ElementRef<'_>) -> bool {
    match (heading_rank(anchor), heading_rank(element)) {
        (Some(anchor_rank), Some(rank)) => rank <= anchor_rank,
        (None, Some(_)) => true,
        _ => false,
    }
}

fn anchored_items(page: &Page<'_>, section: &Section) -> Option<Vec<String>> {
    let anchor = find_anchor(page, section.keywords)?;
    let mut items = Vec::new();

    let siblings = anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take(section.sibling_limit);

    for sibling in siblings {
        if closes_section(&anchor, &sibling) {
            break;
        }
        match sibling.value().name() {
            "ul" | "ol" => {
                items.extend(
                    list_items(&sibling)
                        .into_iter()
                        .filter(|item| item.chars().count() > section.min_item_chars),
                );
                break;
            }
            "p" if section.paragraphs => {
                let text = clean_text(&element_text(&sibling));
                if contains_keyword(&text, FREQUENCY_MARKERS)
                    && text.chars().count() > section.min_item_chars
                {
                    items.push(text);
                }
            }
            _ => {}
        }
    }

    (!items.is_empty()).then_some(items)
}

/// Cleaned text of every `li` inside a list element
fn list_items(list: &ElementRef<'_>) -> Vec<String> {
    list.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(|li| clean_list_item(&element_text(&li)))
        .collect()
}
