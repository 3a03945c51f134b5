//! The product record handed from extraction to layout

use crate::extract::text::{clean_list_item, non_empty, truncate_chars, MAX_DESCRIPTION_CHARS};
use serde::{Deserialize, Serialize};

/// Name used when no extraction tier finds a title
pub const PLACEHOLDER_NAME: &str = "Product Name";

/// Maximum number of highlight rows kept
pub const MAX_HIGHLIGHTS: usize = 5;

/// Maximum number of usage rows kept
pub const MAX_USAGE: usize = 3;

/// Canonical product data, the only contract between extraction and layout
///
/// Construct through [`ProductRecord::builder`] so the invariants hold:
/// strings are whitespace-normalized, list fields are bounded and never hold
/// empty entries, `subtitle` never equals `name`, and `image` is absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub subtitle: Option<String>,
    pub price: Option<String>,
    pub specs: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub highlights: Vec<String>,
    pub usage: Vec<String>,
    pub url: String,
}

impl ProductRecord {
    /// Starts a record for the given absolute page URL
    pub fn builder(url: impl Into<String>) -> ProductRecordBuilder {
        ProductRecordBuilder {
            record: ProductRecord {
                name: PLACEHOLDER_NAME.to_string(),
                subtitle: None,
                price: None,
                specs: None,
                description: None,
                image: None,
                highlights: Vec::new(),
                usage: Vec::new(),
                url: url.into(),
            },
        }
    }

    /// True when no tier produced a name
    pub fn has_placeholder_name(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    /// Returns a new record with user overrides merged in
    ///
    /// Overrides go through the same normalization and bounds as extracted
    /// values. Blank overrides leave the extracted value in place.
    pub fn with_overrides(&self, overrides: &RecordOverrides) -> ProductRecord {
        let mut builder = ProductRecordBuilder {
            record: self.clone(),
        };

        if let Some(title) = overrides.title.as_deref() {
            builder = builder.name(title);
        }
        if let Some(subtitle) = overrides.subtitle.as_deref() {
            builder = builder.subtitle(subtitle);
        }
        if overrides.highlights.iter().any(|h| non_empty(h).is_some()) {
            builder = builder.highlights(overrides.highlights.iter().map(String::as_str));
        }
        if overrides.usage.iter().any(|u| non_empty(u).is_some()) {
            builder = builder.usage(overrides.usage.iter().map(String::as_str));
        }

        builder.build()
    }
}

/// Manually supplied values that replace extracted ones before layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOverrides {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub highlights: Vec<String>,
    pub usage: Vec<String>,
}

impl RecordOverrides {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.highlights.is_empty()
            && self.usage.is_empty()
    }
}

/// Builder enforcing the record invariants field by field
#[derive(Debug, Clone)]
pub struct ProductRecordBuilder {
    record: ProductRecord,
}

impl ProductRecordBuilder {
    /// Sets the name; blank input keeps the current value
    pub fn name(mut self, name: &str) -> Self {
        if let Some(name) = non_empty(name) {
            self.record.name = name;
        }
        self
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        if let Some(subtitle) = non_empty(subtitle) {
            self.record.subtitle = Some(subtitle);
        }
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        if let Some(price) = non_empty(price) {
            self.record.price = Some(price);
        }
        self
    }

    pub fn specs(mut self, specs: &str) -> Self {
        if let Some(specs) = non_empty(specs) {
            self.record.specs = Some(specs);
        }
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        if let Some(description) = non_empty(description) {
            self.record.description = Some(truncate_chars(&description, MAX_DESCRIPTION_CHARS));
        }
        self
    }

    /// Sets the image; callers pass an already-resolved absolute URL
    pub fn image(mut self, absolute_url: &str) -> Self {
        if let Some(image) = non_empty(absolute_url) {
            self.record.image = Some(image);
        }
        self
    }

    /// Replaces the highlights, cleaning each item and keeping the first five
    pub fn highlights<'a>(mut self, items: impl IntoIterator<Item = &'a str>) -> Self {
        self.record.highlights = bounded_items(items, MAX_HIGHLIGHTS);
        self
    }

    /// Replaces the usage rows, cleaning each item and keeping the first three
    pub fn usage<'a>(mut self, items: impl IntoIterator<Item = &'a str>) -> Self {
        self.record.usage = bounded_items(items, MAX_USAGE);
        self
    }

    pub fn build(mut self) -> ProductRecord {
        if self.record.subtitle.as_deref() == Some(self.record.name.as_str()) {
            self.record.subtitle = None;
        }
        self.record
    }
}

fn bounded_items<'a>(items: impl IntoIterator<Item = &'a str>, max: usize) -> Vec<String> {
    items
        .into_iter()
        .map(clean_list_item)
        .filter(|item| !item.is_empty())
        .take(max)
        .collect()
}
