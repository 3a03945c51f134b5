//! Ordered strategy tables
//!
//! Every field group owns a slice of [`Strategy`] values. They are tried in
//! order; the first one that applies and yields a value wins for that field
//! only, so different fields may resolve through different tiers.

use crate::extract::page::Page;
use std::fmt;

/// Extraction tier, from most to least trustworthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Embedded JSON product block
    Canonical,
    /// Semantic selectors, meta tags, title element
    Structural,
    /// Regular patterns over the visible page text
    Lexical,
    /// Lists found under a keyword heading
    Anchored,
    /// Page-wide last resort
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Canonical => "canonical",
            Self::Structural => "structural",
            Self::Lexical => "lexical",
            Self::Anchored => "anchored",
            Self::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// One `(predicate, extractor)` entry of a strategy table
pub struct Strategy<T> {
    /// Stable identifier used in logs and tests
    pub name: &'static str,
    pub tier: Tier,
    /// Cheap check deciding whether `extract` is worth running
    pub applies: fn(&Page<'_>) -> bool,
    pub extract: fn(&Page<'_>) -> Option<T>,
}

impl<T> Strategy<T> {
    /// Runs this strategy alone, honoring its predicate
    pub fn run(&self, page: &Page<'_>) -> Option<T> {
        if (self.applies)(page) {
            (self.extract)(page)
        } else {
            None
        }
    }
}

/// The winning value of a strategy table and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<T> {
    pub value: T,
    pub strategy: &'static str,
    pub tier: Tier,
}

/// Predicate for strategies that can always run
pub fn always(_: &Page<'_>) -> bool {
    true
}

/// Predicate for strategies reading the embedded product block
pub fn has_canonical(page: &Page<'_>) -> bool {
    page.canonical.is_some()
}

/// Tries each strategy in order and returns the first value produced
pub fn run_strategies<T>(field: &str, strategies: &[Strategy<T>], page: &Page<'_>) -> Option<Hit<T>> {
    for strategy in strategies {
        if let Some(value) = strategy.run(page) {
            tracing::debug!(
                "{}: resolved by {} ({} tier)",
                field,
                strategy.name,
                strategy.tier
            );
            return Some(Hit {
                value,
                strategy: strategy.name,
                tier: strategy.tier,
            });
        }
        tracing::trace!("{}: {} yielded nothing", field, strategy.name);
    }

    tracing::debug!("{}: no strategy produced a value", field);
    None
}
