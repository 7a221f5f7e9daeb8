//! Locale-aware card name ordering.
//!
//! Card names are Japanese, so ordering uses the ICU4X `ja` collator. If the
//! collator cannot be constructed the comparer falls back to code point order,
//! which sorts katakana and hiragana apart and is a known limitation.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use log::warn;

pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    /// Creates a Japanese collator, falling back to code point order.
    pub fn japanese() -> Self {
        match Collator::try_new(&locale!("ja").into(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(e) => {
                warn!("Japanese collation unavailable, using code point order: {e}");
                Self::code_point()
            }
        }
    }

    /// Plain code point ordering
    pub fn code_point() -> Self {
        Self { collator: None }
    }

    pub fn is_locale_aware(&self) -> bool {
        self.collator.is_some()
    }

    /// Total order over names. Names the collator treats as equal are
    /// tie-broken by code point.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let collated = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        };
        collated.then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::japanese()
    }
}
