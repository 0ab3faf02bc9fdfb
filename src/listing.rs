//! Category listing entries and their display order.
//!
//! A category's `index.html` lists one entry per child. The order is a
//! strict total order applied with a stable sort:
//!
//! 1. Sub-categories first, ascending by name, case-insensitively.
//! 2. Articles next, newest first by their front-matter `date`
//!    (ISO-8601 with offset). Articles whose date is missing or does not
//!    parse count as the oldest possible and land at the end of the bucket.
//! 3. Plain files last, in enumeration order.
//!
//! Ties keep their enumeration order, so for a fixed source layout the
//! listing, and with it the generated page, is deterministic.

use crate::frontmatter::ArticleMeta;
use crate::tree::NodeKind;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;

/// One row of a category index page.
#[derive(Debug, Clone)]
pub struct ListingEntry {
    pub kind: NodeKind,
    /// Display name: the child's name at the destination.
    pub name: String,
    /// Hyperlink relative to the category page, pointing at the child's
    /// own `index.html`.
    pub href: String,
    /// Front matter, present for articles whose index file was read.
    pub meta: Option<ArticleMeta>,
}

impl ListingEntry {
    fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.meta.as_ref().and_then(ArticleMeta::parsed_date)
    }
}

/// Sort a listing in place. Stable, so ties retain enumeration order.
pub fn sort(entries: &mut [ListingEntry]) {
    entries.sort_by(compare);
}

/// The listing order described in the module docs.
pub fn compare(a: &ListingEntry, b: &ListingEntry) -> Ordering {
    bucket(a.kind).cmp(&bucket(b.kind)).then_with(|| match a.kind {
        NodeKind::Category => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase()),
        // Descending; None compares below every Some, which puts
        // undated articles last.
        NodeKind::Article => b.date().cmp(&a.date()),
        NodeKind::Leaf => Ordering::Equal,
    })
}

fn bucket(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Category => 0,
        NodeKind::Article => 1,
        NodeKind::Leaf => 2,
    }
}
