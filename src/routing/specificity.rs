//! Specificity ranking between routes matching the same path.
//!
//! # Ordering
//! ```text
//! per-segment literal character counts, compared left to right:
//!     first differing position decides, larger count wins
//! all positions equal:
//!     lower insertion index wins
//! ```
//!
//! # Design Decisions
//! - Leftmost segment dominates, later segments only break ties
//! - A literal prefix next to a macro outranks a bare macro
//! - A pure literal outranks any templated segment matching the same text,
//!   since a capture is never empty
//! - The order is total: insertion indexes are unique

use std::cmp::Ordering;

use crate::routing::template::{PathTemplate, SegmentTemplate};

/// Ranking key of one candidate. Greater is more specific.
#[derive(Debug, Clone, Copy)]
pub struct Specificity<'a> {
    template: &'a PathTemplate,
    index: usize,
}

impl<'a> Specificity<'a> {
    pub fn new(template: &'a PathTemplate, index: usize) -> Self {
        Self { template, index }
    }

    /// Per-segment literal character counts, in path order.
    pub fn literal_counts(&self) -> Vec<usize> {
        self.counts().collect()
    }

    fn counts(&self) -> impl Iterator<Item = usize> + 'a {
        let template = self.template;
        template
            .segments()
            .iter()
            .map(SegmentTemplate::literal_char_count)
    }
}

impl Ord for Specificity<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.counts()
            .cmp(other.counts())
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Specificity<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Specificity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Specificity<'_> {}
