//! Paging over a loaded feed.
//!
//! The whole feed is held in memory; the pager only decides how many cards
//! are shown. `refresh` goes back to the first page and `load_more` reveals
//! the next one.

use super::FeedCard;
use std::num::NonZeroUsize;
use tracing::debug;

/// Cards per page when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Page-wise view over a feed.
///
/// # Invariants
/// - `shown <= cards.len()`
#[derive(Debug, Clone)]
pub struct FeedPager {
    cards: Vec<FeedCard>,
    page_size: NonZeroUsize,
    shown: usize,
}

impl FeedPager {
    /// Create a pager showing the first page of `cards`.
    pub fn new(cards: Vec<FeedCard>, page_size: NonZeroUsize) -> Self {
        let mut pager = Self {
            cards,
            page_size,
            shown: 0,
        };
        pager.refresh();
        pager
    }

    /// Show only the first page again.
    pub fn refresh(&mut self) {
        self.shown = self.page_size.get().min(self.cards.len());
    }

    /// Replace the feed (after a reload) and show its first page.
    pub fn replace(&mut self, cards: Vec<FeedCard>) {
        self.cards = cards;
        self.refresh();
    }

    /// Reveal the next page.
    ///
    /// Returns `false` when every card was already shown.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        let before = self.shown;
        self.shown = (self.shown + self.page_size.get()).min(self.cards.len());
        debug!(from = before, to = self.shown, total = self.cards.len(), "Loaded next page");
        true
    }

    /// True while some cards are not shown yet.
    pub fn has_more(&self) -> bool {
        self.shown < self.cards.len()
    }

    /// Cards currently shown, in feed order.
    pub fn shown(&self) -> &[FeedCard] {
        &self.cards[..self.shown]
    }

    /// Total cards in the feed.
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Number of pages shown.
    pub fn pages_shown(&self) -> usize {
        self.shown.div_ceil(self.page_size.get())
    }

    /// Cards per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}
