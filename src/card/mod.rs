//! Card sizing - how tall a feed card is at a given column width.
//!
//! A card is drawn as a bordered box:
//!
//! ```text
//! ┌──────────────┐
//! │title line 1  │  up to `max_title_lines`
//! │title line 2… │
//! │ rust  layout │  tag chips, flowed into rows
//! │2024-12-01    │  creation date
//! └──────────────┘
//! ```
//!
//! The same [`CardLayout`] drives both the height reported to the layout
//! engine and the rendering, so they cannot disagree.

pub mod tag_flow;
pub mod text;

pub use tag_flow::{flow, TagFlow};
pub use text::{display_width, truncate_to_width, wrap_title};

use crate::feed::FeedCard;
use crate::layout::geometry::Size;
use chrono::{DateTime, FixedOffset};
use tracing::trace;

/// Rows taken by the top and bottom border.
const BORDER_ROWS: u16 = 2;
/// Rows taken by the date line.
const DATE_ROWS: u16 = 1;

/// Card content parameters, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMetrics {
    /// Maximum title lines before ellipsis.
    pub max_title_lines: usize,
    /// Cells added around a label to form a chip.
    pub chip_padding: u16,
    /// Gap between chips in a row.
    pub chip_spacing: u16,
    /// Blank rows between chip rows.
    pub chip_line_spacing: u16,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            max_title_lines: 2,
            chip_padding: 2,
            chip_spacing: 1,
            chip_line_spacing: 0,
        }
    }
}

/// Placed content of one card at one width.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// Wrapped title lines (at least one, possibly empty).
    pub title: Vec<String>,
    /// Visible labels, in chip order.
    pub labels: Vec<String>,
    /// Chip frames relative to the chip area.
    pub chips: TagFlow,
    /// Formatted creation date.
    pub date: String,
}

impl CardLayout {
    /// Rows occupied by the chips.
    pub fn chip_rows(&self) -> u16 {
        self.chips.height.ceil() as u16
    }

    /// Total card height in rows.
    pub fn height(&self) -> u16 {
        BORDER_ROWS + self.title.len() as u16 + self.chip_rows() + DATE_ROWS
    }
}

impl CardMetrics {
    /// Width available inside the border.
    pub fn inner_width(column_width: u16) -> u16 {
        column_width.saturating_sub(2)
    }

    /// Lay out `card` for a column `column_width` cells wide.
    pub fn layout(&self, card: &FeedCard, column_width: u16) -> CardLayout {
        let inner = Self::inner_width(column_width);

        let mut title = wrap_title(&card.title, inner as usize, self.max_title_lines);
        if title.is_empty() {
            title.push(String::new());
        }

        let labels: Vec<String> = card.visible_labels().map(str::to_string).collect();
        let sizes: Vec<Size> = labels
            .iter()
            .map(|label| {
                let width = display_width(label) as f64 + f64::from(self.chip_padding);
                Size::new(width, 1.0)
            })
            .collect();
        let chips = flow(
            &sizes,
            f64::from(inner),
            f64::from(self.chip_spacing),
            f64::from(self.chip_line_spacing),
        );

        CardLayout {
            title,
            labels,
            chips,
            date: truncate_to_width(&format_date(&card.created_at), usize::from(inner)),
        }
    }

    /// Height of `card` in rows at `column_width`.
    pub fn height(&self, card: &FeedCard, column_width: u16) -> u16 {
        self.layout(card, column_width).height()
    }
}

/// Format a feed timestamp as `YYYY-MM-DD`.
///
/// Accepts RFC 3339 and `%Y-%m-%dT%H:%M:%S%.f%z`. Anything else is returned
/// unchanged.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// Card heights for the shown cards, cached per column width.
///
/// Heights are recomputed only for cards appended since the last call, or
/// for every card after the width changed or the cache was cleared.
#[derive(Debug, Clone, Default)]
pub struct CardHeights {
    width: Option<u16>,
    heights: Vec<u16>,
}

impl CardHeights {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached height (the feed was replaced).
    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Heights of `cards` at `column_width`, updating the cache as needed.
    pub fn update(&mut self, cards: &[FeedCard], metrics: &CardMetrics, column_width: u16) -> &[u16] {
        if self.width != Some(column_width) {
            self.width = Some(column_width);
            self.heights.clear();
        }
        self.heights.truncate(cards.len());

        let cached = self.heights.len();
        if cached < cards.len() {
            self.heights.extend(
                cards[cached..]
                    .iter()
                    .map(|card| metrics.height(card, column_width)),
            );
            trace!(cached, total = cards.len(), column_width, "Card heights measured");
        }
        &self.heights
    }

    /// Cached heights.
    pub fn heights(&self) -> &[u16] {
        &self.heights
    }

    /// Width the cache was computed for.
    pub fn width(&self) -> Option<u16> {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::sample_card;

    mod sizing {
        use super::*;

        #[test]
        fn minimal_card_is_four_rows() {
            let mut card = sample_card("1", &[]);
            card.title = "Hi".to_string();
            // border, title, date, border
            assert_eq!(CardMetrics::default().height(&card, 20), 4);
        }

        #[test]
        fn long_title_is_capped_at_two_lines() {
            let mut card = sample_card("1", &[]);
            card.title = "a very long title that keeps going well past two lines".to_string();
            let layout = CardMetrics::default().layout(&card, 12);
            assert_eq!(layout.title.len(), 2);
            assert_eq!(layout.height(), 5);
        }

        #[test]
        fn chips_add_rows_and_hide_system_labels() {
            let mut card = sample_card("1", &["rust", "type:blog", "layout", "engine"]);
            card.title = "T".to_string();
            // inner width 12: " rust " (6) + 1 + " layout " (8) > 12
            let layout = CardMetrics::default().layout(&card, 14);
            assert_eq!(layout.labels, vec!["rust", "layout", "engine"]);
            assert_eq!(layout.chip_rows(), 3);
            assert_eq!(layout.height(), 2 + 1 + 3 + 1);
        }

        #[test]
        fn empty_title_still_takes_a_line() {
            let mut card = sample_card("1", &[]);
            card.title = String::new();
            let layout = CardMetrics::default().layout(&card, 20);
            assert_eq!(layout.title, vec![String::new()]);
        }

        #[test]
        fn date_is_cut_to_the_inner_width() {
            let card = sample_card("1", &[]);
            let metrics = CardMetrics::default();
            assert_eq!(metrics.layout(&card, 20).date, "2024-12-01");
            assert_eq!(metrics.layout(&card, 8).date, "2024-…");
        }

        #[test]
        fn narrower_columns_never_shrink_a_card() {
            let card = sample_card("1", &["alpha", "beta", "gamma", "delta"]);
            let metrics = CardMetrics::default();
            let wide = metrics.height(&card, 60);
            let narrow = metrics.height(&card, 14);
            assert!(narrow >= wide);
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn formats_millisecond_utc_timestamp() {
            assert_eq!(format_date("2024-12-29T10:15:30.123Z"), "2024-12-29");
        }

        #[test]
        fn formats_numeric_offset() {
            assert_eq!(format_date("2024-01-05T23:59:59.000+0800"), "2024-01-05");
        }

        #[test]
        fn keeps_unparseable_text() {
            assert_eq!(format_date("yesterday"), "yesterday");
        }
    }

    mod cache {
        use super::*;

        fn cards(n: usize) -> Vec<FeedCard> {
            (0..n).map(|i| sample_card(&i.to_string(), &["tag"])).collect()
        }

        #[test]
        fn appended_cards_are_measured() {
            let metrics = CardMetrics::default();
            let mut cache = CardHeights::new();
            let feed = cards(5);

            assert_eq!(cache.update(&feed[..2], &metrics, 30).len(), 2);
            assert_eq!(cache.update(&feed, &metrics, 30).len(), 5);
            assert_eq!(cache.width(), Some(30));
        }

        #[test]
        fn width_change_remeasures() {
            let metrics = CardMetrics::default();
            let mut cache = CardHeights::new();
            let mut feed = cards(1);
            feed[0].title = "several words in this title".to_string();

            let wide = cache.update(&feed, &metrics, 60)[0];
            let narrow = cache.update(&feed, &metrics, 12)[0];
            assert!(narrow > wide);
        }

        #[test]
        fn fewer_cards_truncates() {
            let metrics = CardMetrics::default();
            let mut cache = CardHeights::new();
            let feed = cards(6);
            cache.update(&feed, &metrics, 30);
            assert_eq!(cache.update(&feed[..3], &metrics, 30).len(), 3);
        }
    }
}
