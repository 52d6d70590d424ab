//! Metrics provider over the shown feed cards.

use super::state::ViewSettings;
use crate::layout::{EdgeInsets, MetricsProvider, Size};

/// Rows taken by the feed header.
pub const HEADER_ROWS: f64 = 1.0;
/// Rows taken by the feed footer.
pub const FOOTER_ROWS: f64 = 1.0;

/// One section: a header row, one item per card, a footer row.
#[derive(Debug, Clone, Copy)]
pub struct FeedMetrics<'a> {
    heights: &'a [u16],
    settings: &'a ViewSettings,
}

impl<'a> FeedMetrics<'a> {
    /// Provider over cards of the given heights.
    pub fn new(heights: &'a [u16], settings: &'a ViewSettings) -> Self {
        Self { heights, settings }
    }
}

impl MetricsProvider for FeedMetrics<'_> {
    fn section_count(&self) -> usize {
        1
    }

    fn item_count(&self, section: usize) -> usize {
        if section == 0 {
            self.heights.len()
        } else {
            0
        }
    }

    fn item_size(&self, _section: usize, item: usize) -> Option<Size> {
        let height = *self.heights.get(item)?;
        Some(Size::new(0.0, f64::from(height)))
    }

    fn section_inset(&self, _section: usize) -> Option<EdgeInsets> {
        Some(self.settings.section_inset)
    }

    fn line_spacing(&self, _section: usize) -> Option<f64> {
        Some(self.settings.column_spacing)
    }

    fn interitem_spacing(&self, _section: usize) -> Option<f64> {
        Some(self.settings.item_spacing)
    }

    fn header_size(&self, _section: usize) -> Option<Size> {
        Some(Size::new(0.0, HEADER_ROWS))
    }

    fn footer_size(&self, _section: usize) -> Option<Size> {
        Some(Size::new(0.0, FOOTER_ROWS))
    }
}
