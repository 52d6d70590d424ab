//! FeedViewState - viewer state independent of the terminal
//!
//! Owns the pager, the card height cache and the layout engine, and turns
//! user intent (scroll, select, load more, change columns) into engine
//! calls. Everything here is pure: the event loop in [`super::FeedApp`]
//! performs all I/O.
//!
//! # Relayout Policy
//! A layout pass runs only when the engine reports `needs_prepare()`: after a
//! width change, a column count change or a change of the shown cards.
//! Vertical scrolling and height-only resizes reuse the published layout.

use super::provider::FeedMetrics;
use crate::card::{CardHeights, CardLayout, CardMetrics};
use crate::config::{ConfigError, ResolvedConfig};
use crate::feed::{FeedCard, FeedPager, DEFAULT_DETAIL_BASE_URL};
use crate::layout::{
    ColumnCount, EdgeInsets, ElementKind, IndexPath, LayoutAttributes, LayoutError, Point, Rect,
    Size, WaterfallLayout,
};
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// Layout and paging settings validated from the resolved config.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Column count.
    pub columns: ColumnCount,
    /// Gap between columns, in cells.
    pub column_spacing: f64,
    /// Gap between cards in a column, in rows.
    pub item_spacing: f64,
    /// Inset around the cards.
    pub section_inset: EdgeInsets,
    /// Cards per page.
    pub page_size: NonZeroUsize,
    /// Elements per union rect.
    pub union_run: NonZeroUsize,
    /// Base URL of card detail pages.
    pub detail_base_url: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            columns: ColumnCount::ONE,
            column_spacing: 1.0,
            item_spacing: 0.0,
            section_inset: EdgeInsets::new(0.0, 1.0, 1.0, 1.0),
            page_size: crate::feed::pager::DEFAULT_PAGE_SIZE,
            union_run: crate::layout::UnionRectIndex::DEFAULT_RUN_SIZE,
            detail_base_url: DEFAULT_DETAIL_BASE_URL.to_string(),
        }
    }
}

impl TryFrom<&ResolvedConfig> for ViewSettings {
    type Error = ConfigError;

    fn try_from(config: &ResolvedConfig) -> Result<Self, Self::Error> {
        let columns = ColumnCount::new(config.columns).map_err(|err| invalid("columns", err))?;
        let page_size = NonZeroUsize::new(config.page_size)
            .ok_or_else(|| invalid("page_size", "must be at least 1"))?;
        let union_run = NonZeroUsize::new(config.union_run)
            .ok_or_else(|| invalid("union_run", "must be at least 1"))?;

        let column_spacing = non_negative("column_spacing", config.column_spacing)?;
        let item_spacing = non_negative("item_spacing", config.item_spacing)?;

        let inset = config.section_inset;
        let section_inset = EdgeInsets::new(
            non_negative("section_inset.top", inset.top)?,
            non_negative("section_inset.left", inset.left)?,
            non_negative("section_inset.bottom", inset.bottom)?,
            non_negative("section_inset.right", inset.right)?,
        );

        Ok(Self {
            columns,
            column_spacing,
            item_spacing,
            section_inset,
            page_size,
            union_run,
            detail_base_url: config.detail_base_url.clone(),
        })
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(field, format!("{value} is not a finite, non-negative number")))
    }
}

/// The feed viewer's state.
#[derive(Debug, Clone)]
pub struct FeedViewState {
    pager: FeedPager,
    heights: CardHeights,
    card_metrics: CardMetrics,
    settings: ViewSettings,
    layout: WaterfallLayout,
    scroll: usize,
    selected: Option<usize>,
    status: Option<String>,
}

impl FeedViewState {
    /// Create the viewer over `cards` for a card area of `width` x `height`.
    pub fn new(cards: Vec<FeedCard>, settings: ViewSettings, width: u16, height: u16) -> Self {
        let layout = WaterfallLayout::new(Size::new(f64::from(width), f64::from(height)))
            .with_column_count(settings.columns)
            .with_run_size(settings.union_run);

        let mut state = Self {
            pager: FeedPager::new(cards, settings.page_size),
            heights: CardHeights::new(),
            card_metrics: CardMetrics::default(),
            settings,
            layout,
            scroll: 0,
            selected: None,
            status: None,
        };
        state.relayout();
        state
    }

    // === Layout ===

    /// Run a layout pass if the published one is stale.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the previous layout stays published.
    pub fn ensure_layout(&mut self) -> Result<(), LayoutError> {
        if !self.layout.needs_prepare() {
            return Ok(());
        }

        let width = self.card_width();
        let heights = self
            .heights
            .update(self.pager.shown(), &self.card_metrics, width);
        let provider = FeedMetrics::new(heights, &self.settings);
        self.layout.prepare(&provider)?;

        self.clamp_scroll();
        Ok(())
    }

    fn relayout(&mut self) {
        if let Err(err) = self.ensure_layout() {
            self.status = Some(format!("Layout error: {err}"));
        }
    }

    /// Width cards are sized for: the column width, rounded down.
    pub fn card_width(&self) -> u16 {
        self.layout
            .column_width(self.settings.section_inset, self.settings.column_spacing)
            .map_or(0, |w| w.floor().min(f64::from(u16::MAX)) as u16)
    }

    /// Content of the card at `index` as it is drawn.
    pub fn card_layout(&self, index: usize) -> Option<CardLayout> {
        let card = self.pager.shown().get(index)?;
        Some(self.card_metrics.layout(card, self.card_width()))
    }

    /// New card area size. Only a width change causes a layout pass.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout
            .set_bounds(Size::new(f64::from(width), f64::from(height)));
        self.relayout();
        self.clamp_scroll();
    }

    /// Change the column count.
    pub fn set_columns(&mut self, columns: ColumnCount) {
        if columns == self.layout.column_count() {
            return;
        }
        let previous = self.layout.column_count();
        self.layout.set_column_count(columns);

        match self.ensure_layout() {
            Ok(()) => {
                self.status = Some(format!("{} columns", columns.get()));
                info!(columns = columns.get(), "Column count changed");
            }
            Err(err) => {
                self.layout.set_column_count(previous);
                self.relayout();
                self.status = Some(format!("Cannot use {} columns: {err}", columns.get()));
            }
        }
    }

    /// Add one column.
    pub fn more_columns(&mut self) {
        let next = self.layout.column_count().get().saturating_add(1);
        if let Ok(columns) = ColumnCount::new(next) {
            self.set_columns(columns);
        }
    }

    /// Remove one column, keeping at least one.
    pub fn fewer_columns(&mut self) {
        let next = self.layout.column_count().get().saturating_sub(1);
        if let Ok(columns) = ColumnCount::new(next) {
            self.set_columns(columns);
        }
    }

    // === Scrolling ===

    /// Rows scrolled past the top.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        let overflow = self.layout.content_extent().height - self.layout.bounds().height;
        if overflow > 0.0 {
            overflow.ceil() as usize
        } else {
            0
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scroll by `delta` rows. Reaching the bottom while scrolling down
    /// reveals the next page.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());

        if delta > 0 && self.scroll == self.max_scroll() && self.pager.has_more() {
            self.load_more();
        }
    }

    fn page_step(&self) -> isize {
        let rows = self.layout.bounds().height as isize;
        (rows - 1).max(1)
    }

    /// Scroll up one viewport.
    pub fn page_up(&mut self) {
        self.scroll_by(-self.page_step());
    }

    /// Scroll down one viewport.
    pub fn page_down(&mut self) {
        self.scroll_by(self.page_step());
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump to the last row.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// The visible part of the content.
    pub fn viewport(&self) -> Rect {
        let bounds = self.layout.bounds();
        Rect::new(0.0, self.scroll as f64, bounds.width, bounds.height)
    }

    /// Elements intersecting the viewport, in layout order.
    pub fn visible_elements(&self) -> Vec<&LayoutAttributes> {
        self.layout.query(self.viewport())
    }

    // === Feed ===

    /// Go back to the first page of the current feed.
    pub fn refresh(&mut self) {
        self.pager.refresh();
        self.reset_view();
        self.status = Some("Refreshed".to_string());
    }

    /// Swap in a reloaded feed and show its first page.
    pub fn replace_cards(&mut self, cards: Vec<FeedCard>) {
        self.pager.replace(cards);
        self.heights.clear();
        self.reset_view();
        self.status = Some(format!("Reloaded {} cards", self.pager.total()));
    }

    fn reset_view(&mut self) {
        self.scroll = 0;
        self.selected = None;
        self.layout.invalidate();
        self.relayout();
    }

    /// Reveal the next page. Returns `false` at the end of the feed.
    pub fn load_more(&mut self) -> bool {
        if !self.pager.load_more() {
            self.status = Some("End of feed".to_string());
            return false;
        }
        self.layout.invalidate();
        self.relayout();
        self.status = Some(format!(
            "Showing {} of {} cards",
            self.pager.shown().len(),
            self.pager.total()
        ));
        true
    }

    /// Cards currently shown.
    pub fn shown_cards(&self) -> &[FeedCard] {
        self.pager.shown()
    }

    /// True while more cards can be revealed.
    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    /// Text of the feed header row.
    pub fn header_text(&self) -> String {
        format!(
            "Feed · {} of {} cards · {} columns",
            self.pager.shown().len(),
            self.pager.total(),
            self.layout.column_count().get()
        )
    }

    /// Text of the feed footer row.
    pub fn footer_text(&self) -> &'static str {
        if self.pager.has_more() {
            "more below: scroll down or press L"
        } else {
            "end of feed"
        }
    }

    // === Selection ===

    /// Handle a click at viewport cell (`column`, `row`).
    ///
    /// Clicking a card selects it, clicking the footer loads more. Returns
    /// the selected card index.
    pub fn select_at(&mut self, column: u16, row: u16) -> Option<usize> {
        let point = Point::new(
            f64::from(column) + 0.5,
            f64::from(row) + 0.5 + self.scroll as f64,
        );

        let hit = self.layout.hit_test(point).map(|a| (a.kind, a.item));
        match hit {
            Some((ElementKind::Item, Some(item))) => {
                self.selected = Some(item);
                debug!(item, "Card selected");
            }
            Some((ElementKind::Footer, _)) => {
                self.load_more();
            }
            _ => {}
        }
        self.selected
    }

    /// Select the next card and scroll it into view.
    pub fn select_next(&mut self) {
        let count = self.pager.shown().len();
        if count == 0 {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1).min(count - 1));
        self.select(next);
    }

    /// Select the previous card and scroll it into view.
    pub fn select_prev(&mut self) {
        if self.pager.shown().is_empty() {
            return;
        }
        let prev = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(prev);
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.scroll_into_view(index);
    }

    fn scroll_into_view(&mut self, index: usize) {
        let Some(frame) = self
            .layout
            .attributes_for_item(IndexPath::new(0, index))
            .map(|a| a.frame)
        else {
            return;
        };

        let viewport = self.viewport();
        if frame.min_y() < viewport.min_y() {
            self.scroll = frame.min_y().floor().max(0.0) as usize;
        } else if frame.max_y() > viewport.max_y() {
            self.scroll = (frame.max_y() - viewport.height).ceil().max(0.0) as usize;
        }
        self.clamp_scroll();
    }

    /// Index of the selected card.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected card.
    pub fn selected_card(&self) -> Option<&FeedCard> {
        self.pager.shown().get(self.selected?)
    }

    /// Detail page URL of the selected card.
    pub fn selected_url(&self) -> Option<String> {
        self.selected_card()
            .map(|card| card.detail_url(&self.settings.detail_base_url))
    }

    // === Status ===

    /// Last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replace the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// The layout engine.
    pub fn layout(&self) -> &WaterfallLayout {
        &self.layout
    }

    /// Validated settings.
    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
