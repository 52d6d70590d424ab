//! WaterfallLayout - masonry layout engine
//!
//! Places every section's items into a fixed number of columns, each item
//! going to the currently shortest column, with optional full-width headers
//! and footers between sections.
//!
//! # Layout Pass
//! `prepare()` recomputes everything from the metrics provider into a fresh
//! [`LayoutSnapshot`] and publishes it in one assignment. A pass that fails
//! validation returns before publishing, so queries only ever see a complete
//! pass.
//!
//! # Invalidation
//! Width changes, column count changes and explicit `invalidate()` calls mark
//! the layout as needing a pass. Height-only bounds changes (scrolling, a
//! taller viewport) do not.

use super::attributes::{AttributesStore, IndexPath, LayoutAttributes, SupplementaryKind};
use super::columns::{ColumnCount, ColumnTracker};
use super::error::LayoutError;
use super::geometry::{EdgeInsets, Point, Rect, Size};
use super::metrics::{LayoutDefaults, MetricsProvider, ResolvedMetrics};
use super::union_index::UnionRectIndex;
use std::num::NonZeroUsize;
use tracing::{debug, error, trace};

/// Result of one complete layout pass.
///
/// Never mutated after it is published; the next pass replaces it whole.
#[derive(Debug, Clone)]
pub struct LayoutSnapshot {
    store: AttributesStore,
    index: UnionRectIndex,
    columns: Vec<ColumnTracker>,
    content_size: Size,
}

impl LayoutSnapshot {
    fn empty(run_size: NonZeroUsize) -> Self {
        Self {
            store: AttributesStore::new(),
            index: UnionRectIndex::empty(run_size),
            columns: Vec::new(),
            content_size: Size::ZERO,
        }
    }

    /// Attributes store of this pass.
    pub fn store(&self) -> &AttributesStore {
        &self.store
    }

    /// Spatial index of this pass.
    pub fn index(&self) -> &UnionRectIndex {
        &self.index
    }

    /// Number of sections laid out.
    pub fn section_count(&self) -> usize {
        self.columns.len()
    }

    /// Column heights left after `section` (all equal to the section's bottom).
    pub fn column_heights(&self, section: usize) -> Option<&[f64]> {
        self.columns.get(section).map(ColumnTracker::heights)
    }

    /// Total scrollable size.
    pub fn content_size(&self) -> Size {
        self.content_size
    }
}

/// Width of one column, or `None` if the spacing does not leave room.
pub fn item_width(content_width: f64, inset: EdgeInsets, spacing: f64, columns: ColumnCount) -> Option<f64> {
    let section_width = content_width - inset.horizontal();
    let count = columns.get() as f64;
    let width = (section_width - spacing * (count - 1.0)) / count;
    // NaN fails this comparison too
    if width >= 0.0 {
        Some(width)
    } else {
        None
    }
}

/// Masonry layout engine.
///
/// Single-threaded: `prepare` takes `&mut self` and every query takes `&self`,
/// so a query always reads the last published pass.
#[derive(Debug, Clone)]
pub struct WaterfallLayout {
    column_count: ColumnCount,
    defaults: LayoutDefaults,
    bounds: Size,
    content_inset: EdgeInsets,
    run_size: NonZeroUsize,
    current: LayoutSnapshot,
    needs_prepare: bool,
}

impl WaterfallLayout {
    /// Create an engine for a viewport of `bounds`, with one column.
    pub fn new(bounds: Size) -> Self {
        let run_size = UnionRectIndex::DEFAULT_RUN_SIZE;
        Self {
            column_count: ColumnCount::default(),
            defaults: LayoutDefaults::default(),
            bounds,
            content_inset: EdgeInsets::ZERO,
            run_size,
            current: LayoutSnapshot::empty(run_size),
            needs_prepare: true,
        }
    }

    /// Set the column count.
    pub fn with_column_count(mut self, count: ColumnCount) -> Self {
        self.column_count = count;
        self
    }

    /// Set the values used when the provider has no answer.
    pub fn with_defaults(mut self, defaults: LayoutDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the inset between the viewport and the content.
    pub fn with_content_inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self
    }

    /// Set the number of elements per union rect.
    pub fn with_run_size(mut self, run_size: NonZeroUsize) -> Self {
        self.run_size = run_size;
        self
    }

    // === Configuration ===

    /// Current column count.
    pub fn column_count(&self) -> ColumnCount {
        self.column_count
    }

    /// Change the column count. Invalidates the layout if it differs.
    pub fn set_column_count(&mut self, count: ColumnCount) {
        if count != self.column_count {
            self.column_count = count;
            self.needs_prepare = true;
        }
    }

    /// Current viewport bounds.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Record new viewport bounds. Only a width change invalidates the layout.
    pub fn set_bounds(&mut self, bounds: Size) {
        if self.should_relayout(bounds.width) {
            self.needs_prepare = true;
        }
        self.bounds = bounds;
    }

    /// Inset between viewport and content.
    pub fn content_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    /// Defaults used for absent provider answers.
    pub fn defaults(&self) -> &LayoutDefaults {
        &self.defaults
    }

    /// True when a viewport of `new_width` needs a new pass.
    pub fn should_relayout(&self, new_width: f64) -> bool {
        new_width != self.bounds.width
    }

    /// Mark the layout stale, e.g. after the dataset changed.
    pub fn invalidate(&mut self) {
        self.needs_prepare = true;
    }

    /// True when the published layout no longer matches the configuration.
    pub fn needs_prepare(&self) -> bool {
        self.needs_prepare
    }

    /// Viewport size minus the content inset.
    pub fn effective_content_size(&self) -> Size {
        self.bounds.inset_by(self.content_inset)
    }

    /// Item width the next pass would use for a section with `inset` and
    /// column `spacing`, or `None` if that configuration is invalid.
    pub fn column_width(&self, inset: EdgeInsets, spacing: f64) -> Option<f64> {
        item_width(
            self.effective_content_size().width,
            inset,
            spacing,
            self.column_count,
        )
    }

    // === Layout Pass ===

    /// Run a full layout pass against `provider`.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] for configuration errors (negative item
    /// width, negative or non-finite item/header/footer heights, spacing or
    /// insets). The previously published layout is kept in that case.
    pub fn prepare<P>(&mut self, provider: &P) -> Result<(), LayoutError>
    where
        P: MetricsProvider + ?Sized,
    {
        let metrics = ResolvedMetrics::new(provider, &self.defaults);
        let snapshot = self.compute(&metrics).inspect_err(|err| {
            error!(error = %err, "Layout pass rejected its configuration");
        })?;

        debug!(
            sections = snapshot.section_count(),
            elements = snapshot.store.len(),
            runs = snapshot.index.unions().len(),
            height = snapshot.content_size.height,
            "Layout pass complete"
        );

        self.current = snapshot;
        self.needs_prepare = false;
        Ok(())
    }

    fn compute<P>(&self, metrics: &ResolvedMetrics<'_, P>) -> Result<LayoutSnapshot, LayoutError>
    where
        P: MetricsProvider + ?Sized,
    {
        let section_count = metrics.section_count();
        let content_width = self.effective_content_size().width;

        let mut store = AttributesStore::new();
        let mut trackers = Vec::with_capacity(section_count);
        let mut top = 0.0;

        for section in 0..section_count {
            let inset = metrics.section_inset(section);
            if !inset.is_finite()
                || inset.top < 0.0
                || inset.left < 0.0
                || inset.bottom < 0.0
                || inset.right < 0.0
            {
                return Err(LayoutError::InvalidInset { section });
            }
            let line_spacing = checked_spacing(section, metrics.line_spacing(section))?;
            let interitem_spacing = checked_spacing(section, metrics.interitem_spacing(section))?;
            let width = item_width(content_width, inset, line_spacing, self.column_count).ok_or_else(|| {
                let columns = self.column_count.get();
                LayoutError::NegativeItemWidth {
                    section,
                    width: (content_width - inset.horizontal() - line_spacing * (columns - 1) as f64)
                        / columns as f64,
                    content_width: content_width - inset.horizontal(),
                    spacing: line_spacing,
                    columns,
                }
            })?;

            let header = checked_supplementary(section, SupplementaryKind::Header, metrics.header_size(section))?;
            if header.height > 0.0 {
                let frame = Rect::new(0.0, top, content_width, header.height);
                store.push(LayoutAttributes::for_supplementary(
                    SupplementaryKind::Header,
                    section,
                    frame,
                ));
                top = frame.max_y();
            }

            top += inset.top;
            let mut columns = ColumnTracker::new(self.column_count, top);

            let item_count = metrics.item_count(section);
            for item in 0..item_count {
                let height = metrics.item_size(section, item).height;
                if !height.is_finite() || height < 0.0 {
                    return Err(LayoutError::InvalidItemHeight {
                        section,
                        item,
                        height,
                    });
                }

                let column = columns.shortest();
                let x = inset.left + (width + line_spacing) * column as f64;
                let y = columns.height(column);
                store.push(LayoutAttributes::for_item(
                    IndexPath::new(section, item),
                    Rect::new(x, y, width, height),
                ));
                columns.advance(column, height + interitem_spacing);
            }

            // The last item in the tallest column added a trailing gap.
            let trailing_gap = if item_count > 0 { interitem_spacing } else { 0.0 };
            top = columns.max_height() - trailing_gap + inset.bottom;

            let footer = checked_supplementary(section, SupplementaryKind::Footer, metrics.footer_size(section))?;
            if footer.height > 0.0 {
                let frame = Rect::new(0.0, top, content_width, footer.height);
                store.push(LayoutAttributes::for_supplementary(
                    SupplementaryKind::Footer,
                    section,
                    frame,
                ));
                top = frame.max_y();
            }

            columns.reset(top);
            trace!(section, items = item_count, item_width = width, bottom = top, "Section laid out");
            trackers.push(columns);
        }

        let content_size = match trackers.last() {
            Some(last) => Size::new(content_width, last.height(0)),
            None => Size::ZERO,
        };
        let index = UnionRectIndex::build(store.as_slice(), self.run_size);

        Ok(LayoutSnapshot {
            store,
            index,
            columns: trackers,
            content_size,
        })
    }

    // === Queries ===

    /// The last published pass.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.current
    }

    /// Attributes of an item, or `None` if it was not part of the last pass.
    pub fn attributes_for_item(&self, path: IndexPath) -> Option<&LayoutAttributes> {
        self.current.store.item(path)
    }

    /// Attributes of a header or footer.
    ///
    /// Returns zero-area attributes if the section had none.
    pub fn attributes_for_supplementary(&self, kind: SupplementaryKind, section: usize) -> LayoutAttributes {
        self.current
            .store
            .supplementary(kind, section)
            .copied()
            .unwrap_or_else(|| LayoutAttributes::degenerate(kind, section))
    }

    /// Size of the scrollable content.
    pub fn content_extent(&self) -> Size {
        self.current.content_size
    }

    /// Every element whose frame intersects `rect`, in layout order.
    pub fn query(&self, rect: Rect) -> Vec<&LayoutAttributes> {
        self.current.index.query(self.current.store.as_slice(), &rect)
    }

    /// First element, in layout order, whose frame contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<&LayoutAttributes> {
        self.current
            .index
            .hit_test(self.current.store.as_slice(), point)
    }

    /// All elements of the last pass, in layout order.
    pub fn attributes(&self) -> &[LayoutAttributes] {
        self.current.store.as_slice()
    }
}

fn checked_spacing(section: usize, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidSpacing { section, value })
    }
}

fn checked_supplementary(section: usize, kind: SupplementaryKind, size: Size) -> Result<Size, LayoutError> {
    if size.height.is_finite() && size.height >= 0.0 {
        Ok(size)
    } else {
        Err(LayoutError::InvalidSupplementaryHeight {
            section,
            kind,
            height: size.height,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
