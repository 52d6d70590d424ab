//! Metrics provider interface and the defaults adapter.
//!
//! The host answers sizing questions through [`MetricsProvider`]. Every
//! optional answer returns `None` when the host has nothing to say, and
//! [`ResolvedMetrics`] substitutes the configured [`LayoutDefaults`], so the
//! engine always works with concrete values.

use super::geometry::{EdgeInsets, Size};

/// Sizing callbacks implemented by the host.
///
/// Only the counts are required. Everything else falls back to
/// [`LayoutDefaults`] when the method returns `None`.
pub trait MetricsProvider {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Size of one item. The width is ignored: items take the column width.
    fn item_size(&self, _section: usize, _item: usize) -> Option<Size> {
        None
    }

    /// Insets around the section's items.
    fn section_inset(&self, _section: usize) -> Option<EdgeInsets> {
        None
    }

    /// Horizontal gap between adjacent columns.
    fn line_spacing(&self, _section: usize) -> Option<f64> {
        None
    }

    /// Vertical gap between consecutive items in one column.
    fn interitem_spacing(&self, _section: usize) -> Option<f64> {
        None
    }

    /// Header size. A height of 0 means no header.
    fn header_size(&self, _section: usize) -> Option<Size> {
        None
    }

    /// Footer size. A height of 0 means no footer.
    fn footer_size(&self, _section: usize) -> Option<Size> {
        None
    }
}

/// Values used when the provider has no answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDefaults {
    /// Default item size.
    pub item_size: Size,
    /// Default section inset.
    pub section_inset: EdgeInsets,
    /// Default gap between columns.
    pub line_spacing: f64,
    /// Default gap between items in a column.
    pub interitem_spacing: f64,
    /// Default header size (zero height: no header).
    pub header_size: Size,
    /// Default footer size (zero height: no footer).
    pub footer_size: Size,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            item_size: Size::new(50.0, 50.0),
            section_inset: EdgeInsets::ZERO,
            line_spacing: 10.0,
            interitem_spacing: 10.0,
            header_size: Size::ZERO,
            footer_size: Size::ZERO,
        }
    }
}

/// Provider answers with defaults filled in.
pub struct ResolvedMetrics<'a, P: ?Sized> {
    provider: &'a P,
    defaults: &'a LayoutDefaults,
}

impl<'a, P> ResolvedMetrics<'a, P>
where
    P: MetricsProvider + ?Sized,
{
    /// Wrap a provider.
    pub fn new(provider: &'a P, defaults: &'a LayoutDefaults) -> Self {
        Self { provider, defaults }
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.provider.section_count()
    }

    /// Number of items in `section`.
    pub fn item_count(&self, section: usize) -> usize {
        self.provider.item_count(section)
    }

    /// Item size or the default.
    pub fn item_size(&self, section: usize, item: usize) -> Size {
        self.provider
            .item_size(section, item)
            .unwrap_or(self.defaults.item_size)
    }

    /// Section inset or the default.
    pub fn section_inset(&self, section: usize) -> EdgeInsets {
        self.provider
            .section_inset(section)
            .unwrap_or(self.defaults.section_inset)
    }

    /// Column gap or the default.
    pub fn line_spacing(&self, section: usize) -> f64 {
        self.provider
            .line_spacing(section)
            .unwrap_or(self.defaults.line_spacing)
    }

    /// Item gap or the default.
    pub fn interitem_spacing(&self, section: usize) -> f64 {
        self.provider
            .interitem_spacing(section)
            .unwrap_or(self.defaults.interitem_spacing)
    }

    /// Header size or the default.
    pub fn header_size(&self, section: usize) -> Size {
        self.provider
            .header_size(section)
            .unwrap_or(self.defaults.header_size)
    }

    /// Footer size or the default.
    pub fn footer_size(&self, section: usize) -> Size {
        self.provider
            .footer_size(section)
            .unwrap_or(self.defaults.footer_size)
    }
}

/// Metrics for one section of a [`StaticMetrics`] provider.
///
/// `None` fields defer to [`LayoutDefaults`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMetrics {
    /// Height of each item, in item order.
    pub item_heights: Vec<f64>,
    /// Section inset.
    pub inset: Option<EdgeInsets>,
    /// Gap between columns.
    pub line_spacing: Option<f64>,
    /// Gap between items in a column.
    pub interitem_spacing: Option<f64>,
    /// Header height.
    pub header_height: Option<f64>,
    /// Footer height.
    pub footer_height: Option<f64>,
}

impl SectionMetrics {
    /// Section with the given item heights and everything else defaulted.
    pub fn with_heights(item_heights: impl Into<Vec<f64>>) -> Self {
        Self {
            item_heights: item_heights.into(),
            ..Self::default()
        }
    }

    /// Set both spacings.
    pub fn spacing(mut self, line: f64, interitem: f64) -> Self {
        self.line_spacing = Some(line);
        self.interitem_spacing = Some(interitem);
        self
    }

    /// Set the inset.
    pub fn inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = Some(inset);
        self
    }

    /// Set the header height.
    pub fn header(mut self, height: f64) -> Self {
        self.header_height = Some(height);
        self
    }

    /// Set the footer height.
    pub fn footer(mut self, height: f64) -> Self {
        self.footer_height = Some(height);
        self
    }
}

/// In-memory metrics provider with fixed per-section values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticMetrics {
    sections: Vec<SectionMetrics>,
}

impl StaticMetrics {
    /// Provider over the given sections.
    pub fn new(sections: Vec<SectionMetrics>) -> Self {
        Self { sections }
    }

    /// Single-section provider.
    pub fn single(section: SectionMetrics) -> Self {
        Self::new(vec![section])
    }

    /// Sections in order.
    pub fn sections(&self) -> &[SectionMetrics] {
        &self.sections
    }
}

impl MetricsProvider for StaticMetrics {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections
            .get(section)
            .map_or(0, |s| s.item_heights.len())
    }

    fn item_size(&self, section: usize, item: usize) -> Option<Size> {
        let height = *self.sections.get(section)?.item_heights.get(item)?;
        Some(Size::new(0.0, height))
    }

    fn section_inset(&self, section: usize) -> Option<EdgeInsets> {
        self.sections.get(section)?.inset
    }

    fn line_spacing(&self, section: usize) -> Option<f64> {
        self.sections.get(section)?.line_spacing
    }

    fn interitem_spacing(&self, section: usize) -> Option<f64> {
        self.sections.get(section)?.interitem_spacing
    }

    fn header_size(&self, section: usize) -> Option<Size> {
        let height = self.sections.get(section)?.header_height?;
        Some(Size::new(0.0, height))
    }

    fn footer_size(&self, section: usize) -> Option<Size> {
        let height = self.sections.get(section)?.footer_height?;
        Some(Size::new(0.0, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountsOnly;

    impl MetricsProvider for CountsOnly {
        fn section_count(&self) -> usize {
            1
        }

        fn item_count(&self, _section: usize) -> usize {
            3
        }
    }

    #[test]
    fn absent_answers_fall_back_to_defaults() {
        let defaults = LayoutDefaults::default();
        let metrics = ResolvedMetrics::new(&CountsOnly, &defaults);

        assert_eq!(metrics.item_size(0, 0), Size::new(50.0, 50.0));
        assert_eq!(metrics.line_spacing(0), 10.0);
        assert_eq!(metrics.interitem_spacing(0), 10.0);
        assert_eq!(metrics.section_inset(0), EdgeInsets::ZERO);
        assert_eq!(metrics.header_size(0), Size::ZERO);
        assert_eq!(metrics.footer_size(0), Size::ZERO);
    }

    #[test]
    fn custom_defaults_are_used() {
        let defaults = LayoutDefaults {
            line_spacing: 4.0,
            footer_size: Size::new(0.0, 12.0),
            ..LayoutDefaults::default()
        };
        let metrics = ResolvedMetrics::new(&CountsOnly, &defaults);
        assert_eq!(metrics.line_spacing(0), 4.0);
        assert_eq!(metrics.footer_size(0).height, 12.0);
    }

    #[test]
    fn provider_answers_override_defaults() {
        let provider = StaticMetrics::single(
            SectionMetrics::with_heights([30.0, 40.0])
                .spacing(2.0, 3.0)
                .header(7.0),
        );
        let defaults = LayoutDefaults::default();
        let metrics = ResolvedMetrics::new(&provider, &defaults);

        assert_eq!(metrics.item_count(0), 2);
        assert_eq!(metrics.item_size(0, 1).height, 40.0);
        assert_eq!(metrics.line_spacing(0), 2.0);
        assert_eq!(metrics.interitem_spacing(0), 3.0);
        assert_eq!(metrics.header_size(0).height, 7.0);
        // footer not set on the section
        assert_eq!(metrics.footer_size(0), Size::ZERO);
    }

    #[test]
    fn static_metrics_out_of_range_section_has_no_items() {
        let provider = StaticMetrics::single(SectionMetrics::with_heights([1.0]));
        assert_eq!(provider.item_count(5), 0);
        assert!(provider.item_size(5, 0).is_none());
    }
}
