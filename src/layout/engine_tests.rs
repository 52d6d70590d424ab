//! Tests for the masonry layout engine.

use super::*;
use crate::layout::attributes::ElementKind;
use crate::layout::metrics::{SectionMetrics, StaticMetrics};

fn engine(width: f64, columns: usize) -> WaterfallLayout {
    WaterfallLayout::new(Size::new(width, 600.0))
        .with_column_count(ColumnCount::new(columns).unwrap())
}

fn tight(heights: &[f64]) -> SectionMetrics {
    SectionMetrics::with_heights(heights.to_vec()).spacing(0.0, 0.0)
}

fn item_frame(layout: &WaterfallLayout, section: usize, item: usize) -> Rect {
    layout
        .attributes_for_item(IndexPath::new(section, item))
        .map(|a| a.frame)
        .unwrap_or_else(|| panic!("item {section}/{item} should be laid out"))
}

mod placement {
    use super::*;

    #[test]
    fn shortest_column_gets_next_item_with_low_index_tie_break() {
        let mut layout = engine(200.0, 2);
        let provider = StaticMetrics::single(tight(&[50.0, 80.0, 30.0, 60.0]));
        layout.prepare(&provider).unwrap();

        assert_eq!(item_frame(&layout, 0, 0), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(item_frame(&layout, 0, 1), Rect::new(100.0, 0.0, 100.0, 80.0));
        assert_eq!(item_frame(&layout, 0, 2), Rect::new(0.0, 50.0, 100.0, 30.0));
        // Both columns at 80: column 0 wins the tie.
        assert_eq!(item_frame(&layout, 0, 3), Rect::new(0.0, 80.0, 100.0, 60.0));
        assert_eq!(layout.content_extent(), Size::new(200.0, 140.0));
    }

    #[test]
    fn header_item_footer_stack_in_single_column() {
        let mut layout = engine(320.0, 1);
        let provider = StaticMetrics::single(tight(&[100.0]).header(40.0).footer(30.0));
        layout.prepare(&provider).unwrap();

        let header = layout.attributes_for_supplementary(SupplementaryKind::Header, 0);
        let footer = layout.attributes_for_supplementary(SupplementaryKind::Footer, 0);
        assert_eq!(header.frame, Rect::new(0.0, 0.0, 320.0, 40.0));
        assert_eq!(item_frame(&layout, 0, 0).y, 40.0);
        assert_eq!(footer.frame, Rect::new(0.0, 140.0, 320.0, 30.0));
        assert_eq!(layout.content_extent().height, 170.0);
    }

    #[test]
    fn insets_and_spacing_shape_frames() {
        let mut layout = engine(100.0, 2);
        let provider = StaticMetrics::single(
            SectionMetrics::with_heights([20.0, 10.0, 10.0])
                .spacing(4.0, 3.0)
                .inset(EdgeInsets::new(5.0, 10.0, 7.0, 10.0)),
        );
        layout.prepare(&provider).unwrap();

        // (100 - 20 - 4) / 2
        assert_eq!(item_frame(&layout, 0, 0), Rect::new(10.0, 5.0, 38.0, 20.0));
        assert_eq!(item_frame(&layout, 0, 1), Rect::new(52.0, 5.0, 38.0, 10.0));
        assert_eq!(item_frame(&layout, 0, 2), Rect::new(52.0, 18.0, 38.0, 10.0));
        // tallest 31, minus trailing gap 3, plus bottom inset 7
        assert_eq!(layout.content_extent().height, 35.0);
    }

    #[test]
    fn next_section_starts_below_tallest_column() {
        let mut layout = engine(200.0, 2);
        let provider = StaticMetrics::new(vec![tight(&[10.0, 30.0]), tight(&[5.0, 5.0])]);
        layout.prepare(&provider).unwrap();

        assert_eq!(item_frame(&layout, 1, 0), Rect::new(0.0, 30.0, 100.0, 5.0));
        assert_eq!(item_frame(&layout, 1, 1), Rect::new(100.0, 30.0, 100.0, 5.0));
        assert_eq!(layout.snapshot().column_heights(0), Some(&[30.0, 30.0][..]));
        assert_eq!(layout.content_extent().height, 35.0);
    }

    #[test]
    fn empty_section_footer_sits_below_header() {
        let mut layout = engine(200.0, 2);
        let provider = StaticMetrics::single(
            SectionMetrics::with_heights(Vec::new())
                .spacing(8.0, 8.0)
                .header(10.0)
                .footer(6.0),
        );
        layout.prepare(&provider).unwrap();

        let footer = layout.attributes_for_supplementary(SupplementaryKind::Footer, 0);
        assert_eq!(footer.frame.y, 10.0);
        assert_eq!(layout.content_extent().height, 16.0);
    }

    #[test]
    fn content_inset_narrows_content() {
        let mut layout = WaterfallLayout::new(Size::new(220.0, 400.0))
            .with_column_count(ColumnCount::new(2).unwrap())
            .with_content_inset(EdgeInsets::new(0.0, 10.0, 0.0, 10.0));
        layout.prepare(&StaticMetrics::single(tight(&[10.0]))).unwrap();

        assert_eq!(item_frame(&layout, 0, 0).width, 100.0);
        assert_eq!(layout.content_extent().width, 200.0);
    }

    #[test]
    fn flat_list_is_in_layout_order() {
        let mut layout = engine(200.0, 2);
        let provider = StaticMetrics::new(vec![
            tight(&[10.0, 20.0]).header(5.0).footer(5.0),
            tight(&[10.0]).header(5.0),
        ]);
        layout.prepare(&provider).unwrap();

        let order: Vec<(ElementKind, usize, Option<usize>)> = layout
            .attributes()
            .iter()
            .map(|a| (a.kind, a.section, a.item))
            .collect();
        assert_eq!(
            order,
            vec![
                (ElementKind::Header, 0, None),
                (ElementKind::Item, 0, Some(0)),
                (ElementKind::Item, 0, Some(1)),
                (ElementKind::Footer, 0, None),
                (ElementKind::Header, 1, None),
                (ElementKind::Item, 1, Some(0)),
            ]
        );
    }

    #[test]
    fn provider_without_metrics_uses_defaults() {
        struct CountsOnly;
        impl MetricsProvider for CountsOnly {
            fn section_count(&self) -> usize {
                1
            }
            fn item_count(&self, _section: usize) -> usize {
                2
            }
        }

        let mut layout = engine(110.0, 2);
        layout.prepare(&CountsOnly).unwrap();

        // default spacing 10, default item height 50
        assert_eq!(item_frame(&layout, 0, 0), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(item_frame(&layout, 0, 1), Rect::new(60.0, 0.0, 50.0, 50.0));
        assert_eq!(layout.content_extent().height, 50.0);
    }
}

mod queries {
    use super::*;

    #[test]
    fn empty_dataset_has_zero_extent_and_no_hits() {
        let mut layout = engine(200.0, 2);
        layout.prepare(&StaticMetrics::default()).unwrap();

        assert_eq!(layout.content_extent(), Size::ZERO);
        assert!(layout
            .query(Rect::new(-1000.0, -1000.0, 5000.0, 5000.0))
            .is_empty());
        assert!(layout.attributes().is_empty());
    }

    #[test]
    fn out_of_range_item_is_absent() {
        let mut layout = engine(200.0, 2);
        layout.prepare(&StaticMetrics::single(tight(&[10.0]))).unwrap();

        assert!(layout.attributes_for_item(IndexPath::new(0, 1)).is_none());
        assert!(layout.attributes_for_item(IndexPath::new(3, 0)).is_none());
    }

    #[test]
    fn missing_supplementary_is_degenerate() {
        let mut layout = engine(200.0, 2);
        layout.prepare(&StaticMetrics::single(tight(&[10.0]))).unwrap();

        let header = layout.attributes_for_supplementary(SupplementaryKind::Header, 0);
        assert_eq!(header.frame, Rect::ZERO);
        assert_eq!(header.kind, ElementKind::Header);
        let far = layout.attributes_for_supplementary(SupplementaryKind::Footer, 9);
        assert_eq!(far.section, 9);
        assert_eq!(far.frame, Rect::ZERO);
    }

    #[test]
    fn query_returns_visible_elements_across_sections() {
        let mut layout = engine(200.0, 1);
        let heights = vec![10.0; 50];
        let provider = StaticMetrics::new(vec![
            SectionMetrics::with_heights(heights.clone()).spacing(0.0, 0.0).footer(10.0),
            SectionMetrics::with_heights(heights).spacing(0.0, 0.0),
        ]);
        layout.prepare(&provider).unwrap();

        // Section 0 spans 0..500, footer 500..510, section 1 starts at 510.
        let hits = layout.query(Rect::new(0.0, 495.0, 200.0, 20.0));
        let found: Vec<(ElementKind, usize, Option<usize>)> =
            hits.iter().map(|a| (a.kind, a.section, a.item)).collect();
        assert_eq!(
            found,
            vec![
                (ElementKind::Item, 0, Some(49)),
                (ElementKind::Footer, 0, None),
                (ElementKind::Item, 1, Some(0)),
            ]
        );
    }

    #[test]
    fn hit_test_finds_item_under_point() {
        let mut layout = engine(200.0, 2);
        layout
            .prepare(&StaticMetrics::single(tight(&[50.0, 80.0, 30.0, 60.0])))
            .unwrap();

        let hit = layout.hit_test(Point::new(150.0, 70.0));
        assert_eq!(hit.and_then(|a| a.index_path()), Some(IndexPath::new(0, 1)));
        assert!(layout.hit_test(Point::new(150.0, 100.0)).is_none());
    }
}

mod invalidation {
    use super::*;

    #[test]
    fn should_relayout_only_on_width_change() {
        let layout = engine(200.0, 2);
        assert!(!layout.should_relayout(200.0));
        assert!(layout.should_relayout(201.0));
    }

    #[test]
    fn height_only_bounds_change_keeps_layout_valid() {
        let mut layout = engine(200.0, 2);
        layout.prepare(&StaticMetrics::single(tight(&[10.0]))).unwrap();
        assert!(!layout.needs_prepare());

        layout.set_bounds(Size::new(200.0, 900.0));
        assert!(!layout.needs_prepare());

        layout.set_bounds(Size::new(300.0, 900.0));
        assert!(layout.needs_prepare());
    }

    #[test]
    fn column_count_change_invalidates() {
        let mut layout = engine(200.0, 2);
        layout.prepare(&StaticMetrics::single(tight(&[10.0]))).unwrap();

        layout.set_column_count(ColumnCount::new(2).unwrap());
        assert!(!layout.needs_prepare());
        layout.set_column_count(ColumnCount::new(3).unwrap());
        assert!(layout.needs_prepare());
    }

    #[test]
    fn new_pass_discards_previous_attributes() {
        let mut layout = engine(200.0, 2);
        layout
            .prepare(&StaticMetrics::single(
                tight(&[10.0, 10.0, 10.0, 10.0, 10.0]).header(5.0),
            ))
            .unwrap();
        layout.prepare(&StaticMetrics::single(tight(&[10.0, 10.0]))).unwrap();

        assert!(layout.attributes_for_item(IndexPath::new(0, 4)).is_none());
        assert_eq!(layout.attributes().len(), 2);
        assert_eq!(
            layout
                .attributes_for_supplementary(SupplementaryKind::Header, 0)
                .frame,
            Rect::ZERO
        );
    }

    #[test]
    fn repeated_pass_is_identical() {
        let mut layout = engine(333.0, 3);
        let provider = StaticMetrics::single(
            SectionMetrics::with_heights([17.5, 3.25, 99.0, 1.0, 42.0, 8.0, 13.0])
                .spacing(7.0, 2.5)
                .header(11.0),
        );
        layout.prepare(&provider).unwrap();
        let first = layout.attributes().to_vec();
        layout.prepare(&provider).unwrap();
        assert_eq!(layout.attributes(), first.as_slice());
    }
}

mod errors {
    use super::*;

    #[test]
    fn spacing_wider_than_content_is_rejected() {
        let mut layout = engine(10.0, 3);
        let provider = StaticMetrics::single(SectionMetrics::with_heights([5.0]).spacing(10.0, 0.0));

        let err = layout.prepare(&provider).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::NegativeItemWidth {
                section: 0,
                columns: 3,
                ..
            }
        ));
    }

    #[test]
    fn failed_pass_keeps_previous_layout() {
        let mut layout = engine(100.0, 2);
        layout.prepare(&StaticMetrics::single(tight(&[10.0, 20.0]))).unwrap();
        let before = layout.attributes().to_vec();

        layout.set_bounds(Size::new(5.0, 600.0));
        let bad = StaticMetrics::single(SectionMetrics::with_heights([10.0]).spacing(10.0, 0.0));
        assert!(layout.prepare(&bad).is_err());

        assert_eq!(layout.attributes(), before.as_slice());
        assert!(layout.needs_prepare());
    }

    #[test]
    fn negative_height_is_rejected() {
        let mut layout = engine(100.0, 1);
        let err = layout
            .prepare(&StaticMetrics::single(tight(&[10.0, -1.0])))
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidItemHeight {
                section: 0,
                item: 1,
                height: -1.0
            }
        );
    }

    #[test]
    fn infinite_header_is_rejected() {
        let mut layout = engine(200.0, 1);
        let provider = StaticMetrics::new(vec![
            tight(&[10.0]).header(f64::INFINITY),
            tight(&[10.0]),
        ]);
        assert_eq!(
            layout.prepare(&provider),
            Err(LayoutError::InvalidSupplementaryHeight {
                section: 0,
                kind: SupplementaryKind::Header,
                height: f64::INFINITY,
            })
        );
        assert!(layout.attributes().is_empty());
        assert_eq!(layout.content_extent(), Size::ZERO);
    }

    #[test]
    fn nan_footer_is_rejected_not_skipped() {
        let mut layout = engine(200.0, 1);
        let provider = StaticMetrics::new(vec![tight(&[10.0]), tight(&[10.0]).footer(f64::NAN)]);
        assert!(matches!(
            layout.prepare(&provider),
            Err(LayoutError::InvalidSupplementaryHeight {
                section: 1,
                kind: SupplementaryKind::Footer,
                ..
            })
        ));
    }

    #[test]
    fn zero_header_still_means_absent() {
        let mut layout = engine(200.0, 1);
        layout
            .prepare(&StaticMetrics::single(tight(&[10.0]).header(0.0)))
            .unwrap();
        assert_eq!(layout.attributes().len(), 1);
    }

    #[test]
    fn nan_spacing_is_rejected() {
        let mut layout = engine(100.0, 1);
        let provider = StaticMetrics::single(SectionMetrics::with_heights([1.0]).spacing(0.0, f64::NAN));
        assert!(matches!(
            layout.prepare(&provider),
            Err(LayoutError::InvalidSpacing { section: 0, .. })
        ));
    }

    #[test]
    fn negative_inset_is_rejected() {
        let mut layout = engine(100.0, 1);
        let provider =
            StaticMetrics::single(tight(&[1.0]).inset(EdgeInsets::new(-1.0, 0.0, 0.0, 0.0)));
        assert_eq!(
            layout.prepare(&provider),
            Err(LayoutError::InvalidInset { section: 0 })
        );
    }

    #[test]
    fn item_width_helper_matches_engine() {
        let layout = engine(100.0, 2);
        assert_eq!(
            layout.column_width(EdgeInsets::new(0.0, 10.0, 0.0, 10.0), 4.0),
            Some(38.0)
        );
        assert_eq!(layout.column_width(EdgeInsets::ZERO, 200.0), None);
    }
}
