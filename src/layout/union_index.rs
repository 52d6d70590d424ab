//! UnionRectIndex - coarse spatial index over the flat attribute list
//!
//! The flat list is cut into consecutive runs of `run_size` elements and the
//! bounding rectangle of each run is stored. A rectangle query finds the first
//! and last run whose union intersects the target, then scans only the
//! elements between them with an exact per-frame test.
//!
//! # Complexity
//!
//! - `build`: O(n)
//! - `query`: O(n / run_size + k) where k is the size of the narrowed span
//!
//! Correctness relies on the runs being built from the same ordered list that
//! is later scanned: every frame is inside its run's union, so any run holding
//! a hit lies between the first and last intersecting runs.

use super::attributes::LayoutAttributes;
use super::geometry::{Point, Rect};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Bounding rectangles of fixed-size consecutive runs of attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionRectIndex {
    run_size: NonZeroUsize,
    unions: Vec<Rect>,
    total: usize,
}

impl UnionRectIndex {
    /// Default number of elements per run.
    pub const DEFAULT_RUN_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// An index over nothing.
    pub fn empty(run_size: NonZeroUsize) -> Self {
        Self {
            run_size,
            unions: Vec::new(),
            total: 0,
        }
    }

    /// Build the index from attributes already in layout order.
    pub fn build(elements: &[LayoutAttributes], run_size: NonZeroUsize) -> Self {
        let unions = elements
            .chunks(run_size.get())
            .filter_map(|run| {
                let mut frames = run.iter().map(|a| a.frame);
                let first = frames.next()?;
                Some(frames.fold(first, |acc, frame| acc.union(&frame)))
            })
            .collect();

        Self {
            run_size,
            unions,
            total: elements.len(),
        }
    }

    /// Elements per run.
    pub fn run_size(&self) -> usize {
        self.run_size.get()
    }

    /// Union rectangle of every run, in order.
    pub fn unions(&self) -> &[Rect] {
        &self.unions
    }

    /// Number of elements the index was built over.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Check if the index covers no elements.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Span of element indices that can hold an element intersecting `rect`.
    ///
    /// Returns an empty range when no run intersects.
    pub fn candidate_span(&self, rect: &Rect) -> Range<usize> {
        self.span_where(|bounds| bounds.intersects(rect))
    }

    /// All elements whose frame intersects `rect`, in layout order.
    ///
    /// `elements` must be the same slice the index was built from.
    pub fn query<'a>(&self, elements: &'a [LayoutAttributes], rect: &Rect) -> Vec<&'a LayoutAttributes> {
        debug_assert_eq!(elements.len(), self.total, "index built from a different list");

        let span = self.candidate_span(rect);
        elements
            .get(span)
            .unwrap_or_default()
            .iter()
            .filter(|a| a.frame.intersects(rect))
            .collect()
    }

    /// First element, in layout order, whose frame contains `point`.
    pub fn hit_test<'a>(&self, elements: &'a [LayoutAttributes], point: Point) -> Option<&'a LayoutAttributes> {
        let span = self.span_where(|bounds| bounds.contains(point));
        elements
            .get(span)
            .unwrap_or_default()
            .iter()
            .find(|a| a.frame.contains(point))
    }

    fn span_where<F>(&self, matches: F) -> Range<usize>
    where
        F: Fn(&Rect) -> bool,
    {
        let Some(first) = self.unions.iter().position(&matches) else {
            return 0..0;
        };
        // `first` matched, so a last match exists.
        let last = self.unions.iter().rposition(&matches).unwrap_or(first);

        let run = self.run_size.get();
        let start = first * run;
        let end = (last * run + run).min(self.total);
        start..end
    }
}
