//! Left-to-right flow of tag chips inside one card.

use crate::layout::geometry::{Rect, Size};

/// Chip frames of one flow pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagFlow {
    /// Frame of every chip, in input order.
    pub frames: Vec<Rect>,
    /// Total height: the last chip's bottom, 0 when empty.
    pub height: f64,
}

impl TagFlow {
    /// Number of rows the chips occupy.
    pub fn rows(&self) -> usize {
        let mut rows = 0;
        let mut last_y = None;
        for frame in &self.frames {
            if last_y != Some(frame.y) {
                rows += 1;
                last_y = Some(frame.y);
            }
        }
        rows
    }
}

/// Place chips of the given sizes into rows of `container_width`.
///
/// The first chip goes to the origin. Each next chip goes right of the
/// previous one unless it would cross `container_width`, in which case it
/// starts a new row `line_spacing` below. A chip wider than the container
/// still gets a row of its own.
pub fn flow(sizes: &[Size], container_width: f64, spacing: f64, line_spacing: f64) -> TagFlow {
    let mut frames: Vec<Rect> = Vec::with_capacity(sizes.len());

    for size in sizes {
        let frame = match frames.last() {
            None => Rect::new(0.0, 0.0, size.width, size.height),
            Some(prev) if prev.max_x() + spacing + size.width > container_width => {
                Rect::new(0.0, prev.max_y() + line_spacing, size.width, size.height)
            }
            Some(prev) => Rect::new(prev.max_x() + spacing, prev.y, size.width, size.height),
        };
        frames.push(frame);
    }

    let height = frames.last().map_or(0.0, Rect::max_y);
    TagFlow { frames, height }
}
