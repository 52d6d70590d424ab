//! Layout configuration errors.
//!
//! These are caller misconfigurations, never transient failures: a pass that
//! returns one of them leaves the previously published layout untouched, and
//! retrying with the same inputs fails the same way.

use super::attributes::SupplementaryKind;
use thiserror::Error;

/// A layout pass rejected its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Column spacing leaves no room for the columns.
    #[error(
        "negative item width {width} in section {section}: content width {content_width}, \
         spacing {spacing}, {columns} columns"
    )]
    NegativeItemWidth {
        /// Section being laid out.
        section: usize,
        /// Computed (negative) item width.
        width: f64,
        /// Section content width after insets.
        content_width: f64,
        /// Gap between columns.
        spacing: f64,
        /// Configured column count.
        columns: usize,
    },

    /// The provider returned a negative or non-finite item height.
    #[error("invalid height {height} for item {item} in section {section}")]
    InvalidItemHeight {
        /// Section of the item.
        section: usize,
        /// Item index.
        item: usize,
        /// Offending height.
        height: f64,
    },

    /// The provider returned a negative or non-finite header or footer height.
    #[error("invalid {kind:?} height {height} in section {section}")]
    InvalidSupplementaryHeight {
        /// Section of the header or footer.
        section: usize,
        /// Header or footer.
        kind: SupplementaryKind,
        /// Offending height.
        height: f64,
    },

    /// A spacing value was negative or non-finite.
    #[error("invalid spacing {value} in section {section}")]
    InvalidSpacing {
        /// Section whose spacing was rejected.
        section: usize,
        /// Offending value.
        value: f64,
    },

    /// A section inset had a negative or non-finite edge.
    #[error("invalid inset in section {section}")]
    InvalidInset {
        /// Section whose inset was rejected.
        section: usize,
    },
}
