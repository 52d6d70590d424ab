//! Layout attributes and the per-pass attributes store.

use super::geometry::Rect;
use std::collections::HashMap;

/// Position of an item: section plus index within the section. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create a new index path.
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// What a layout attribute describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A regular item cell.
    Item,
    /// A section header.
    Header,
    /// A section footer.
    Footer,
}

/// Kinds of supplementary (per-section) elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    /// Section header, placed above the section's items.
    Header,
    /// Section footer, placed below the section's items.
    Footer,
}

impl From<SupplementaryKind> for ElementKind {
    fn from(kind: SupplementaryKind) -> Self {
        match kind {
            SupplementaryKind::Header => ElementKind::Header,
            SupplementaryKind::Footer => ElementKind::Footer,
        }
    }
}

/// Identity of a laid-out element.
///
/// Supplementary elements always carry `item == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey {
    /// Element kind.
    pub kind: ElementKind,
    /// Section index.
    pub section: usize,
    /// Item index (0 for headers and footers).
    pub item: usize,
}

impl ElementKey {
    /// Key for an item cell.
    pub const fn item(path: IndexPath) -> Self {
        Self {
            kind: ElementKind::Item,
            section: path.section,
            item: path.item,
        }
    }

    /// Key for a header or footer.
    pub fn supplementary(kind: SupplementaryKind, section: usize) -> Self {
        Self {
            kind: kind.into(),
            section,
            item: 0,
        }
    }
}

/// Computed placement of one element.
///
/// Produced fresh on every layout pass and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    /// Element kind.
    pub kind: ElementKind,
    /// Section the element belongs to.
    pub section: usize,
    /// Item index for item cells, `None` for headers and footers.
    pub item: Option<usize>,
    /// Frame in content coordinates.
    pub frame: Rect,
}

impl LayoutAttributes {
    /// Attributes for an item cell.
    pub fn for_item(path: IndexPath, frame: Rect) -> Self {
        Self {
            kind: ElementKind::Item,
            section: path.section,
            item: Some(path.item),
            frame,
        }
    }

    /// Attributes for a header or footer.
    pub fn for_supplementary(kind: SupplementaryKind, section: usize, frame: Rect) -> Self {
        Self {
            kind: kind.into(),
            section,
            item: None,
            frame,
        }
    }

    /// Zero-area attributes returned when no header/footer was laid out.
    pub fn degenerate(kind: SupplementaryKind, section: usize) -> Self {
        Self::for_supplementary(kind, section, Rect::ZERO)
    }

    /// Index path for item cells.
    pub fn index_path(&self) -> Option<IndexPath> {
        self.item.map(|item| IndexPath::new(self.section, item))
    }

    /// Identity key of this element.
    pub fn key(&self) -> ElementKey {
        ElementKey {
            kind: self.kind,
            section: self.section,
            item: self.item.unwrap_or(0),
        }
    }
}

/// Flat, layout-ordered list of attributes with keyed lookup.
///
/// # Invariants
/// - `elements` is in layout order: section ascending, then placement order
/// - Every key in `by_key` points at an element with that key
#[derive(Debug, Clone, Default)]
pub struct AttributesStore {
    elements: Vec<LayoutAttributes>,
    by_key: HashMap<ElementKey, usize>,
}

impl AttributesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next element in layout order.
    pub fn push(&mut self, attributes: LayoutAttributes) {
        let index = self.elements.len();
        self.by_key.insert(attributes.key(), index);
        self.elements.push(attributes);
    }

    /// Look up any element by key.
    pub fn get(&self, key: ElementKey) -> Option<&LayoutAttributes> {
        self.by_key.get(&key).and_then(|&i| self.elements.get(i))
    }

    /// Look up an item cell.
    pub fn item(&self, path: IndexPath) -> Option<&LayoutAttributes> {
        self.get(ElementKey::item(path))
    }

    /// Look up a header or footer.
    pub fn supplementary(&self, kind: SupplementaryKind, section: usize) -> Option<&LayoutAttributes> {
        self.get(ElementKey::supplementary(kind, section))
    }

    /// All elements in layout order.
    pub fn as_slice(&self) -> &[LayoutAttributes] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
