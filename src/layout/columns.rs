//! Column count and per-section column height bookkeeping.

/// Number of columns. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnCount(usize);

/// Error returned when attempting to create a ColumnCount of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ColumnCount must be >= 1 (got {0})")]
pub struct InvalidColumnCount(pub usize);

impl ColumnCount {
    /// A single column.
    pub const ONE: Self = Self(1);

    /// Smart constructor that validates count is >= 1.
    pub fn new(count: usize) -> Result<Self, InvalidColumnCount> {
        if count == 0 {
            Err(InvalidColumnCount(count))
        } else {
            Ok(Self(count))
        }
    }

    /// Get the raw count.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ColumnCount {
    fn default() -> Self {
        Self::ONE
    }
}

/// Running filled height of each column in one section.
///
/// # Invariants
/// - `heights.len()` equals the column count it was created with
/// - Heights only grow between resets
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTracker {
    heights: Vec<f64>,
}

impl ColumnTracker {
    /// Create a tracker with every column at `baseline`.
    pub fn new(count: ColumnCount, baseline: f64) -> Self {
        Self {
            heights: vec![baseline; count.get()],
        }
    }

    /// Index of the shortest column. Ties go to the lowest index.
    pub fn shortest(&self) -> usize {
        let mut index = 0;
        for (i, &height) in self.heights.iter().enumerate().skip(1) {
            if height < self.heights[index] {
                index = i;
            }
        }
        index
    }

    /// Index of the tallest column. Ties go to the lowest index.
    pub fn tallest(&self) -> usize {
        let mut index = 0;
        for (i, &height) in self.heights.iter().enumerate().skip(1) {
            if height > self.heights[index] {
                index = i;
            }
        }
        index
    }

    /// Current height of `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column >= len()`.
    pub fn height(&self, column: usize) -> f64 {
        self.heights[column]
    }

    /// Height of the tallest column.
    pub fn max_height(&self) -> f64 {
        self.heights[self.tallest()]
    }

    /// Height of the shortest column.
    pub fn min_height(&self) -> f64 {
        self.heights[self.shortest()]
    }

    /// Grow `column` by `amount`.
    ///
    /// # Panics
    ///
    /// Panics if `column >= len()`.
    pub fn advance(&mut self, column: usize, amount: f64) {
        self.heights[column] += amount;
    }

    /// Put every column back at `baseline`.
    pub fn reset(&mut self, baseline: f64) {
        self.heights.fill(baseline);
    }

    /// All column heights, by column index.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always false: a tracker has at least one column.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}
