//! Buffer coordinates: points and ranges
//!
//! All coordinates are zero-based. `row` is a line index in the host buffer,
//! `column` is a character offset within that line (chars, not bytes). These
//! are host-buffer coordinates, never the engine's internal cell indices.

use std::cmp::Ordering;
use std::fmt;

/// A cursor location in the host buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Zero-based line index
    pub row: usize,
    /// Zero-based character offset within the line
    pub column: usize,
}

impl Point {
    /// Create a new point
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

// Row-major ordering: row first, then column.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A span between two points, used for selections and line-span replacements
///
/// Callers keep `start <= end` in row-major order; the type does not enforce
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start of the span
    pub start: Point,
    /// End of the span
    pub end: Point,
}

impl Range {
    /// Create a new range
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// True when start and end coincide
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
