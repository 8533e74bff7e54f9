//! Host editor capability traits
//!
//! The host application owns the buffer, cursor, undo stack, and any
//! document metadata. [`HostEditor`] is the narrow capability this crate
//! needs from it: CodeMirror-style point-range replacement plus cursor and
//! selection control. [`Workspace`] resolves the active view to that
//! capability — a typed accessor instead of runtime type inspection.

use crate::geometry::{Point, Range};

/// A contiguous block of rows the host knows to be a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpan {
    /// First row of the table block
    pub start_row: usize,
    /// Last row of the table block (inclusive)
    pub end_row: usize,
}

impl TableSpan {
    /// True when `row` falls inside this span
    pub fn contains(&self, row: usize) -> bool {
        self.start_row <= row && row <= self.end_row
    }
}

/// The line-addressable buffer capability a host editor exposes
///
/// Positions use the crate's [`Point`] coordinates. Implementations follow
/// the usual editor convention of clamping positions past the end of the
/// buffer to the end, which the adapter's append path relies on.
pub trait HostEditor {
    /// Current cursor position
    fn cursor(&self) -> Point;

    /// Move the cursor
    fn set_cursor(&mut self, pos: Point);

    /// Select from `range.start` to `range.end`
    fn set_selection(&mut self, range: Range);

    /// Zero-based index of the final line
    fn last_row(&self) -> usize;

    /// Raw content of the line at `row`
    ///
    /// Out-of-range rows are a caller bug; the host may panic.
    fn line(&self, row: usize) -> String;

    /// Replace the text between `start` and `end` with `text`
    ///
    /// `text` may contain line breaks; the replacement may therefore change
    /// the number of lines in the buffer. This is the single mutation
    /// primitive every adapter operation is built on.
    fn replace_range(&mut self, start: Point, end: Point, text: &str);

    /// Open an undo group in the host's undo system
    fn begin_undo_group(&mut self);

    /// Close the currently open undo group
    fn end_undo_group(&mut self);

    /// Table-block metadata for the current buffer content, if the host
    /// maintains any
    ///
    /// `None` means "no metadata available", which the adapter treats as
    /// permission to edit. Hosts must derive this from the buffer as it is
    /// now, never from a stale snapshot.
    fn table_spans(&self) -> Option<Vec<TableSpan>> {
        None
    }
}

/// Resolves the currently active view to an editable buffer
///
/// Returns `None` when the active view is not a line-addressable editor
/// (a preview pane, an image, no view at all). The dispatcher treats that
/// as a silent no-op: there is no notion of a "current table" outside an
/// editor.
pub trait Workspace {
    /// The active view's editor capability, if it has one
    fn active_editor(&mut self) -> Option<&mut dyn HostEditor>;
}
