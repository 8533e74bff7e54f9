//! The buffer contract exposed to the table engine
//!
//! [`TableTextEditor`] is what an engine operates through: cursor access,
//! line-level reads and mutations with exact boundary semantics, and
//! undo-group transactions. The crate's [`TextEditorAdapter`](crate::adapter::TextEditorAdapter)
//! implements it against any [`HostEditor`](crate::host::HostEditor).

use crate::geometry::{Point, Range};

/// Line-addressable buffer operations required by a table engine
///
/// Row arguments are not bounds-checked beyond the documented boundary
/// policies; passing an out-of-range row is a caller bug and may propagate
/// the host editor's own failure.
pub trait TableTextEditor {
    /// Current cursor position
    fn cursor_position(&self) -> Point;

    /// Move the cursor; must succeed even when `pos.row` is the last row
    fn set_cursor_position(&mut self, pos: Point);

    /// Set the selection from `range.start` to `range.end`
    fn set_selection_range(&mut self, range: Range);

    /// Index of the final line in the buffer (zero-based)
    fn last_row(&self) -> usize;

    /// Whether the table containing `row` may be edited
    ///
    /// Conservative: returns `true` when no table-boundary metadata is
    /// available, so an edit is never blocked without justification.
    fn accepts_table_edit(&self, row: usize) -> bool;

    /// Raw line content at `row`, no trimming
    fn line(&self, row: usize) -> String;

    /// Insert `line` as a new line at `row`, shifting later lines down
    ///
    /// When `row` is beyond the current last row the insertion appends with
    /// a leading line break, since there is no line at `row` to anchor
    /// before.
    fn insert_line(&mut self, row: usize, line: &str);

    /// Remove the line at `row`, shifting later lines up
    ///
    /// When `row` is the last row there is no following line boundary to
    /// delete through; the line's content is cleared in place instead.
    fn delete_line(&mut self, row: usize);

    /// Replace the half-open row range `[start_row, end_row)` with `lines`
    ///
    /// The physical replacement span ends at the end of line `end_row - 1`,
    /// not at the start of line `end_row`, so content is replaced in place
    /// without introducing a trailing blank line.
    fn replace_lines(&mut self, start_row: usize, end_row: usize, lines: &[String]);

    /// Open an undo group; mutations until [`end_transaction`](Self::end_transaction)
    /// form one undo/redo step
    ///
    /// Prefer [`Transaction::begin`] or [`transact`], which guarantee the
    /// group is closed on every exit path.
    fn begin_transaction(&mut self);

    /// Close the undo group opened by [`begin_transaction`](Self::begin_transaction)
    fn end_transaction(&mut self);
}

/// Scoped undo-group acquisition
///
/// Opens an undo group on construction and closes it on drop, so the group
/// is released even when the wrapped mutations panic partway. This is the
/// only resource-scoping primitive in the crate.
pub struct Transaction<'a> {
    editor: &'a mut dyn TableTextEditor,
}

impl<'a> Transaction<'a> {
    /// Open an undo group on `editor`
    pub fn begin(editor: &'a mut dyn TableTextEditor) -> Self {
        editor.begin_transaction();
        Self { editor }
    }

    /// Access the guarded editor
    pub fn editor(&mut self) -> &mut dyn TableTextEditor {
        self.editor
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.editor.end_transaction();
    }
}

/// Run `f` with all of its buffer mutations grouped as one undo step
pub fn transact<R>(
    editor: &mut dyn TableTextEditor,
    f: impl FnOnce(&mut dyn TableTextEditor) -> R,
) -> R {
    let mut tx = Transaction::begin(editor);
    f(tx.editor())
}
