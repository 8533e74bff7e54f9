//! The host-editor adapter
//!
//! [`TextEditorAdapter`] presents a [`HostEditor`] through the exact buffer
//! contract a table engine expects. All line-level mutations are expressed
//! in terms of the host's single point-range replacement primitive, which is
//! where the boundary semantics at the last row live. The adapter holds no
//! buffer state of its own — every query goes to the host at the moment it
//! is made, so indices are never stale across a mutation.

use tracing::debug;

use crate::editor::TableTextEditor;
use crate::geometry::{Point, Range};
use crate::host::HostEditor;

/// Adapts a host editor to the engine-facing [`TableTextEditor`] contract
///
/// Constructed per dispatched command and discarded afterwards; the borrow
/// of the host editor keeps it from outliving the command.
pub struct TextEditorAdapter<'a> {
    host: &'a mut dyn HostEditor,
    opt_out_marker: Option<String>,
}

impl<'a> TextEditorAdapter<'a> {
    /// Wrap a host editor with no table opt-out marker
    pub fn new(host: &'a mut dyn HostEditor) -> Self {
        Self {
            host,
            opt_out_marker: None,
        }
    }

    /// Set the sentinel line that opts a table out of management
    ///
    /// When the line immediately preceding a located table equals the
    /// marker exactly, `accepts_table_edit` refuses edits for that table.
    pub fn with_opt_out_marker(mut self, marker: Option<String>) -> Self {
        self.opt_out_marker = marker;
        self
    }
}

impl TableTextEditor for TextEditorAdapter<'_> {
    fn cursor_position(&self) -> Point {
        let pos = self.host.cursor();
        debug!(row = pos.row, column = pos.column, "cursor_position");
        pos
    }

    fn set_cursor_position(&mut self, pos: Point) {
        debug!(row = pos.row, column = pos.column, "set_cursor_position");
        self.host.set_cursor(pos);
    }

    fn set_selection_range(&mut self, range: Range) {
        debug!(?range, "set_selection_range");
        self.host.set_selection(range);
    }

    fn last_row(&self) -> usize {
        self.host.last_row()
    }

    fn accepts_table_edit(&self, row: usize) -> bool {
        debug!(row, "accepts_table_edit");

        let Some(spans) = self.host.table_spans() else {
            // No metadata to justify blocking an edit.
            return true;
        };

        let Some(table) = spans.iter().find(|span| span.contains(row)) else {
            debug!(row, "accepts_table_edit: no table span covers row");
            return false;
        };

        // A sentinel line immediately above the table opts it out of
        // management.
        if let Some(marker) = &self.opt_out_marker {
            if table.start_row > 0 && self.host.line(table.start_row - 1) == *marker {
                debug!(row, "accepts_table_edit: opt-out marker found");
                return false;
            }
        }

        true
    }

    fn line(&self, row: usize) -> String {
        debug!(row, "line");
        self.host.line(row)
    }

    fn insert_line(&mut self, row: usize, line: &str) {
        debug!(row, line, "insert_line");

        if row > self.host.last_row() {
            // No line exists at `row` to anchor before; append with a
            // leading break instead. The host clamps the position to the
            // end of the buffer.
            self.host
                .replace_range(Point::new(row, 0), Point::new(row, 0), &format!("\n{line}"));
        } else {
            self.host
                .replace_range(Point::new(row, 0), Point::new(row, 0), &format!("{line}\n"));
        }
    }

    fn delete_line(&mut self, row: usize) {
        debug!(row, "delete_line");

        if row == self.host.last_row() {
            // There is no next line boundary to delete through; clear the
            // content in place.
            let len = self.host.line(row).chars().count();
            self.host
                .replace_range(Point::new(row, 0), Point::new(row, len), "");
        } else {
            self.host
                .replace_range(Point::new(row, 0), Point::new(row + 1, 0), "");
        }
    }

    fn replace_lines(&mut self, start_row: usize, end_row: usize, lines: &[String]) {
        debug!(start_row, end_row, count = lines.len(), "replace_lines");

        // `end_row` is exclusive: the span ends at the end of the previous
        // line, not at the start of `end_row`, so no trailing blank line is
        // introduced.
        let last_replaced = end_row - 1;
        let end_column = self.host.line(last_replaced).chars().count();

        self.host.replace_range(
            Point::new(start_row, 0),
            Point::new(last_replaced, end_column),
            &lines.join("\n"),
        );
    }

    fn begin_transaction(&mut self) {
        debug!("begin_transaction");
        self.host.begin_undo_group();
    }

    fn end_transaction(&mut self) {
        debug!("end_transaction");
        self.host.end_undo_group();
    }
}
