//! In-memory host editor
//!
//! [`MemoryEditor`] is a complete [`HostEditor`] over a `Vec<String>` line
//! buffer. Embedders without a real host use it directly; the crate's own
//! tests exercise the adapter and dispatcher through it. Replacement
//! positions past the end of the buffer clamp to the end, matching the
//! convention of line-oriented editor APIs that the adapter's append path
//! depends on.

use pulldown_cmark::{Event, Options as ParserOptions, Parser, Tag};

use crate::geometry::{Point, Range};
use crate::host::{HostEditor, TableSpan};

/// A line buffer with a cursor, selection, and undo-group bookkeeping
#[derive(Debug, Clone)]
pub struct MemoryEditor {
    lines: Vec<String>,
    cursor: Point,
    selection: Option<Range>,
    /// Derive table metadata from the buffer on demand
    track_tables: bool,
    open_groups: usize,
    completed_groups: usize,
}

impl MemoryEditor {
    /// Create an editor over `text`, split on line breaks
    ///
    /// Empty text still yields one (empty) line; a buffer always has at
    /// least one line.
    pub fn with_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
            cursor: Point::new(0, 0),
            selection: None,
            track_tables: false,
            open_groups: 0,
            completed_groups: 0,
        }
    }

    /// Create an editor from explicit lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::with_text(&text)
    }

    /// Enable table-boundary metadata, derived from the buffer via Markdown
    /// parsing on every query
    pub fn with_table_tracking(mut self) -> Self {
        self.track_tables = true;
        self
    }

    /// Place the cursor (builder form)
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.cursor = Point::new(row, column);
        self
    }

    /// The buffer joined back into one string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The buffer's lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current selection, if one was set
    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// Undo groups currently open
    pub fn open_undo_groups(&self) -> usize {
        self.open_groups
    }

    /// Undo groups opened and closed so far
    pub fn completed_undo_groups(&self) -> usize {
        self.completed_groups
    }

    /// Clamp a point into the buffer: rows past the last line land at the
    /// end of the last line, columns clamp to line length
    fn clamp(&self, pos: Point) -> Point {
        let last = self.lines.len() - 1;
        if pos.row > last {
            return Point::new(last, self.lines[last].chars().count());
        }
        let len = self.lines[pos.row].chars().count();
        Point::new(pos.row, pos.column.min(len))
    }

    /// Byte index of char offset `column` in `line`
    fn byte_at(line: &str, column: usize) -> usize {
        line.char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }
}

impl HostEditor for MemoryEditor {
    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Point) {
        self.cursor = self.clamp(pos);
    }

    fn set_selection(&mut self, range: Range) {
        self.selection = Some(Range::new(self.clamp(range.start), self.clamp(range.end)));
        self.cursor = self.clamp(range.end);
    }

    fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    fn line(&self, row: usize) -> String {
        self.lines[row].clone()
    }

    fn replace_range(&mut self, start: Point, end: Point, text: &str) {
        let start = self.clamp(start);
        let end = self.clamp(end);

        let start_line = &self.lines[start.row];
        let end_line = &self.lines[end.row];
        let prefix = &start_line[..Self::byte_at(start_line, start.column)];
        let suffix = &end_line[Self::byte_at(end_line, end.column)..];

        let replaced = format!("{prefix}{text}{suffix}");
        let replacement: Vec<String> = replaced.split('\n').map(str::to_owned).collect();

        self.lines.splice(start.row..=end.row, replacement);
        self.cursor = self.clamp(self.cursor);
    }

    fn begin_undo_group(&mut self) {
        self.open_groups += 1;
    }

    fn end_undo_group(&mut self) {
        if self.open_groups > 0 {
            self.open_groups -= 1;
            self.completed_groups += 1;
        }
    }

    fn table_spans(&self) -> Option<Vec<TableSpan>> {
        if !self.track_tables {
            return None;
        }

        let text = self.text();

        // Byte offset of each line start, for mapping event ranges to rows.
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        let line_of = |offset: usize| match line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };

        let parser = Parser::new_ext(&text, ParserOptions::ENABLE_TABLES);
        let mut spans = Vec::new();
        for (event, range) in parser.into_offset_iter() {
            if let Event::Start(Tag::Table(_)) = event {
                spans.push(TableSpan {
                    start_row: line_of(range.start),
                    end_row: line_of(range.end.saturating_sub(1).max(range.start)),
                });
            }
        }
        Some(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_empty_line() {
        let editor = MemoryEditor::with_text("");
        assert_eq!(editor.last_row(), 0);
        assert_eq!(editor.line(0), "");
    }

    #[test]
    fn replace_range_within_one_line() {
        let mut editor = MemoryEditor::with_text("hello world");
        editor.replace_range(Point::new(0, 6), Point::new(0, 11), "there");
        assert_eq!(editor.text(), "hello there");
    }

    #[test]
    fn replace_range_spanning_lines() {
        let mut editor = MemoryEditor::from_lines(&["one", "two", "three"]);
        editor.replace_range(Point::new(0, 1), Point::new(2, 2), "X");
        assert_eq!(editor.text(), "oXree");
    }

    #[test]
    fn replace_range_with_multiline_text() {
        let mut editor = MemoryEditor::with_text("ab");
        editor.replace_range(Point::new(0, 1), Point::new(0, 1), "1\n2");
        assert_eq!(editor.lines(), &["a1".to_string(), "2b".to_string()]);
    }

    #[test]
    fn positions_past_the_end_clamp() {
        let mut editor = MemoryEditor::with_text("ab");
        editor.replace_range(Point::new(9, 0), Point::new(9, 0), "\nnew");
        assert_eq!(editor.text(), "ab\nnew");
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let mut editor = MemoryEditor::with_text("café!");
        editor.replace_range(Point::new(0, 3), Point::new(0, 4), "e");
        assert_eq!(editor.text(), "cafe!");
    }

    #[test]
    fn no_metadata_without_tracking() {
        let editor = MemoryEditor::with_text("| a | b |\n| - | - |");
        assert!(editor.table_spans().is_none());
    }

    #[test]
    fn table_spans_cover_table_rows() {
        let editor =
            MemoryEditor::with_text("prose\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\nmore prose")
                .with_table_tracking();
        let spans = editor.table_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].contains(2));
        assert!(spans[0].contains(4));
        assert!(!spans[0].contains(0));
        assert!(!spans[0].contains(6));
    }

    #[test]
    fn undo_group_bookkeeping() {
        let mut editor = MemoryEditor::with_text("x");
        editor.begin_undo_group();
        assert_eq!(editor.open_undo_groups(), 1);
        editor.end_undo_group();
        assert_eq!(editor.open_undo_groups(), 0);
        assert_eq!(editor.completed_undo_groups(), 1);
    }
}
