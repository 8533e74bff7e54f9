//! Shared test helpers for integration tests
//!
//! Note: items may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridline::dispatch::PluginHost;
use gridline::editor::{transact, TableTextEditor};
use gridline::engine::{Alignment, FormulaError, SortOrder, TableEngine};
use gridline::geometry::Point;
use gridline::host::{HostEditor, Workspace};
use gridline::memory::MemoryEditor;
use gridline::options::Options;
use gridline::toolbar::ToolbarButton;

/// A workspace with one view that may or may not be an editable buffer
pub struct TestWorkspace {
    pub editor: MemoryEditor,
    pub editable: bool,
}

impl TestWorkspace {
    pub fn new(editor: MemoryEditor) -> Self {
        Self {
            editor,
            editable: true,
        }
    }

    /// A workspace whose active view is not a line-addressable editor
    pub fn not_editable(editor: MemoryEditor) -> Self {
        Self {
            editor,
            editable: false,
        }
    }
}

impl Workspace for TestWorkspace {
    fn active_editor(&mut self) -> Option<&mut dyn HostEditor> {
        if self.editable {
            Some(&mut self.editor)
        } else {
            None
        }
    }
}

/// Records every UI interaction the plugin requests
#[derive(Default)]
pub struct RecordingHost {
    pub notices: Vec<String>,
    pub toolbars_shown: Vec<Point>,
    pub toolbars_hidden: usize,
    pub help_opened: usize,
}

impl PluginHost for RecordingHost {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn show_toolbar(&mut self, anchor: Point, _buttons: &[ToolbarButton]) {
        self.toolbars_shown.push(anchor);
    }

    fn hide_toolbar(&mut self) {
        self.toolbars_hidden += 1;
    }

    fn open_help(&mut self) {
        self.help_opened += 1;
    }
}

/// A scripted engine: detects tables by pipe characters, implements just
/// enough of insert-row and delete-row to test buffer effects, and records
/// every call
pub struct FakeEngine {
    pub calls: Vec<String>,
    pub formula_result: Result<(), FormulaError>,
    pub csv_output: String,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            formula_result: Ok(()),
            csv_output: "a,b\n1,2".to_string(),
        }
    }
}

impl FakeEngine {
    pub fn failing_formulas(message: &str) -> Self {
        Self {
            formula_result: Err(FormulaError::new(message)),
            ..Default::default()
        }
    }

    fn record(&mut self, call: &str) {
        self.calls.push(call.to_string());
    }

    /// Cell count of a pipe row, ignoring leading/trailing delimiters
    fn cell_count(line: &str) -> usize {
        let trimmed = line.trim().trim_start_matches('|').trim_end_matches('|');
        trimmed.split('|').count()
    }
}

impl TableEngine for FakeEngine {
    fn cursor_is_in_table(&mut self, editor: &mut dyn TableTextEditor, _options: &Options) -> bool {
        let row = editor.cursor_position().row;
        if row > editor.last_row() {
            return false;
        }
        editor.line(row).contains('|') && editor.accepts_table_edit(row)
    }

    fn next_cell(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("next_cell");
    }

    fn previous_cell(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("previous_cell");
    }

    fn next_row(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("next_row");
    }

    fn escape(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("escape");
    }

    fn format(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("format");
    }

    fn format_all(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("format_all");
    }

    fn insert_column(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("insert_column");
    }

    fn insert_row(&mut self, editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("insert_row");
        let row = editor.cursor_position().row;
        let cells = Self::cell_count(&editor.line(row));
        let blank = format!("|{}", "   |".repeat(cells));
        transact(editor, |ed| {
            ed.insert_line(row, &blank);
            ed.set_cursor_position(Point::new(row, 2));
        });
    }

    fn delete_column(&mut self, _editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("delete_column");
    }

    fn delete_row(&mut self, editor: &mut dyn TableTextEditor, _options: &Options) {
        self.record("delete_row");
        let row = editor.cursor_position().row;
        transact(editor, |ed| ed.delete_line(row));
    }

    fn align_column(
        &mut self,
        _editor: &mut dyn TableTextEditor,
        alignment: Alignment,
        _options: &Options,
    ) {
        self.record(&format!("align_column:{:?}", alignment));
    }

    fn move_column(
        &mut self,
        _editor: &mut dyn TableTextEditor,
        offset: isize,
        _options: &Options,
    ) {
        self.record(&format!("move_column:{}", offset));
    }

    fn move_row(&mut self, _editor: &mut dyn TableTextEditor, offset: isize, _options: &Options) {
        self.record(&format!("move_row:{}", offset));
    }

    fn sort_rows(
        &mut self,
        _editor: &mut dyn TableTextEditor,
        order: SortOrder,
        _options: &Options,
    ) {
        self.record(&format!("sort_rows:{:?}", order));
    }

    fn evaluate_formulas(
        &mut self,
        _editor: &mut dyn TableTextEditor,
        _options: &Options,
    ) -> Result<(), FormulaError> {
        self.record("evaluate_formulas");
        self.formula_result.clone()
    }

    fn export_csv(
        &mut self,
        _editor: &mut dyn TableTextEditor,
        include_header: bool,
        _options: &Options,
    ) -> String {
        self.record(&format!("export_csv:{}", include_header));
        if include_header {
            self.csv_output.clone()
        } else {
            self.csv_output
                .split_once('\n')
                .map(|(_, body)| body.to_string())
                .unwrap_or_default()
        }
    }
}

/// A three-row table buffer used by several scenarios
pub fn small_table() -> MemoryEditor {
    MemoryEditor::from_lines(&["a|b", "-|-", "1|2"])
}
