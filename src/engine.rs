//! The table engine seam
//!
//! The actual table-structure algorithms (parsing a table out of raw lines,
//! column width computation, delimiter realignment, formula evaluation) live
//! behind [`TableEngine`]. This crate never inspects table internals; it
//! binds an engine to a buffer through [`TableTextEditor`] and forwards one
//! operation per dispatched command.

use std::fmt;

use crate::editor::TableTextEditor;
use crate::options::Options;

/// Column alignment requested by an align command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Use the default alignment
    None,
    Left,
    Right,
    Center,
}

/// Row sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A recoverable formula-evaluation failure reported by the engine
///
/// Carries the engine's message verbatim; the dispatcher surfaces it as a
/// user notice and never propagates it further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaError {
    message: String,
}

impl FormulaError {
    /// Wrap an engine-provided message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine's message, shown to the user as-is
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FormulaError {}

/// Operations a table engine must provide
///
/// Every operation receives the buffer it acts on and a freshly resolved
/// [`Options`]; engines hold no reference to the buffer between calls.
pub trait TableEngine {
    /// Whether the cursor currently sits inside a table row
    fn cursor_is_in_table(&mut self, editor: &mut dyn TableTextEditor, options: &Options) -> bool;

    /// Move focus to the next cell
    fn next_cell(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Move focus to the previous cell
    fn previous_cell(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Move focus to the next row
    fn next_row(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Format the table and move the cursor out of it
    fn escape(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Format the table under the cursor
    fn format(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Format every table in the buffer
    fn format_all(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Insert an empty column before the focused one
    fn insert_column(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Insert an empty row before the focused one
    fn insert_row(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Delete the focused column
    fn delete_column(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Delete the focused row
    fn delete_row(&mut self, editor: &mut dyn TableTextEditor, options: &Options);

    /// Change the focused column's alignment
    fn align_column(
        &mut self,
        editor: &mut dyn TableTextEditor,
        alignment: Alignment,
        options: &Options,
    );

    /// Move the focused column by `offset` (negative = left)
    fn move_column(&mut self, editor: &mut dyn TableTextEditor, offset: isize, options: &Options);

    /// Move the focused row by `offset` (negative = up)
    fn move_row(&mut self, editor: &mut dyn TableTextEditor, offset: isize, options: &Options);

    /// Sort body rows by the focused column
    fn sort_rows(&mut self, editor: &mut dyn TableTextEditor, order: SortOrder, options: &Options);

    /// Evaluate formula lines attached to the table
    ///
    /// Returns the engine's error on failure; success is silent.
    fn evaluate_formulas(
        &mut self,
        editor: &mut dyn TableTextEditor,
        options: &Options,
    ) -> Result<(), FormulaError>;

    /// Render the table under the cursor as CSV
    fn export_csv(
        &mut self,
        editor: &mut dyn TableTextEditor,
        include_header: bool,
        options: &Options,
    ) -> String;
}
