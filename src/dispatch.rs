//! Command dispatch
//!
//! Every user-facing table action — host command, keypress, toolbar button —
//! funnels through [`TablePlugin::perform`]. It is the single place that
//! tears down the toolbar, resolves the active editable view, gates on
//! "cursor is in a table", binds the engine to a fresh adapter and
//! configuration, and reports failures to the user.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::adapter::TextEditorAdapter;
use crate::editor::TableTextEditor;
use crate::engine::{Alignment, SortOrder, TableEngine};
use crate::geometry::Point;
use crate::host::Workspace;
use crate::key::{Key, Keystroke};
use crate::settings::PluginSettings;
use crate::toolbar::{ToolbarButton, ToolbarController};

/// Notice text shown when a table command runs outside a table
pub const NOT_IN_TABLE_NOTICE: &str = "Cursor must be in a table.";

/// The host-facing UI surface
///
/// Notices, the toolbar widget, and help docs are host UI; the plugin only
/// decides when they appear.
pub trait PluginHost {
    /// Show a transient user-visible notice
    fn notify(&mut self, message: &str);

    /// Render the toolbar anchored at the captured cursor point
    fn show_toolbar(&mut self, anchor: Point, buttons: &[ToolbarButton]);

    /// Tear down the toolbar widget
    fn hide_toolbar(&mut self);

    /// Open the plugin's help documentation
    fn open_help(&mut self) {}
}

/// Every command the plugin registers with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableCommand {
    FormatTable,
    FormatAllTables,
    NextCell,
    PreviousCell,
    NextRow,
    EscapeTable,
    InsertColumn,
    InsertRow,
    DeleteColumn,
    DeleteRow,
    AlignColumnLeft,
    AlignColumnCenter,
    AlignColumnRight,
    MoveColumnLeft,
    MoveColumnRight,
    MoveRowUp,
    MoveRowDown,
    SortRowsAscending,
    SortRowsDescending,
    EvaluateFormulas,
    ExportCsv,
    ToggleToolbar,
}

impl TableCommand {
    /// Every command, for host registration
    pub const ALL: [TableCommand; 22] = [
        TableCommand::FormatTable,
        TableCommand::FormatAllTables,
        TableCommand::NextCell,
        TableCommand::PreviousCell,
        TableCommand::NextRow,
        TableCommand::EscapeTable,
        TableCommand::InsertColumn,
        TableCommand::InsertRow,
        TableCommand::DeleteColumn,
        TableCommand::DeleteRow,
        TableCommand::AlignColumnLeft,
        TableCommand::AlignColumnCenter,
        TableCommand::AlignColumnRight,
        TableCommand::MoveColumnLeft,
        TableCommand::MoveColumnRight,
        TableCommand::MoveRowUp,
        TableCommand::MoveRowDown,
        TableCommand::SortRowsAscending,
        TableCommand::SortRowsDescending,
        TableCommand::EvaluateFormulas,
        TableCommand::ExportCsv,
        TableCommand::ToggleToolbar,
    ];

    /// Stable identifier used for host command registration
    pub fn id(&self) -> &'static str {
        match self {
            TableCommand::FormatTable => "format-table",
            TableCommand::FormatAllTables => "format-all-tables",
            TableCommand::NextCell => "next-cell",
            TableCommand::PreviousCell => "previous-cell",
            TableCommand::NextRow => "next-row",
            TableCommand::EscapeTable => "escape-table",
            TableCommand::InsertColumn => "insert-column",
            TableCommand::InsertRow => "insert-row",
            TableCommand::DeleteColumn => "delete-column",
            TableCommand::DeleteRow => "delete-row",
            TableCommand::AlignColumnLeft => "left-align-column",
            TableCommand::AlignColumnCenter => "center-align-column",
            TableCommand::AlignColumnRight => "right-align-column",
            TableCommand::MoveColumnLeft => "move-column-left",
            TableCommand::MoveColumnRight => "move-column-right",
            TableCommand::MoveRowUp => "move-row-up",
            TableCommand::MoveRowDown => "move-row-down",
            TableCommand::SortRowsAscending => "sort-rows-ascending",
            TableCommand::SortRowsDescending => "sort-rows-descending",
            TableCommand::EvaluateFormulas => "evaluate-formulas",
            TableCommand::ExportCsv => "export-csv",
            TableCommand::ToggleToolbar => "toggle-toolbar",
        }
    }

    /// Human-readable command name for menus and palettes
    pub fn name(&self) -> &'static str {
        match self {
            TableCommand::FormatTable => "Format table at the cursor",
            TableCommand::FormatAllTables => "Format all tables in this file",
            TableCommand::NextCell => "Go to next cell",
            TableCommand::PreviousCell => "Go to previous cell",
            TableCommand::NextRow => "Go to next row",
            TableCommand::EscapeTable => "Move cursor out of the table",
            TableCommand::InsertColumn => "Insert column before current",
            TableCommand::InsertRow => "Insert row before current",
            TableCommand::DeleteColumn => "Delete column",
            TableCommand::DeleteRow => "Delete row",
            TableCommand::AlignColumnLeft => "Left align column",
            TableCommand::AlignColumnCenter => "Center align column",
            TableCommand::AlignColumnRight => "Right align column",
            TableCommand::MoveColumnLeft => "Move column left",
            TableCommand::MoveColumnRight => "Move column right",
            TableCommand::MoveRowUp => "Move row up",
            TableCommand::MoveRowDown => "Move row down",
            TableCommand::SortRowsAscending => "Sort rows ascending",
            TableCommand::SortRowsDescending => "Sort rows descending",
            TableCommand::EvaluateFormulas => "Evaluate table formulas",
            TableCommand::ExportCsv => "Export table as CSV",
            TableCommand::ToggleToolbar => "Toggle table toolbar",
        }
    }
}

impl fmt::Display for TableCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TableCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableCommand::ALL
            .into_iter()
            .find(|cmd| cmd.id() == s)
            .ok_or(())
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The engine operation ran
    Performed,
    /// The engine rendered the table as CSV
    Csv(String),
    /// A new toolbar was displayed
    ToolbarShown,
    /// No active view exposes an editable buffer; nothing happened
    NoEditor,
    /// The cursor was not inside a table; nothing happened
    NotInTable,
}

/// Whether a keypress was consumed
///
/// `PassThrough` means the host must run its default behavior and must not
/// mark the event as handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    PassThrough,
}

/// The plugin object: engine, settings snapshot, and the toolbar state
///
/// One instance per host plugin; all dispatch goes through it.
pub struct TablePlugin<E: TableEngine> {
    engine: E,
    settings: PluginSettings,
    toolbar: ToolbarController,
}

impl<E: TableEngine> TablePlugin<E> {
    /// Create a plugin around an engine and a settings snapshot
    pub fn new(engine: E, settings: PluginSettings) -> Self {
        Self {
            engine,
            settings,
            toolbar: ToolbarController::new(),
        }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The current settings snapshot
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Replace the settings snapshot (after a settings-UI change)
    pub fn update_settings(&mut self, settings: PluginSettings) {
        self.settings = settings;
    }

    /// The toolbar state machine
    pub fn toolbar(&self) -> &ToolbarController {
        &self.toolbar
    }

    /// Dispatch one table command
    ///
    /// The choke point every action passes through:
    ///
    /// 1. Clear any displayed toolbar — acting implicitly dismisses it.
    /// 2. Resolve the active editable view; none → silent no-op.
    /// 3. Bind the engine to a fresh adapter and resolved configuration.
    /// 4. Gate on `cursor_is_in_table`; outside a table either alert the
    ///    user or pass through silently, per `alert_if_no_table`.
    /// 5. Run the operation. Formula failures become a notice; CSV comes
    ///    back in the outcome.
    pub fn perform(
        &mut self,
        workspace: &mut dyn Workspace,
        ui: &mut dyn PluginHost,
        command: TableCommand,
        alert_if_no_table: bool,
    ) -> ActionOutcome {
        debug!(command = %command, "dispatch");

        let toolbar_was_displayed = self.toolbar.is_displayed();
        self.toolbar.clear(ui);

        let Some(host) = workspace.active_editor() else {
            debug!("no active editable view");
            return ActionOutcome::NoEditor;
        };

        let options = self.settings.resolve();
        let mut editor = TextEditorAdapter::new(host)
            .with_opt_out_marker(self.settings.opt_out_marker.clone());

        if !self.engine.cursor_is_in_table(&mut editor, &options) {
            if alert_if_no_table {
                ui.notify(NOT_IN_TABLE_NOTICE);
            }
            return ActionOutcome::NotInTable;
        }

        match command {
            TableCommand::FormatTable => self.engine.format(&mut editor, &options),
            TableCommand::FormatAllTables => self.engine.format_all(&mut editor, &options),
            TableCommand::NextCell => self.engine.next_cell(&mut editor, &options),
            TableCommand::PreviousCell => self.engine.previous_cell(&mut editor, &options),
            TableCommand::NextRow => self.engine.next_row(&mut editor, &options),
            TableCommand::EscapeTable => self.engine.escape(&mut editor, &options),
            TableCommand::InsertColumn => self.engine.insert_column(&mut editor, &options),
            TableCommand::InsertRow => self.engine.insert_row(&mut editor, &options),
            TableCommand::DeleteColumn => self.engine.delete_column(&mut editor, &options),
            TableCommand::DeleteRow => self.engine.delete_row(&mut editor, &options),
            TableCommand::AlignColumnLeft => {
                self.engine
                    .align_column(&mut editor, Alignment::Left, &options)
            }
            TableCommand::AlignColumnCenter => {
                self.engine
                    .align_column(&mut editor, Alignment::Center, &options)
            }
            TableCommand::AlignColumnRight => {
                self.engine
                    .align_column(&mut editor, Alignment::Right, &options)
            }
            TableCommand::MoveColumnLeft => self.engine.move_column(&mut editor, -1, &options),
            TableCommand::MoveColumnRight => self.engine.move_column(&mut editor, 1, &options),
            TableCommand::MoveRowUp => self.engine.move_row(&mut editor, -1, &options),
            TableCommand::MoveRowDown => self.engine.move_row(&mut editor, 1, &options),
            TableCommand::SortRowsAscending => {
                self.engine
                    .sort_rows(&mut editor, SortOrder::Ascending, &options)
            }
            TableCommand::SortRowsDescending => {
                self.engine
                    .sort_rows(&mut editor, SortOrder::Descending, &options)
            }
            TableCommand::EvaluateFormulas => {
                // A recoverable, user-reported condition: surface the
                // engine's message, never propagate.
                if let Err(err) = self.engine.evaluate_formulas(&mut editor, &options) {
                    ui.notify(err.message());
                }
            }
            TableCommand::ExportCsv => {
                let csv = self.engine.export_csv(&mut editor, true, &options);
                return ActionOutcome::Csv(csv);
            }
            TableCommand::ToggleToolbar => {
                // Step 1 already cleared a displayed toolbar; showing a new
                // one here would un-toggle it.
                if toolbar_was_displayed {
                    return ActionOutcome::Performed;
                }
                let anchor = editor.cursor_position();
                self.toolbar.show(anchor, ui);
                return ActionOutcome::ToolbarShown;
            }
        }

        ActionOutcome::Performed
    }

    /// Re-render the current table as CSV, e.g. when the user toggles the
    /// include-header option in the host's export view
    pub fn export_csv(
        &mut self,
        workspace: &mut dyn Workspace,
        ui: &mut dyn PluginHost,
        include_header: bool,
    ) -> Option<String> {
        self.toolbar.clear(ui);

        let host = workspace.active_editor()?;
        let options = self.settings.resolve();
        let mut editor = TextEditorAdapter::new(host)
            .with_opt_out_marker(self.settings.opt_out_marker.clone());

        if !self.engine.cursor_is_in_table(&mut editor, &options) {
            ui.notify(NOT_IN_TABLE_NOTICE);
            return None;
        }

        Some(self.engine.export_csv(&mut editor, include_header, &options))
    }

    /// Handle a toolbar button click
    ///
    /// Restores the cursor to the point captured when the toolbar opened,
    /// dispatches the button's command, and unconditionally ends `Hidden`
    /// (dispatch clears the toolbar before acting).
    pub fn toolbar_button(
        &mut self,
        workspace: &mut dyn Workspace,
        ui: &mut dyn PluginHost,
        button: ToolbarButton,
    ) -> ActionOutcome {
        debug!(?button, "toolbar button");

        let anchor = self.toolbar.anchor();

        let Some(command) = button.command() else {
            self.toolbar.clear(ui);
            if button == ToolbarButton::Help {
                ui.open_help();
            }
            return ActionOutcome::Performed;
        };

        // The click may have moved focus; the action applies to the cell
        // that was focused when the toolbar opened.
        if let Some(anchor) = anchor {
            if let Some(host) = workspace.active_editor() {
                host.set_cursor(anchor);
            }
        }

        self.perform(workspace, ui, command, true)
    }

    /// Handle an ambient keypress (Tab, Enter, Escape)
    ///
    /// Returns [`KeyDisposition::PassThrough`] whenever the host's default
    /// behavior should run: binding disabled, modifier held on Enter, no
    /// editor, or cursor outside any table.
    pub fn handle_keystroke(
        &mut self,
        workspace: &mut dyn Workspace,
        ui: &mut dyn PluginHost,
        keystroke: Keystroke,
    ) -> KeyDisposition {
        let command = match keystroke.key {
            Key::Escape => {
                // Escape only dismisses the toolbar, it never dispatches.
                if self.toolbar.is_displayed() {
                    self.toolbar.clear(ui);
                    return KeyDisposition::Handled;
                }
                return KeyDisposition::PassThrough;
            }
            Key::Tab => {
                if !self.settings.bind_tab {
                    return KeyDisposition::PassThrough;
                }
                if keystroke.modifiers.shift() {
                    TableCommand::PreviousCell
                } else {
                    TableCommand::NextCell
                }
            }
            Key::Enter => {
                if !self.settings.bind_enter {
                    return KeyDisposition::PassThrough;
                }
                // Ctrl/Cmd/Alt+Enter means something else to the host.
                if keystroke.modifiers.has_command_modifier() {
                    return KeyDisposition::PassThrough;
                }
                if keystroke.modifiers.shift() {
                    TableCommand::EscapeTable
                } else {
                    TableCommand::NextRow
                }
            }
        };

        match self.perform(workspace, ui, command, false) {
            ActionOutcome::Performed | ActionOutcome::Csv(_) | ActionOutcome::ToolbarShown => {
                KeyDisposition::Handled
            }
            ActionOutcome::NoEditor | ActionOutcome::NotInTable => KeyDisposition::PassThrough,
        }
    }
}
