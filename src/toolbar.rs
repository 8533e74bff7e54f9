//! The ephemeral table-actions toolbar
//!
//! At most one toolbar exists per plugin instance. Its lifecycle is
//! `Hidden → Displayed → Hidden`: entering `Displayed` captures the cursor
//! point so every button acts on the cell that was focused when the toolbar
//! opened, not wherever a click may have moved focus. The dispatcher clears
//! the toolbar before every action, so re-entrancy is impossible by
//! construction rather than guarded against.
//!
//! Rendering is the host's job through
//! [`PluginHost`](crate::dispatch::PluginHost); this module owns only the
//! state machine.

use tracing::debug;

use crate::dispatch::{PluginHost, TableCommand};
use crate::geometry::Point;

/// A button on the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    AlignLeft,
    AlignCenter,
    AlignRight,
    MoveColumnLeft,
    MoveColumnRight,
    MoveRowUp,
    MoveRowDown,
    InsertColumn,
    InsertRow,
    DeleteColumn,
    DeleteRow,
    SortAscending,
    SortDescending,
    EvaluateFormulas,
    ExportCsv,
    Help,
    Close,
}

impl ToolbarButton {
    /// Every button, in display order
    pub const ALL: [ToolbarButton; 17] = [
        ToolbarButton::AlignLeft,
        ToolbarButton::AlignCenter,
        ToolbarButton::AlignRight,
        ToolbarButton::MoveColumnLeft,
        ToolbarButton::MoveColumnRight,
        ToolbarButton::MoveRowUp,
        ToolbarButton::MoveRowDown,
        ToolbarButton::InsertColumn,
        ToolbarButton::InsertRow,
        ToolbarButton::DeleteColumn,
        ToolbarButton::DeleteRow,
        ToolbarButton::SortAscending,
        ToolbarButton::SortDescending,
        ToolbarButton::EvaluateFormulas,
        ToolbarButton::ExportCsv,
        ToolbarButton::Help,
        ToolbarButton::Close,
    ];

    /// Human-readable label / tooltip text
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarButton::AlignLeft => "Align column left",
            ToolbarButton::AlignCenter => "Align column center",
            ToolbarButton::AlignRight => "Align column right",
            ToolbarButton::MoveColumnLeft => "Move column left",
            ToolbarButton::MoveColumnRight => "Move column right",
            ToolbarButton::MoveRowUp => "Move row up",
            ToolbarButton::MoveRowDown => "Move row down",
            ToolbarButton::InsertColumn => "Insert column",
            ToolbarButton::InsertRow => "Insert row",
            ToolbarButton::DeleteColumn => "Delete column",
            ToolbarButton::DeleteRow => "Delete row",
            ToolbarButton::SortAscending => "Sort rows ascending",
            ToolbarButton::SortDescending => "Sort rows descending",
            ToolbarButton::EvaluateFormulas => "Evaluate formulas",
            ToolbarButton::ExportCsv => "Export as CSV",
            ToolbarButton::Help => "Help",
            ToolbarButton::Close => "Close toolbar",
        }
    }

    /// The table command this button dispatches, if any
    ///
    /// `Help` and `Close` act on the toolbar itself rather than the table.
    pub fn command(&self) -> Option<TableCommand> {
        match self {
            ToolbarButton::AlignLeft => Some(TableCommand::AlignColumnLeft),
            ToolbarButton::AlignCenter => Some(TableCommand::AlignColumnCenter),
            ToolbarButton::AlignRight => Some(TableCommand::AlignColumnRight),
            ToolbarButton::MoveColumnLeft => Some(TableCommand::MoveColumnLeft),
            ToolbarButton::MoveColumnRight => Some(TableCommand::MoveColumnRight),
            ToolbarButton::MoveRowUp => Some(TableCommand::MoveRowUp),
            ToolbarButton::MoveRowDown => Some(TableCommand::MoveRowDown),
            ToolbarButton::InsertColumn => Some(TableCommand::InsertColumn),
            ToolbarButton::InsertRow => Some(TableCommand::InsertRow),
            ToolbarButton::DeleteColumn => Some(TableCommand::DeleteColumn),
            ToolbarButton::DeleteRow => Some(TableCommand::DeleteRow),
            ToolbarButton::SortAscending => Some(TableCommand::SortRowsAscending),
            ToolbarButton::SortDescending => Some(TableCommand::SortRowsDescending),
            ToolbarButton::EvaluateFormulas => Some(TableCommand::EvaluateFormulas),
            ToolbarButton::ExportCsv => Some(TableCommand::ExportCsv),
            ToolbarButton::Help | ToolbarButton::Close => None,
        }
    }
}

/// Toolbar lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ToolbarState {
    #[default]
    Hidden,
    Displayed {
        anchor: Point,
    },
}

/// Owns the toolbar state machine
///
/// A field of the plugin object, never a global; the dispatcher clears it
/// at the start of every action.
#[derive(Debug, Default)]
pub struct ToolbarController {
    state: ToolbarState,
}

impl ToolbarController {
    /// A hidden toolbar
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the toolbar is on screen
    pub fn is_displayed(&self) -> bool {
        matches!(self.state, ToolbarState::Displayed { .. })
    }

    /// The cursor point captured when the toolbar was opened
    pub fn anchor(&self) -> Option<Point> {
        match self.state {
            ToolbarState::Displayed { anchor } => Some(anchor),
            ToolbarState::Hidden => None,
        }
    }

    /// Display the toolbar anchored at `anchor`, tearing down any existing
    /// one first
    pub fn show(&mut self, anchor: Point, ui: &mut dyn PluginHost) {
        self.clear(ui);
        debug!(row = anchor.row, "showing toolbar");
        ui.show_toolbar(anchor, &ToolbarButton::ALL);
        self.state = ToolbarState::Displayed { anchor };
    }

    /// Transition to `Hidden`, releasing the host UI node
    ///
    /// A no-op when already hidden.
    pub fn clear(&mut self, ui: &mut dyn PluginHost) {
        if self.is_displayed() {
            debug!("clearing toolbar");
            ui.hide_toolbar();
            self.state = ToolbarState::Hidden;
        }
    }
}
