//! gridline - inline Markdown table editing for line-oriented editors
//!
//! This crate is the layer between a host text editor and a Markdown table
//! engine: it adapts the host's line-addressable buffer to the engine's
//! point/range contract, funnels every table action through one dispatch
//! choke point, manages the ephemeral action toolbar, and resolves
//! configuration per invocation. The table-structure algorithms themselves
//! (parsing, column widths, realignment, formulas) live behind the
//! [`TableEngine`] trait and are supplied by the embedder.

pub mod adapter;
pub mod config_paths;
pub mod dispatch;
pub mod editor;
pub mod engine;
pub mod geometry;
pub mod host;
pub mod key;
pub mod logging;
pub mod memory;
pub mod options;
pub mod settings;
pub mod toolbar;

// Re-export commonly used types
pub use adapter::TextEditorAdapter;
pub use dispatch::{ActionOutcome, KeyDisposition, PluginHost, TableCommand, TablePlugin};
pub use editor::{transact, TableTextEditor, Transaction};
pub use engine::{Alignment, FormulaError, SortOrder, TableEngine};
pub use geometry::{Point, Range};
pub use host::{HostEditor, TableSpan, Workspace};
pub use key::{Key, Keystroke, Modifiers};
pub use memory::MemoryEditor;
pub use options::{options_with_defaults, Options, OptionsOverride};
pub use settings::PluginSettings;
pub use toolbar::{ToolbarButton, ToolbarController};
