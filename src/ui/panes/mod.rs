//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: The syntax tree with expand/collapse markers and selection
//! - [`source`]: Source code display with syntax highlighting and current line indicator
//! - [`status`]: Status bar with keybindings and selection position
//!
//! Each pane module exports a primary `render_*` function; the tree pane also
//! exports the row flattening the app uses for navigation.

pub mod source;
pub mod status;
pub mod tree;

pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tree::{render_tree_pane, visible_rows, TreeRow};
