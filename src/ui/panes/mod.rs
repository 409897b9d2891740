//! TUI pane rendering modules
//!
//! Each module exports stateless render functions; scroll offsets live in
//! [`App`](crate::ui::App) and are passed in by reference.
//!
//! - [`editor`]: source editor with line numbers, syntax colors and cursor
//! - [`output`]: standard output and standard error of the latest run
//! - [`status`]: header bar and status bar
//! - [`snippets`]: snippet picker popup

pub mod editor;
pub mod output;
pub mod snippets;
pub mod status;

pub use editor::{render_editor_pane, EditorScroll};
pub use output::render_output_pane;
pub use snippets::render_snippet_picker;
pub use status::{render_header, render_status_bar, HeaderData};
