//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: event loop, pane focus, snippet picker, key bindings
//! - **[`panes`]**: stateless render functions for each visible pane (header,
//!   editor, output, status bar, snippet picker)
//! - **[`theme`]**: dark and light chrome colors
//!
//! All playground state lives in the [`Session`](crate::session::Session);
//! [`App`] only adds presentation state such as scroll offsets.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
