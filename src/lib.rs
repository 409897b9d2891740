//! # Introduction
//!
//! A terminal playground for the momonga language. The left (or upper) pane
//! is a code editor with momonga syntax highlighting, bracket handling and
//! auto-indent; the other pane shows the output of the latest run. The source
//! is checked for syntax errors as you type.
//!
//! ## Flow
//!
//! ```text
//! key → SourceEditor → SourceCell → Session → parse check → flag
//! run → Session → ExecutionBridge → Interpreter → event bus → OutputLog
//! ```
//!
//! 1. [`language`]: tokenizer, bracket/indent rules and palettes, registered
//!    once per process.
//! 2. [`editor`]: the editing widget bound to a language and a theme.
//! 3. [`interpreter`]: the boundary trait, its event bus and an
//!    external-process implementation.
//! 4. [`bridge`]: run ids and routing of output events into the [`output`] log.
//! 5. [`session`]: owns all state and exposes the entry points the UI calls.
//! 6. [`ui`]: ratatui front end; not part of the stable library API.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod editor;
pub mod interpreter;
pub mod language;
pub mod output;
pub mod prefs;
pub mod session;
pub mod snippets;
pub mod source;
pub mod ui;
