//! Interpreter boundary
//!
//! The playground never parses or evaluates momonga itself. It talks to an
//! interpreter through the [`Interpreter`] trait:
//!
//! - [`errors`]: error type shared by boundary implementations
//! - [`events`]: typed event bus carrying readiness and output lines
//! - [`process`]: boundary backed by an external interpreter program
//!
//! # Protocol
//!
//! 1. [`Interpreter::initialize`] is called once with an [`events::Emitter`].
//!    It returns at once; the boundary later emits `Ready` or `InitFailed`.
//! 2. [`Interpreter::run`] starts one execution and returns immediately.
//!    Output arrives afterwards as `Line` events tagged with the [`RunId`]
//!    passed in. There is no completion event.
//! 3. [`Interpreter::check_parse_error`] answers synchronously whether a
//!    source would be rejected as a syntax error, without running it and
//!    without emitting anything.

pub mod errors;
pub mod events;
pub mod process;

pub use errors::InterpreterError;
pub use events::{BoundaryEvent, Emitter, Subscription};
pub use process::ProcessInterpreter;

use std::fmt;

/// Identifier of one run. Later runs get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Output stream discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn label(self) -> &'static str {
        match self {
            Stream::Stdout => "Standard Output",
            Stream::Stderr => "Standard Error",
        }
    }
}

pub trait Interpreter {
    /// Begin one-time initialization. Completion is reported on `emitter`.
    fn initialize(&mut self, emitter: Emitter);

    /// Start executing `source`. Output is reported on the emitter given to
    /// `initialize`, tagged with `run`.
    fn run(&mut self, run: RunId, source: &str);

    /// Whether `source` has a syntax error. Must not emit any event.
    fn check_parse_error(&mut self, source: &str) -> Result<bool, InterpreterError>;
}

impl<T: Interpreter + ?Sized> Interpreter for Box<T> {
    fn initialize(&mut self, emitter: Emitter) {
        (**self).initialize(emitter)
    }

    fn run(&mut self, run: RunId, source: &str) {
        (**self).run(run, source)
    }

    fn check_parse_error(&mut self, source: &str) -> Result<bool, InterpreterError> {
        (**self).check_parse_error(source)
    }
}
