//! Execution bridge between the session and the interpreter boundary
//!
//! The bridge hands out run ids, fires runs without waiting for them, and
//! routes output events from the bus into the [`OutputLog`]. Only lines of the
//! latest run are kept: a run started while an earlier one is still printing
//! makes the earlier run's remaining lines stale, and they are dropped rather
//! than mixed into the new output.

use crate::interpreter::events::{BoundaryEvent, Subscription};
use crate::interpreter::{Interpreter, RunId};
use crate::output::OutputLog;

/// Boundary lifecycle change observed while pumping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Ready,
    Failed(String),
}

/// What one pump delivered
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pump {
    /// Lines appended to the log (including ones only counted past the cap)
    pub appended: usize,
    /// Lines of older runs that were dropped
    pub discarded: usize,
    pub lifecycle: Vec<Lifecycle>,
}

impl Pump {
    pub fn is_empty(&self) -> bool {
        self.appended == 0 && self.discarded == 0 && self.lifecycle.is_empty()
    }
}

#[derive(Debug)]
pub struct ExecutionBridge {
    subscription: Subscription,
    next_run: u64,
    latest: Option<RunId>,
}

impl ExecutionBridge {
    pub fn new(subscription: Subscription) -> Self {
        ExecutionBridge {
            subscription,
            next_run: 1,
            latest: None,
        }
    }

    /// The run whose output is currently routed to the log
    pub fn latest_run(&self) -> Option<RunId> {
        self.latest
    }

    /// Start a run of `source`. The caller clears the log beforehand.
    pub fn issue(&mut self, interpreter: &mut dyn Interpreter, source: &str) -> RunId {
        let run = RunId(self.next_run);
        self.next_run += 1;
        self.latest = Some(run);

        tracing::info!(%run, bytes = source.len(), "run issued");
        interpreter.run(run, source);
        run
    }

    /// Deliver every pending event without blocking
    pub fn pump(&mut self, log: &mut OutputLog) -> Pump {
        let mut pump = Pump::default();

        while let Some(event) = self.subscription.try_next() {
            match event {
                BoundaryEvent::Ready => pump.lifecycle.push(Lifecycle::Ready),
                BoundaryEvent::InitFailed(reason) => pump.lifecycle.push(Lifecycle::Failed(reason)),
                BoundaryEvent::Line { run, stream, text } => {
                    if Some(run) == self.latest {
                        log.append(stream, text);
                        pump.appended += 1;
                    } else {
                        tracing::debug!(%run, latest = ?self.latest, ?stream, "discarding stale output");
                        pump.discarded += 1;
                    }
                }
            }
        }

        pump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::events::{channel, Emitter};
    use crate::interpreter::{InterpreterError, Stream};

    #[derive(Default)]
    struct Recorder {
        runs: Vec<(RunId, String)>,
    }

    impl Interpreter for Recorder {
        fn initialize(&mut self, _emitter: Emitter) {}

        fn run(&mut self, run: RunId, source: &str) {
            self.runs.push((run, source.to_string()));
        }

        fn check_parse_error(&mut self, _source: &str) -> Result<bool, InterpreterError> {
            Ok(false)
        }
    }

    #[test]
    fn test_run_ids_increase() {
        let (_emitter, subscription) = channel();
        let mut bridge = ExecutionBridge::new(subscription);
        let mut recorder = Recorder::default();

        let first = bridge.issue(&mut recorder, "a");
        let second = bridge.issue(&mut recorder, "b");
        assert!(second > first);
        assert_eq!(bridge.latest_run(), Some(second));
        assert_eq!(recorder.runs, vec![(first, "a".to_string()), (second, "b".to_string())]);
    }

    #[test]
    fn test_stdout_order_survives_interleaved_stderr() {
        let (emitter, subscription) = channel();
        let mut bridge = ExecutionBridge::new(subscription);
        let run = bridge.issue(&mut Recorder::default(), "");

        emitter.stdout(run, "a");
        emitter.stderr(run, "x");
        emitter.stdout(run, "b");
        emitter.stderr(run, "y");
        emitter.stdout(run, "c");

        let mut log = OutputLog::default();
        let pump = bridge.pump(&mut log);
        assert_eq!(pump.appended, 5);
        assert_eq!(log.stdout(), ["a", "b", "c"]);
        assert_eq!(log.stderr(), ["x", "y"]);
    }

    #[test]
    fn test_stale_run_output_is_discarded() {
        let (emitter, subscription) = channel();
        let mut bridge = ExecutionBridge::new(subscription);
        let mut recorder = Recorder::default();
        let mut log = OutputLog::default();

        let first = bridge.issue(&mut recorder, "slow");
        let second = bridge.issue(&mut recorder, "fast");
        emitter.stdout(first, "old");
        emitter.stdout(second, "new");
        emitter.line(first, Stream::Stderr, "old error");

        let pump = bridge.pump(&mut log);
        assert_eq!(pump.discarded, 2);
        assert_eq!(log.stdout(), ["new"]);
        assert!(log.stderr().is_empty());
    }

    #[test]
    fn test_lifecycle_events() {
        let (emitter, subscription) = channel();
        let mut bridge = ExecutionBridge::new(subscription);
        emitter.init_failed("no interpreter");

        let pump = bridge.pump(&mut OutputLog::default());
        assert_eq!(pump.lifecycle, vec![Lifecycle::Failed("no interpreter".to_string())]);
        assert!(bridge.pump(&mut OutputLog::default()).is_empty());
    }

    #[test]
    fn test_lines_before_any_run_are_dropped() {
        let (emitter, subscription) = channel();
        let mut bridge = ExecutionBridge::new(subscription);
        emitter.stdout(RunId(1), "early");

        let mut log = OutputLog::default();
        assert_eq!(bridge.pump(&mut log).discarded, 1);
        assert!(log.is_empty());
    }
}
