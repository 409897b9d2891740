//! Interpreter boundary backed by an external program
//!
//! Each run spawns the configured program with the source on stdin. Two
//! reader threads forward its stdout and stderr line by line onto the event
//! bus, tagged with the run id, so each stream keeps its own order. Syntax
//! checks run the program with `check_args` and treat a non-zero exit status
//! as a parse error. A check that outlives its timeout is killed.

use super::events::Emitter;
use super::{Interpreter, InterpreterError, RunId, Stream};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running syntax check is polled for exit
const CHECK_POLL: Duration = Duration::from_millis(5);

/// How to invoke the interpreter program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    pub program: String,
    pub run_args: Vec<String>,
    /// Arguments for a syntax-only check; `None` disables checks
    pub check_args: Option<Vec<String>>,
    /// Longest a syntax check may take before it is killed
    pub check_timeout: Duration,
}

pub struct ProcessInterpreter {
    config: ProcessConfig,
    resolved: Arc<OnceLock<PathBuf>>,
    emitter: Option<Emitter>,
}

impl ProcessInterpreter {
    pub fn new(config: ProcessConfig) -> Self {
        ProcessInterpreter {
            config,
            resolved: Arc::new(OnceLock::new()),
            emitter: None,
        }
    }

    fn spawn_run(
        &self,
        program: &Path,
        run: RunId,
        source: &str,
        emitter: &Emitter,
    ) -> Result<(), InterpreterError> {
        let mut child = Command::new(program)
            .args(&self.config.run_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InterpreterError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let source = source.to_string();
            thread::spawn(move || {
                if let Err(e) = stdin.write_all(source.as_bytes()) {
                    if e.kind() != ErrorKind::BrokenPipe {
                        tracing::warn!(%run, error = %e, "could not write source to interpreter");
                    }
                }
            });
        }
        if let Some(stdout) = child.stdout.take() {
            let emitter = emitter.clone();
            thread::spawn(move || forward_lines(stdout, run, Stream::Stdout, &emitter));
        }
        if let Some(stderr) = child.stderr.take() {
            let emitter = emitter.clone();
            thread::spawn(move || forward_lines(stderr, run, Stream::Stderr, &emitter));
        }

        thread::spawn(move || match child.wait() {
            Ok(status) => tracing::debug!(%run, %status, "interpreter exited"),
            Err(e) => tracing::warn!(%run, error = %e, "could not wait for interpreter"),
        });

        Ok(())
    }
}

/// Forward `reader` to the bus one line at a time, without the line ending.
/// Stops at end of stream or once nobody listens.
fn forward_lines(reader: impl Read, run: RunId, stream: Stream, emitter: &Emitter) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                    buf.pop();
                }
                let text = String::from_utf8_lossy(&buf).into_owned();
                if !emitter.line(run, stream, text) {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(%run, ?stream, error = %e, "interpreter output read failed");
                break;
            }
        }
    }
}

impl Interpreter for ProcessInterpreter {
    fn initialize(&mut self, emitter: Emitter) {
        self.emitter = Some(emitter.clone());
        let program = self.config.program.clone();
        let resolved = Arc::clone(&self.resolved);

        thread::spawn(move || match which::which(&program) {
            Ok(path) => {
                tracing::info!(program = %path.display(), "interpreter found");
                let _ = resolved.set(path);
                emitter.ready();
            }
            Err(e) => {
                let error = InterpreterError::ProgramNotFound {
                    program,
                    reason: e.to_string(),
                };
                emitter.init_failed(error.to_string());
            }
        });
    }

    fn run(&mut self, run: RunId, source: &str) {
        let Some(emitter) = self.emitter.clone() else {
            tracing::warn!(%run, "run issued before initialize");
            return;
        };
        let Some(program) = self.resolved.get().cloned() else {
            emitter.stderr(run, InterpreterError::NotInitialized.to_string());
            return;
        };

        tracing::debug!(%run, program = %program.display(), "spawning interpreter");
        if let Err(e) = self.spawn_run(&program, run, source, &emitter) {
            emitter.stderr(run, e.to_string());
        }
    }

    fn check_parse_error(&mut self, source: &str) -> Result<bool, InterpreterError> {
        let Some(args) = &self.config.check_args else {
            return Err(InterpreterError::CheckUnsupported);
        };
        let program = self.resolved.get().ok_or(InterpreterError::NotInitialized)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| InterpreterError::Spawn {
                program: program.clone(),
                source,
            })?;

        // The checker may stop reading before it has all of stdin
        if let Some(mut stdin) = child.stdin.take() {
            let source = source.to_string();
            thread::spawn(move || {
                if let Err(e) = stdin.write_all(source.as_bytes()) {
                    if e.kind() != ErrorKind::BrokenPipe {
                        tracing::warn!(error = %e, "could not write source to syntax check");
                    }
                }
            });
        }

        let deadline = Instant::now() + self.config.check_timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(!status.success());
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(timeout = ?self.config.check_timeout, "syntax check killed");
                return Err(InterpreterError::CheckTimedOut(self.config.check_timeout));
            }
            thread::sleep(CHECK_POLL);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::interpreter::events::{channel, BoundaryEvent, Subscription};
    use std::time::{Duration, Instant};

    fn shell(run: &str, check: Option<&str>) -> ProcessInterpreter {
        ProcessInterpreter::new(ProcessConfig {
            program: "sh".to_string(),
            run_args: vec!["-c".to_string(), run.to_string()],
            check_args: check.map(|c| vec!["-c".to_string(), c.to_string()]),
            check_timeout: Duration::from_secs(5),
        })
    }

    fn wait_for(subscription: &Subscription, count: usize) -> Vec<BoundaryEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while events.len() < count && Instant::now() < deadline {
            match subscription.try_next() {
                Some(event) => events.push(event),
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        events
    }

    #[test]
    fn test_missing_program_fails_init() {
        let mut interpreter = ProcessInterpreter::new(ProcessConfig {
            program: "definitely-not-a-real-interpreter-xyz".to_string(),
            run_args: Vec::new(),
            check_args: None,
            check_timeout: Duration::from_secs(5),
        });
        let (emitter, subscription) = channel();
        interpreter.initialize(emitter);

        let events = wait_for(&subscription, 1);
        assert!(matches!(events.as_slice(), [BoundaryEvent::InitFailed(_)]));
    }

    #[test]
    fn test_run_streams_lines_with_run_id() {
        let mut interpreter = shell("cat; echo oops >&2", None);
        let (emitter, subscription) = channel();
        interpreter.initialize(emitter);
        assert_eq!(wait_for(&subscription, 1), vec![BoundaryEvent::Ready]);

        interpreter.run(RunId(7), "one\ntwo\n");
        let events = wait_for(&subscription, 3);

        let stdout: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BoundaryEvent::Line {
                    run: RunId(7),
                    stream: Stream::Stdout,
                    text,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(stdout, vec!["one", "two"]);
        assert!(events.contains(&BoundaryEvent::Line {
            run: RunId(7),
            stream: Stream::Stderr,
            text: "oops".to_string(),
        }));
    }

    #[test]
    fn test_check_uses_exit_status() {
        let mut interpreter = shell("cat", Some("! grep -q oops"));
        let (emitter, subscription) = channel();
        interpreter.initialize(emitter);
        wait_for(&subscription, 1);

        assert!(!interpreter.check_parse_error("print(1);").unwrap());
        assert!(interpreter.check_parse_error("oops(").unwrap());
        assert!(subscription.try_next().is_none());
    }

    #[test]
    fn test_check_without_args_is_unsupported() {
        let mut interpreter = shell("cat", None);
        assert!(matches!(
            interpreter.check_parse_error("x"),
            Err(InterpreterError::CheckUnsupported)
        ));
    }

    #[test]
    fn test_check_is_killed_after_timeout() {
        let mut interpreter = shell("cat", Some("sleep 5"));
        interpreter.config.check_timeout = Duration::from_millis(200);
        let (emitter, subscription) = channel();
        interpreter.initialize(emitter);
        wait_for(&subscription, 1);

        let started = Instant::now();
        let result = interpreter.check_parse_error("print(1);");
        assert!(matches!(result, Err(InterpreterError::CheckTimedOut(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
