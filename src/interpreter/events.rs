//! Typed event bus between an interpreter boundary and the session
//!
//! [`channel`] creates one producer half ([`Emitter`]), handed to the
//! interpreter at initialization and cloned into whatever threads it uses,
//! and one consumer half ([`Subscription`]) owned by the execution bridge.
//! Events of one stream arrive in the order they were emitted. Dropping the
//! subscription unsubscribes: later emits are discarded.

use super::{RunId, Stream};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Notifications an interpreter boundary may send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryEvent {
    /// Initialization finished; `run` and `check_parse_error` are usable
    Ready,
    /// Initialization failed for good
    InitFailed(String),
    /// One line of output produced by a run
    Line {
        run: RunId,
        stream: Stream,
        text: String,
    },
}

/// Producer half of the bus
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: Sender<BoundaryEvent>,
}

impl Emitter {
    /// Send an event. Returns `false` once nobody is subscribed anymore.
    pub fn emit(&self, event: BoundaryEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn ready(&self) -> bool {
        self.emit(BoundaryEvent::Ready)
    }

    pub fn init_failed(&self, reason: impl Into<String>) -> bool {
        self.emit(BoundaryEvent::InitFailed(reason.into()))
    }

    pub fn line(&self, run: RunId, stream: Stream, text: impl Into<String>) -> bool {
        self.emit(BoundaryEvent::Line {
            run,
            stream,
            text: text.into(),
        })
    }

    pub fn stdout(&self, run: RunId, text: impl Into<String>) -> bool {
        self.line(run, Stream::Stdout, text)
    }

    pub fn stderr(&self, run: RunId, text: impl Into<String>) -> bool {
        self.line(run, Stream::Stderr, text)
    }
}

/// Consumer half of the bus
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<BoundaryEvent>,
}

impl Subscription {
    /// Next pending event, without blocking
    pub fn try_next(&self) -> Option<BoundaryEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

pub fn channel() -> (Emitter, Subscription) {
    let (tx, rx) = mpsc::channel();
    (Emitter { tx }, Subscription { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let (emitter, subscription) = channel();
        let run = RunId(1);
        emitter.stdout(run, "a");
        emitter.stderr(run, "x");
        emitter.stdout(run, "b");

        let texts: Vec<String> = std::iter::from_fn(|| subscription.try_next())
            .filter_map(|event| match event {
                BoundaryEvent::Line { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["a", "x", "b"]);
        assert!(subscription.try_next().is_none());
    }

    #[test]
    fn test_emit_after_unsubscribe() {
        let (emitter, subscription) = channel();
        assert!(emitter.ready());
        drop(subscription);
        assert!(!emitter.stdout(RunId(1), "lost"));
    }

    #[test]
    fn test_emitter_crosses_threads() {
        let (emitter, subscription) = channel();
        let worker = emitter.clone();
        std::thread::spawn(move || {
            worker.stdout(RunId(3), "from thread");
        })
        .join()
        .unwrap();

        assert_eq!(
            subscription.try_next(),
            Some(BoundaryEvent::Line {
                run: RunId(3),
                stream: Stream::Stdout,
                text: "from thread".to_string(),
            })
        );
    }
}
