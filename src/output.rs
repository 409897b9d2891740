//! Captured run output
//!
//! [`OutputLog`] keeps stdout and stderr lines in arrival order. Lines are only
//! ever appended, and the whole log is cleared before each run. Each stream is
//! capped; lines past the cap are counted instead of stored.

use crate::interpreter::Stream;

pub const DEFAULT_MAX_LINES: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StreamLog {
    lines: Vec<String>,
    overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLog {
    stdout: StreamLog,
    stderr: StreamLog,
    max_lines: usize,
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl OutputLog {
    pub fn new(max_lines: usize) -> Self {
        OutputLog {
            stdout: StreamLog::default(),
            stderr: StreamLog::default(),
            max_lines,
        }
    }

    fn stream(&self, stream: Stream) -> &StreamLog {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }

    /// Append a line. Returns `false` when the stream is full and the line was
    /// only counted.
    pub fn append(&mut self, stream: Stream, line: String) -> bool {
        let max_lines = self.max_lines;
        let log = match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        };
        if log.lines.len() >= max_lines {
            log.overflow += 1;
            return false;
        }
        log.lines.push(line);
        true
    }

    pub fn clear(&mut self) {
        self.stdout = StreamLog::default();
        self.stderr = StreamLog::default();
    }

    pub fn lines(&self, stream: Stream) -> &[String] {
        &self.stream(stream).lines
    }

    pub fn stdout(&self) -> &[String] {
        self.lines(Stream::Stdout)
    }

    pub fn stderr(&self) -> &[String] {
        self.lines(Stream::Stderr)
    }

    /// Lines dropped from `stream` because of the cap
    pub fn overflow(&self, stream: Stream) -> usize {
        self.stream(stream).overflow
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.lines.is_empty()
            && self.stderr.lines.is_empty()
            && self.stdout.overflow == 0
            && self.stderr.overflow == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_are_independent_and_ordered() {
        let mut log = OutputLog::default();
        log.append(Stream::Stdout, "a".into());
        log.append(Stream::Stderr, "e".into());
        log.append(Stream::Stdout, "b".into());
        log.append(Stream::Stdout, "b".into());

        assert_eq!(log.stdout(), ["a", "b", "b"]);
        assert_eq!(log.stderr(), ["e"]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut log = OutputLog::new(1);
        log.append(Stream::Stdout, "a".into());
        log.append(Stream::Stdout, "b".into());
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.overflow(Stream::Stdout), 0);
    }

    #[test]
    fn test_cap_keeps_first_lines() {
        let mut log = OutputLog::new(2);
        assert!(log.append(Stream::Stderr, "1".into()));
        assert!(log.append(Stream::Stderr, "2".into()));
        assert!(!log.append(Stream::Stderr, "3".into()));
        assert!(!log.append(Stream::Stderr, "4".into()));

        assert_eq!(log.stderr(), ["1", "2"]);
        assert_eq!(log.overflow(Stream::Stderr), 2);
        assert_eq!(log.overflow(Stream::Stdout), 0);
    }
}
