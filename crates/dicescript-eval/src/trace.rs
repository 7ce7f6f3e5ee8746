//! Trace sinks: where evaluation steps are reported.

use std::collections::VecDeque;

/// Number of lines a [`TraceLog`] keeps before dropping the oldest.
pub const LOG_HISTORY_LENGTH: usize = 100;

/// The line a cleared [`TraceLog`] starts over with.
pub const LOG_CLEARED: &str = "~~ log cleared ~~";

/// Receives the trace of an evaluation.
///
/// `emit` is called once per logical step (a die roll, an arithmetic
/// operation, an advantage trial) with that step's lines in order.
pub trait TraceSink {
    fn emit(&mut self, lines: &[String]);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn emit(&mut self, lines: &[String]) {
        (**self).emit(lines)
    }
}

/// Flattens every batch into one list of lines.
impl TraceSink for Vec<String> {
    fn emit(&mut self, lines: &[String]) {
        self.extend_from_slice(lines);
    }
}

/// Keeps each batch separate.
impl TraceSink for Vec<Vec<String>> {
    fn emit(&mut self, lines: &[String]) {
        self.push(lines.to_vec());
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn emit(&mut self, _lines: &[String]) {}
}

/// A bounded scroll-back log.
///
/// Each line counts once against the history length; the oldest lines
/// are dropped first.
#[derive(Debug, Clone)]
pub struct TraceLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl TraceLog {
    /// Create an empty log holding [`LOG_HISTORY_LENGTH`] lines.
    pub fn new() -> Self {
        Self::with_capacity(LOG_HISTORY_LENGTH)
    }

    /// Create an empty log holding at most `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(LOG_HISTORY_LENGTH)),
            capacity,
        }
    }

    /// Append lines, trimming history from the front.
    pub fn push_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Drop all history, leaving a single marker line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.push_lines([LOG_CLEARED]);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The log as newline-joined text.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, lines: &[String]) {
        self.push_lines(lines.iter().cloned());
    }
}
