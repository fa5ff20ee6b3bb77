use std::fmt;
use std::io::BufRead;

use super::{CharSource, Input, InputError, InputResult, Position, ReaderSource, StrSource};
use crate::config::StreamConfig;

/// A buffered, bidirectional code-point stream.
///
/// Every code point pulled from the source stays in the look-ahead buffer
/// until [`collect`](Input::collect) hands it out, which is what lets parsers
/// retreat over anything they consumed. Memory is therefore bounded by the
/// uncollected span, not by the length of the input: a caller that never
/// collects keeps the whole input buffered for the life of the stream.
pub struct Stream<S> {
    name: String,
    source: S,
    source_done: bool,
    buffer: Vec<char>,
    /// Index of `buffer[0]`; nothing before it can be retreated into.
    start: usize,
    /// Code points consumed so far.
    cursor: usize,
    position: Position,
}

impl Stream<StrSource> {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<R: BufRead> Stream<ReaderSource<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Stream<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &StreamConfig::default())
    }

    #[tracing::instrument(level = "debug", skip(source, config), fields(name = %config.name))]
    pub fn with_config(source: S, config: &StreamConfig) -> Self {
        let capacity = match source.remaining_hint() {
            Some(n) if config.size_to_input => n,
            _ => config.buffer_capacity,
        };
        tracing::debug!(capacity, "creating stream");
        Self {
            name: config.name.clone(),
            source,
            source_done: false,
            buffer: Vec::with_capacity(capacity),
            start: 0,
            cursor: 0,
            position: Position::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full line/column tracker at the cursor.
    pub fn tracker(&self) -> &Position {
        &self.position
    }

    /// Code points currently held in the look-ahead buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn read_upstream(&mut self) -> InputResult<char> {
        if self.source_done {
            return Err(InputError::EndOfInput);
        }
        match self.source.next_char()? {
            Some(c) => {
                self.buffer.push(c);
                Ok(c)
            }
            None => {
                self.source_done = true;
                Err(InputError::EndOfInput)
            }
        }
    }
}

impl<S: CharSource> Input for Stream<S> {
    fn advance(&mut self) -> InputResult<char> {
        let c = match self.buffer.get(self.cursor - self.start) {
            Some(c) => *c,
            // A failed read leaves the cursor where it was.
            None => self.read_upstream()?,
        };
        self.cursor += 1;
        self.position.advance(c);
        Ok(c)
    }

    fn retreat(&mut self) -> InputResult<char> {
        if self.cursor <= self.start {
            return Err(InputError::StartOfFile);
        }
        self.cursor -= 1;
        let c = self.buffer[self.cursor - self.start];
        self.position.retreat(c);
        Ok(c)
    }

    fn collect(&mut self) -> String {
        let consumed = self.cursor - self.start;
        let text: String = self.buffer.drain(..consumed).collect();
        self.start = self.cursor;
        self.position.forget_before(self.cursor as i64);
        tracing::trace!(
            name = %self.name,
            collected = consumed,
            buffered = self.buffer.len(),
            "collected"
        );
        text
    }

    fn index(&self) -> i64 {
        self.cursor as i64
    }

    fn position(&self) -> (usize, usize) {
        (self.position.line, self.position.column)
    }
}

impl<S> fmt::Debug for Stream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("cursor", &self.cursor)
            .field("buffered", &self.buffer.len())
            .field("position", &self.position)
            .finish()
    }
}

impl<S> fmt::Display for Stream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: String = self.buffer.iter().collect();
        write!(
            f,
            "{}: Start of Token Position: {}, Current Position: {}, Forward Buffer Size: {}, Current Buffer: '{}'",
            self.name,
            self.start,
            self.cursor,
            self.buffer.len(),
            pending
        )
    }
}
