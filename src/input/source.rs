//! Upstream code-point sources for a [`Stream`](super::Stream).

use std::io::BufRead;

use super::{InputError, InputResult};

/// Anything that can hand out code points one at a time.
pub trait CharSource {
    /// Reads the next code point, `Ok(None)` once the source is exhausted.
    fn next_char(&mut self) -> InputResult<Option<char>>;

    /// Number of code points still to come, when known up front.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}

/// In-memory text.
#[derive(Debug, Clone)]
pub struct StrSource {
    text: String,
    offset: usize,
    remaining: usize,
}

impl StrSource {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let remaining = text.chars().count();
        Self {
            text,
            offset: 0,
            remaining,
        }
    }
}

impl CharSource for StrSource {
    fn next_char(&mut self) -> InputResult<Option<char>> {
        let next = self.text[self.offset..].chars().next();
        if let Some(c) = next {
            self.offset += c.len_utf8();
            self.remaining -= 1;
        }
        Ok(next)
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

/// Any iterator of `char`s.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    fn next_char(&mut self) -> InputResult<Option<char>> {
        Ok(self.iter.next())
    }

    fn remaining_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Incremental UTF-8 decoding over a buffered reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    bytes_read: u64,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    /// An invalid sequence is reported once and skipped: the lead byte is
    /// always consumed, a byte that is not a continuation byte is left for
    /// the next call.
    fn next_char(&mut self) -> InputResult<Option<char>> {
        let start = self.bytes_read;
        let lead = match self.reader.fill_buf()?.first() {
            Some(b) => *b,
            None => return Ok(None),
        };
        self.reader.consume(1);
        self.bytes_read += 1;

        let invalid = InputError::InvalidUtf8 { index: start };
        let Some(width) = utf8_width(lead) else {
            return Err(invalid);
        };

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.reader.fill_buf()?.first() {
                Some(b) if b & 0xC0 == 0x80 => *slot = *b,
                _ => return Err(invalid),
            }
            self.reader.consume(1);
            self.bytes_read += 1;
        }

        std::str::from_utf8(&bytes[..width])
            .map(|s| s.chars().next())
            .map_err(|_| invalid)
    }
}
