//! # Input
//!
//! The character side of the toolkit: a [`Stream`] pulls code points from a
//! [`CharSource`] into a look-ahead buffer, and a [`Position`] follows the
//! cursor so every location can be reported as a line and column.
//!
//! Combinators never talk to a [`Stream`] directly. They are written against
//! the [`Input`] capability set, which is all a backtracking parser needs:
//! move forward, move back, look ahead, and hand over the consumed span.

pub mod position;
pub mod source;
pub mod stream;

use thiserror::Error;

pub use position::Position;
pub use source::{CharSource, IterSource, ReaderSource, StrSource};
pub use stream::Stream;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("end of input")]
    EndOfInput,
    #[error("start of file")]
    StartOfFile,
    #[error("invalid UTF-8 at byte {index}")]
    InvalidUtf8 { index: u64 },
    #[error("read error: {0}")]
    Io(String),
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io(e.to_string())
    }
}

pub type InputResult<T> = Result<T, InputError>;

/// The stream capability set consumed by every parser.
#[cfg_attr(test, mockall::automock)]
pub trait Input {
    /// Consumes one code point and returns it.
    fn advance(&mut self) -> InputResult<char>;

    /// Un-consumes one code point and returns it, so that the next
    /// [`advance`](Input::advance) yields the same code point again.
    fn retreat(&mut self) -> InputResult<char>;

    /// Returns the next code point without consuming it.
    fn peek(&mut self) -> InputResult<char> {
        let c = self.advance()?;
        self.retreat()?;
        Ok(c)
    }

    /// Looks `n` code points ahead. When the input runs out first, the text
    /// seen so far is returned together with the error that stopped it.
    fn peek_n(&mut self, n: usize) -> (String, Option<InputError>) {
        let mut text = String::with_capacity(n);
        let mut error = None;
        for _ in 0..n {
            match self.advance() {
                Ok(c) => text.push(c),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }
        let advanced = text.chars().count();
        if let Err(e) = rewind(self, advanced) {
            error.get_or_insert(e);
        }
        (text, error)
    }

    /// Returns the code points consumed since the previous collect and
    /// releases them from the look-ahead buffer.
    fn collect(&mut self) -> String;

    /// Number of code points consumed so far.
    fn index(&self) -> i64;

    /// Current `(line, column)`.
    fn position(&self) -> (usize, usize);
}

/// Retreats `times` code points.
///
/// Every failing parser uses this to put the cursor back where it was on
/// entry, with `times = index_now - index_at_entry`.
pub fn rewind<I: Input + ?Sized>(input: &mut I, times: usize) -> InputResult<()> {
    for _ in 0..times {
        input.retreat()?;
    }
    Ok(())
}

/// Rewinds `input` back to the absolute index `to`.
pub fn rewind_to<I: Input + ?Sized>(input: &mut I, to: i64) -> InputResult<()> {
    let delta = input.index() - to;
    if delta > 0 {
        rewind(input, delta as usize)?;
    }
    Ok(())
}
