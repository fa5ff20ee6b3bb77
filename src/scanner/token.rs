use std::fmt;

use crate::parse::Item;

/// One match of the scanner's root parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub item: Item,
    /// The exact code points the match consumed.
    pub text: String,
    pub span: Span,
}

/// Where a token sits in the input. `start` and `end` are code point
/// offsets; `line` and `column` locate `start`, with the column counting the
/// code points already consumed on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}
