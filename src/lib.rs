//! Parser combinators over a backtracking, line-tracking character stream.
//!
//! - [`input`]: code point sources, the buffered [`Stream`](input::Stream)
//!   and its [`Position`](input::Position) tracker.
//! - [`parse`]: the [`Parser`](parse::Parser) trait, primitives, and
//!   combinators. Grammars are written with [`parse::prelude`].
//! - [`scanner`]: runs a root parser repeatedly to split input into tokens.

pub mod config;
pub mod error;
pub mod input;
pub mod parse;
pub mod scanner;

// Re-exports
pub use error::*;
pub use input::{Input, InputError, Position, Stream};
pub use parse::{BoxedParser, Item, ParseError, ParseResult, Parser};
pub use scanner::{ScanError, Scanner, ScannerState, Span, Token};
