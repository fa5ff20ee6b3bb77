//! # Scanner
//!
//! Drives one root parser over one input, turning each match into a
//! [`Token`]. Grammars with several token shapes use an `any(...)` root.

pub mod scanner;
pub mod token;

pub use scanner::{ScanError, Scanner, ScannerState};
pub use token::{Span, Token};
