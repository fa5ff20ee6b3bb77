use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::item::Item;
use crate::input::{rewind_to, Input, InputError};

/// A parser: reads from an [`Input`] and reports a [`ParseResult`].
///
/// On success the cursor has moved past what was matched. On failure the
/// cursor must be back where it was when `parse` was called; every parser in
/// this crate restores it before returning, and custom parsers are expected
/// to do the same.
pub trait Parser {
    fn parse(&self, input: &mut dyn Input) -> ParseResult;
}

/// Shared, immutable parser handle. Grammars are trees of these.
pub type BoxedParser = Arc<dyn Parser + Send + Sync>;

/// Adapts a closure into a [`Parser`].
pub struct FnParser<F> {
    f: F,
}

impl<F> FnParser<F>
where
    F: Fn(&mut dyn Input) -> ParseResult,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Parser for FnParser<F>
where
    F: Fn(&mut dyn Input) -> ParseResult,
{
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        (self.f)(input)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{parser}: expected {expected}, found {}", describe_found(.found))]
    Mismatch {
        parser: String,
        expected: String,
        found: Option<char>,
    },
    #[error("{parser}: failed to combine results")]
    CombineFailed { parser: String },
    #[error("{parser}: no alternative matched")]
    NoAlternative { parser: String },
    #[error("Fail: {0}")]
    Fail(String),
    #[error("{message}: {inner}")]
    WithContext {
        message: String,
        inner: Box<ParseError>,
    },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "nothing".to_string(),
    }
}

impl ParseError {
    pub fn mismatch(parser: &str, expected: impl Into<String>, found: Option<char>) -> Self {
        ParseError::Mismatch {
            parser: parser.to_string(),
            expected: expected.into(),
            found,
        }
    }

    /// Innermost error, looking through context wrappers.
    pub fn root(&self) -> &ParseError {
        match self {
            ParseError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self.root(), ParseError::Input(InputError::EndOfInput))
    }

    /// Errors from the source itself, which no alternative can recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root(),
            ParseError::Input(InputError::Io(_) | InputError::InvalidUtf8 { .. })
        )
    }
}

/// The outcome of one parse attempt.
///
/// A failure never carries an item. A success may still carry an error
/// describing a non-fatal condition, such as reaching the end of input right
/// at the end of the match.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    name: String,
    success: bool,
    item: Option<Item>,
    error: Option<ParseError>,
}

impl ParseResult {
    pub fn success(name: impl Into<String>, item: Item, error: Option<ParseError>) -> Self {
        Self {
            name: name.into(),
            success: true,
            item: Some(item),
            error,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<ParseError>) -> Self {
        Self {
            name: name.into(),
            success: false,
            item: None,
            error: Some(error.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn is_end_of_input(&self) -> bool {
        self.error.as_ref().is_some_and(ParseError::is_end_of_input)
    }

    pub fn into_item(self) -> Option<Item> {
        self.item
    }

    pub fn into_error(self) -> Option<ParseError> {
        self.error
    }

    pub fn into_result(self) -> Result<Item, ParseError> {
        match (self.success, self.item, self.error) {
            (true, Some(item), _) => Ok(item),
            (_, _, Some(error)) => Err(error),
            (_, _, None) => Err(ParseError::Fail(self.name)),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub(crate) fn map_item(mut self, f: impl FnOnce(Item) -> Item) -> Self {
        self.item = self.item.map(f);
        self
    }

    pub(crate) fn map_error(mut self, f: impl FnOnce(ParseError) -> ParseError) -> Self {
        self.error = self.error.map(f);
        self
    }

    /// Same parser name and same item, ignoring errors.
    pub fn same_match(&self, other: &ParseResult) -> bool {
        self.name == other.name && self.item == other.item
    }
}

fn truncate(value: String) -> String {
    if value.chars().count() > 13 {
        let head: String = value.chars().take(10).collect();
        format!("{}...", head)
    } else {
        value
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            return match &self.error {
                Some(e) => write!(f, "✗ ({}) err: {}", self.name, e),
                None => write!(f, "✗ ({})", self.name),
            };
        }
        let value = self.item.as_ref().map(Item::to_string).unwrap_or_default();
        write!(f, "✓ ({}) {}", self.name, truncate(value))?;
        if let Some(e) = &self.error {
            write!(f, "\n✓ ({}) err: {}", self.name, e)?;
        }
        Ok(())
    }
}

/// Puts the cursor back at `to`.
pub(crate) fn backtrack(input: &mut dyn Input, to: i64) {
    if let Err(e) = rewind_to(input, to) {
        tracing::warn!(error = %e, to, "backtracking stopped early");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Stream;

    #[test]
    fn test_success_and_failure_invariants() {
        let ok = ParseResult::success("rune 'a'", Item::Rune('a'), None);
        assert!(ok.is_success());
        assert_eq!(ok.item(), Some(&Item::Rune('a')));
        assert_eq!(ok.error(), None);

        let failed = ParseResult::failure("rune 'a'", InputError::EndOfInput);
        assert!(!failed.is_success());
        assert_eq!(failed.item(), None);
        assert!(failed.is_end_of_input());
    }

    #[test]
    fn test_into_result() {
        let ok = ParseResult::success("x", Item::from("abc"), Some(InputError::EndOfInput.into()));
        assert_eq!(ok.into_result(), Ok(Item::from("abc")));

        let failed = ParseResult::failure("x", ParseError::Fail("nope".to_string()));
        assert_eq!(
            failed.into_result(),
            Err(ParseError::Fail("nope".to_string()))
        );
    }

    #[test]
    fn test_error_classification() {
        let wrapped = ParseError::WithContext {
            message: "in tag".to_string(),
            inner: Box::new(InputError::EndOfInput.into()),
        };
        assert!(wrapped.is_end_of_input());
        assert!(!wrapped.is_fatal());
        assert!(ParseError::from(InputError::Io("broken pipe".to_string())).is_fatal());
        assert!(!ParseError::mismatch("rune 'a'", "'a'", Some('b')).is_end_of_input());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::mismatch("rune 'A'", "'A'", Some('B')).to_string(),
            "rune 'A': expected 'A', found 'B'"
        );
        assert_eq!(
            ParseError::mismatch("rune 'A'", "'A'", None).to_string(),
            "rune 'A': expected 'A', found nothing"
        );
        assert_eq!(
            ParseError::CombineFailed {
                parser: "all".to_string()
            }
            .to_string(),
            "all: failed to combine results"
        );
        assert_eq!(
            ParseError::from(InputError::EndOfInput).to_string(),
            "end of input"
        );
    }

    #[test]
    fn test_display() {
        let short = ParseResult::success("string", Item::from("abc"), None);
        assert_eq!(short.to_string(), "✓ (string) abc");

        let long = ParseResult::success("string", Item::from("abcdefghijklmnop"), None);
        assert_eq!(long.to_string(), "✓ (string) abcdefghij...");

        let with_warning =
            ParseResult::success("many", Item::from("1"), Some(InputError::EndOfInput.into()));
        assert_eq!(
            with_warning.to_string(),
            "✓ (many) 1\n✓ (many) err: end of input"
        );

        let failed = ParseResult::failure("any", ParseError::NoAlternative {
            parser: "any".to_string(),
        });
        assert_eq!(failed.to_string(), "✗ (any) err: any: no alternative matched");
    }

    #[test]
    fn test_same_match_ignores_errors() {
        let a = ParseResult::success("x", Item::Rune('a'), None);
        let b = ParseResult::success("x", Item::Rune('a'), Some(InputError::EndOfInput.into()));
        assert!(a.same_match(&b));
        assert!(!a.same_match(&ParseResult::success("y", Item::Rune('a'), None)));
    }

    #[test]
    fn test_fn_parser() {
        let parser = FnParser::new(|input: &mut dyn Input| match input.advance() {
            Ok(c) => ParseResult::success("custom", Item::Rune(c), None),
            Err(e) => ParseResult::failure("custom", e),
        });
        let mut stream = Stream::from_text("q");
        assert_eq!(parser.parse(&mut stream).into_item(), Some(Item::Rune('q')));
        assert!(parser.parse(&mut stream).is_end_of_input());
    }
}
