use strum_macros::Display;
use thiserror::Error;

use super::token::{Span, Token};
use crate::input::{Input, InputError};
use crate::parse::{BoxedParser, ParseError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("scanner: unmatched input at Line: {line}, Col: {column} ({parser}): {cause}")]
    Unmatched {
        line: usize,
        column: usize,
        parser: String,
        cause: ParseError,
    },
    #[error("scanner: root parser matched nothing at Line: {line}, Col: {column}")]
    NoProgress { line: usize, column: usize },
    #[error(transparent)]
    Input(#[from] InputError),
}

impl ScanError {
    /// True for the clean end of scanning.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ScanError::Input(InputError::EndOfInput))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScannerState {
    Running,
    Failed,
    Exhausted,
}

/// Pairs one input with one root parser.
///
/// Each call to [`next_token`](Scanner::next_token) runs the root parser once
/// from the cursor. A match is collected from the input and returned as a
/// [`Token`]. Reaching the end of the input moves the scanner to
/// [`ScannerState::Exhausted`]; any other failure moves it to
/// [`ScannerState::Failed`] and leaves the cursor where the failed token
/// would have started. Both states are terminal.
pub struct Scanner<I> {
    input: I,
    root: BoxedParser,
    state: ScannerState,
    failure: Option<ScanError>,
}

fn offset(index: i64) -> usize {
    usize::try_from(index).unwrap_or_default()
}

impl<I: Input> Scanner<I> {
    pub fn new(input: I, root: BoxedParser) -> Self {
        Self {
            input,
            root,
            state: ScannerState::Running,
            failure: None,
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn into_input(self) -> I {
        self.input
    }

    /// Scans one token. Returns `ScanError::Input(InputError::EndOfInput)`
    /// once the input is used up.
    #[tracing::instrument(level = "debug", skip(self), fields(state = %self.state))]
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        match self.state {
            ScannerState::Running => {}
            ScannerState::Exhausted => return Err(InputError::EndOfInput.into()),
            ScannerState::Failed => {
                return Err(self
                    .failure
                    .clone()
                    .unwrap_or(ScanError::Input(InputError::EndOfInput)))
            }
        }

        let start = self.input.index();
        let (line, column) = self.input.position();
        let result = self.root.parse(&mut self.input);

        if !result.is_success() {
            if self.at_end() {
                return self.exhaust();
            }
            let (line, column) = self.input.position();
            let parser = result.name().to_string();
            let error = match result.into_error() {
                Some(ParseError::Input(e @ (InputError::Io(_) | InputError::InvalidUtf8 { .. }))) => {
                    ScanError::Input(e)
                }
                cause => ScanError::Unmatched {
                    line,
                    column,
                    parser: parser.clone(),
                    cause: cause.unwrap_or(ParseError::Fail(parser)),
                },
            };
            return Err(self.fail(error));
        }

        let end = self.input.index();
        if end == start {
            if self.at_end() {
                return self.exhaust();
            }
            return Err(self.fail(ScanError::NoProgress { line, column }));
        }

        let text = self.input.collect();
        let item = result
            .into_item()
            .ok_or_else(|| ParseError::Fail("root parser produced no item".to_string()));
        match item {
            Ok(item) => Ok(Token {
                item,
                text,
                span: Span {
                    start: offset(start),
                    end: offset(end),
                    line,
                    column,
                },
            }),
            Err(cause) => Err(self.fail(ScanError::Unmatched {
                line,
                column,
                parser: "scanner".to_string(),
                cause,
            })),
        }
    }

    /// Scans every remaining token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ScanError> {
        self.by_ref().collect()
    }

    fn at_end(&mut self) -> bool {
        matches!(self.input.peek(), Err(InputError::EndOfInput))
    }

    fn exhaust(&mut self) -> Result<Token, ScanError> {
        tracing::debug!("input exhausted");
        self.state = ScannerState::Exhausted;
        Err(InputError::EndOfInput.into())
    }

    fn fail(&mut self, error: ScanError) -> ScanError {
        tracing::error!("{}", error);
        self.state = ScannerState::Failed;
        self.failure = Some(error.clone());
        error
    }
}

/// Yields tokens until the input is exhausted. A failure is yielded once,
/// after which the iterator ends.
impl<I: Input> Iterator for Scanner<I> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != ScannerState::Running {
            return None;
        }
        match self.next_token() {
            Err(e) if e.is_end_of_input() => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::input::{MockInput, Stream};
    use crate::parse::prelude::*;

    fn word() -> BoxedParser {
        any(vec![
            at_least(concat_to_string(), 1, letter()),
            at_least(concat_to_string(), 1, whitespace()),
        ])
    }

    #[test]
    fn test_scans_tokens_with_spans() {
        let mut scanner = Scanner::new(Stream::from_text("ab cd\nef"), word());
        let tokens = scanner.tokenize().unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", " ", "cd", "\n", "ef"]);
        assert_eq!(
            tokens[4].span,
            Span {
                start: 6,
                end: 8,
                line: 2,
                column: 0
            }
        );
        assert_eq!(tokens[2].item, Item::from("cd"));
        assert_eq!(scanner.state(), ScannerState::Exhausted);
    }

    #[test]
    fn test_end_of_input_is_terminal() {
        let mut scanner = Scanner::new(Stream::from_text("ab"), word());
        assert!(scanner.next_token().is_ok());
        assert!(scanner.next_token().unwrap_err().is_end_of_input());
        assert!(scanner.next_token().unwrap_err().is_end_of_input());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_unmatched_reports_position() {
        let mut scanner = Scanner::new(Stream::from_text("ab\n  42"), word());
        let results: Vec<_> = scanner.by_ref().collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].as_ref().map(|t| t.text.as_str()), Ok("\n  "));
        let error = results[2].clone().unwrap_err();
        assert_eq!(
            error,
            ScanError::Unmatched {
                line: 2,
                column: 2,
                parser: "any".to_string(),
                cause: ParseError::NoAlternative {
                    parser: "any".to_string()
                },
            }
        );
        assert_eq!(
            error.to_string(),
            "scanner: unmatched input at Line: 2, Col: 2 (any): any: no alternative matched"
        );
        assert_eq!(scanner.state(), ScannerState::Failed);
        assert_eq!(scanner.input().index(), 5);
        assert_eq!(scanner.next_token(), Err(error));
    }

    #[test]
    fn test_truncated_token_is_unmatched() {
        let tag = all(concat_to_string(), vec![rune('<'), string_until(rune('>')), rune('>')]);
        let mut scanner = Scanner::new(Stream::from_text("<a><b"), tag);
        assert_eq!(scanner.next_token().map(|t| t.text), Ok("<a>".to_string()));
        let error = scanner.next_token().unwrap_err();
        assert!(matches!(error, ScanError::Unmatched { column: 3, .. }));
    }

    #[test]
    fn test_zero_width_root() {
        let root = optional(concat_to_string(), rune('a'));
        let mut scanner = Scanner::new(Stream::from_text("ab"), root);
        assert_eq!(scanner.next_token().map(|t| t.text), Ok("a".to_string()));
        assert_eq!(
            scanner.next_token(),
            Err(ScanError::NoProgress { line: 1, column: 1 })
        );

        let root = optional(concat_to_string(), rune('a'));
        let mut scanner = Scanner::new(Stream::from_text("a"), root);
        assert_eq!(scanner.tokenize().map(|tokens| tokens.len()), Ok(1));
        assert_eq!(scanner.state(), ScannerState::Exhausted);
    }

    #[test]
    fn test_read_error_surfaces_as_input_error() {
        let mut input = MockInput::new();
        input.expect_index().return_const(0_i64);
        input.expect_position().return_const((1_usize, 0_usize));
        input
            .expect_advance()
            .returning(|| Err(InputError::Io("disk on fire".to_string())));
        input
            .expect_peek()
            .returning(|| Err(InputError::Io("disk on fire".to_string())));
        let mut scanner = Scanner::new(input, any_rune());
        assert_eq!(
            scanner.next_token(),
            Err(ScanError::Input(InputError::Io("disk on fire".to_string())))
        );
        assert_eq!(scanner.state(), ScannerState::Failed);
    }
}
