use std::ops::RangeInclusive;
use std::sync::Arc;

use strum_macros::{Display, EnumIter, EnumString};

use super::core::{backtrack, ParseError, ParseResult, Parser};
use super::item::Item;
use crate::input::Input;

/// Named Unicode character classes usable with `rune_in_classes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CharClass {
    Letter,
    Number,
    Alphanumeric,
    Whitespace,
    Uppercase,
    Lowercase,
    /// ASCII punctuation only.
    Punctuation,
    Control,
}

impl CharClass {
    pub fn contains(self, c: char) -> bool {
        match self {
            CharClass::Letter => c.is_alphabetic(),
            CharClass::Number => c.is_numeric(),
            CharClass::Alphanumeric => c.is_alphanumeric(),
            CharClass::Whitespace => c.is_whitespace(),
            CharClass::Uppercase => c.is_uppercase(),
            CharClass::Lowercase => c.is_lowercase(),
            CharClass::Punctuation => c.is_ascii_punctuation(),
            CharClass::Control => c.is_control(),
        }
    }
}

// Peeks one rune and consumes it only when `accept` holds.
fn match_rune(
    input: &mut dyn Input,
    name: &str,
    expected: &str,
    accept: impl Fn(char) -> bool,
) -> ParseResult {
    let found = match input.peek() {
        Ok(c) => c,
        Err(e) => return ParseResult::failure(name, e),
    };
    if !accept(found) {
        return ParseResult::failure(name, ParseError::mismatch(name, expected, Some(found)));
    }
    match input.advance() {
        Ok(c) => ParseResult::success(name, Item::Rune(c), None),
        Err(e) => ParseResult::failure(name, e),
    }
}

// Rune: matches exactly one given code point
#[derive(Debug, Clone)]
pub struct Rune {
    expected: char,
    name: String,
    description: String,
}

impl Rune {
    pub fn new(expected: char) -> Self {
        Self {
            expected,
            name: format!("rune '{}'", expected),
            description: format!("'{}'", expected),
        }
    }
}

impl Parser for Rune {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        match_rune(input, &self.name, &self.description, |c| c == self.expected)
    }
}

type Predicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

// RuneWhere: matches one code point accepted by a predicate
#[derive(Clone)]
pub struct RuneWhere {
    name: String,
    description: String,
    predicate: Predicate,
}

impl RuneWhere {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self::described("any rune where", "a rune matching the predicate", predicate)
    }

    pub fn described<F>(name: impl Into<String>, description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn in_set(set: &str) -> Self {
        let members: Vec<char> = set.chars().collect();
        Self::described(
            format!("any rune in '{}'", set),
            format!("one of '{}'", set),
            move |c| members.contains(&c),
        )
    }

    pub fn not_in_set(set: &str) -> Self {
        let members: Vec<char> = set.chars().collect();
        Self::described(
            format!("any rune not in '{}'", set),
            format!("none of '{}'", set),
            move |c| !members.contains(&c),
        )
    }

    pub fn in_ranges(ranges: Vec<RangeInclusive<char>>) -> Self {
        let description = ranges
            .iter()
            .map(|r| format!("'{}'..='{}'", r.start(), r.end()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::described("rune in ranges", description, move |c| {
            ranges.iter().any(|r| r.contains(&c))
        })
    }

    pub fn in_classes(classes: &[CharClass]) -> Self {
        let classes = classes.to_vec();
        let description = classes
            .iter()
            .map(CharClass::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        Self::described("rune in ranges", description, move |c| {
            classes.iter().any(|class| class.contains(c))
        })
    }
}

impl Parser for RuneWhere {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        match_rune(input, &self.name, &self.description, |c| (self.predicate)(c))
    }
}

// AnyRune: consumes whatever code point comes next
#[derive(Debug, Clone, Default)]
pub struct AnyRune;

impl AnyRune {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for AnyRune {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        match input.advance() {
            Ok(c) => ParseResult::success("any rune", Item::Rune(c), None),
            Err(e) => ParseResult::failure("any rune", e),
        }
    }
}

// Literal: matches a fixed string, optionally ignoring case
#[derive(Debug, Clone)]
pub struct Literal {
    expected: String,
    case_insensitive: bool,
    name: String,
}

impl Literal {
    pub fn new(expected: impl Into<String>) -> Self {
        let expected = expected.into();
        Self {
            name: format!("string: '{}'", expected),
            expected,
            case_insensitive: false,
        }
    }

    pub fn insensitive(expected: impl Into<String>) -> Self {
        Self {
            case_insensitive: true,
            ..Self::new(expected)
        }
    }

    fn matches(&self, found: char, expected: char) -> bool {
        found == expected
            || (self.case_insensitive && found.to_lowercase().eq(expected.to_lowercase()))
    }
}

impl Parser for Literal {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let start = input.index();
        let mut matched = String::with_capacity(self.expected.len());
        for expected in self.expected.chars() {
            let found = match input.advance() {
                Ok(c) => c,
                Err(e) => {
                    backtrack(input, start);
                    return ParseResult::failure(&self.name, e);
                }
            };
            if !self.matches(found, expected) {
                backtrack(input, start);
                let expected = format!("'{}'", self.expected);
                return ParseResult::failure(
                    &self.name,
                    ParseError::mismatch(&self.name, expected, Some(found)),
                );
            }
            matched.push(found);
        }
        ParseResult::success(&self.name, Item::Text(matched), None)
    }
}
