use std::sync::Arc;

use super::combiner::Combiner;
use super::core::{backtrack, BoxedParser, ParseError, ParseResult, Parser};
use super::item::Item;
use crate::input::{Input, InputError};

// All: runs every child in order and combines their items
#[derive(Clone)]
pub struct All {
    combiner: Combiner,
    parsers: Vec<BoxedParser>,
}

impl All {
    pub fn new(combiner: Combiner, parsers: Vec<BoxedParser>) -> Self {
        Self { combiner, parsers }
    }
}

impl Parser for All {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let start = input.index();
        let mut items = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            let result = parser.parse(input);
            if !result.is_success() {
                backtrack(input, start);
                return result;
            }
            items.extend(result.into_item());
        }
        match self.combiner.combine(items) {
            Some(item) => ParseResult::success("all", item, None),
            None => {
                backtrack(input, start);
                ParseResult::failure(
                    "all",
                    ParseError::CombineFailed {
                        parser: "all".to_string(),
                    },
                )
            }
        }
    }
}

// AnyOf: ordered choice, the first success wins
#[derive(Clone)]
pub struct AnyOf {
    parsers: Vec<BoxedParser>,
}

impl AnyOf {
    pub fn new(parsers: Vec<BoxedParser>) -> Self {
        Self { parsers }
    }
}

impl Parser for AnyOf {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let start = input.index();
        let mut all_at_end = !self.parsers.is_empty();
        for parser in &self.parsers {
            let result = parser.parse(input);
            if result.is_success() {
                return result;
            }
            backtrack(input, start);
            if result.error().is_some_and(ParseError::is_fatal) {
                return result.with_name("any");
            }
            all_at_end &= result.is_end_of_input();
        }
        if all_at_end {
            return ParseResult::failure("any", InputError::EndOfInput);
        }
        ParseResult::failure(
            "any",
            ParseError::NoAlternative {
                parser: "any".to_string(),
            },
        )
    }
}

// Then: two parsers in sequence
#[derive(Clone)]
pub struct Then {
    combiner: Combiner,
    first: BoxedParser,
    second: BoxedParser,
}

impl Then {
    pub fn new(combiner: Combiner, first: BoxedParser, second: BoxedParser) -> Self {
        Self {
            combiner,
            first,
            second,
        }
    }
}

impl Parser for Then {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let start = input.index();
        let first = self.first.parse(input);
        if !first.is_success() {
            return first;
        }
        let second = self.second.parse(input);
        if !second.is_success() {
            backtrack(input, start);
            return second;
        }
        let warning = second.error().cloned();
        let items = first.into_item().into_iter().chain(second.into_item()).collect();
        match self.combiner.combine(items) {
            Some(item) => ParseResult::success("then", item, warning),
            None => {
                backtrack(input, start);
                ParseResult::failure(
                    "then",
                    ParseError::CombineFailed {
                        parser: "then".to_string(),
                    },
                )
            }
        }
    }
}

/// Repeats a parser between `at_least` and `at_most` times.
///
/// Matching is greedy. A child success that consumes nothing ends the
/// repetition once `at_least` is satisfied, so zero-width children cannot
/// loop forever.
#[derive(Clone)]
pub struct Many {
    combiner: Combiner,
    at_least: usize,
    at_most: Option<usize>,
    parser: BoxedParser,
}

impl Many {
    pub fn new(
        combiner: Combiner,
        at_least: usize,
        at_most: Option<usize>,
        parser: BoxedParser,
    ) -> Self {
        Self {
            combiner,
            at_least,
            at_most,
            parser,
        }
    }
}

impl Parser for Many {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let start = input.index();
        let mut items = Vec::new();
        let mut last_failure = None;
        while self.at_most.map_or(true, |max| items.len() < max) {
            let before = input.index();
            let result = self.parser.parse(input);
            if !result.is_success() {
                backtrack(input, before);
                if result.error().is_some_and(ParseError::is_fatal) {
                    backtrack(input, start);
                    return result.with_name("many");
                }
                last_failure = Some(result);
                break;
            }
            let progressed = input.index() != before;
            items.extend(result.into_item());
            if !progressed && items.len() >= self.at_least {
                break;
            }
        }
        if items.len() < self.at_least {
            backtrack(input, start);
            return match last_failure {
                Some(failure) => failure.with_name("many"),
                None => ParseResult::failure(
                    "many",
                    ParseError::Fail("many: at_most is below at_least".to_string()),
                ),
            };
        }
        match self.combiner.combine(items) {
            Some(item) => ParseResult::success("many", item, None),
            None => {
                backtrack(input, start);
                ParseResult::failure(
                    "many",
                    ParseError::CombineFailed {
                        parser: "many".to_string(),
                    },
                )
            }
        }
    }
}

/// Collects code points up to, but not including, the first match of a
/// delimiter. The delimiter itself is left in the input.
#[derive(Clone)]
pub struct StringUntil {
    delimiter: BoxedParser,
    allow_end: bool,
}

impl StringUntil {
    /// Running out of input before the delimiter is a failure.
    pub fn new(delimiter: BoxedParser) -> Self {
        Self {
            delimiter,
            allow_end: false,
        }
    }

    /// Running out of input before the delimiter ends the match successfully,
    /// with an end-of-input error attached to the result.
    pub fn or_end(delimiter: BoxedParser) -> Self {
        Self {
            delimiter,
            allow_end: true,
        }
    }
}

impl Parser for StringUntil {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        const NAME: &str = "string until delimiter";
        let start = input.index();
        let mut text = String::new();
        loop {
            let before = input.index();
            let delimiter = self.delimiter.parse(input);
            if delimiter.is_success() {
                backtrack(input, before);
                return ParseResult::success(NAME, Item::Text(text), delimiter.into_error());
            }
            match input.advance() {
                Ok(c) => text.push(c),
                Err(InputError::EndOfInput) if self.allow_end => {
                    return ParseResult::success(
                        NAME,
                        Item::Text(text),
                        Some(InputError::EndOfInput.into()),
                    );
                }
                Err(e) => {
                    backtrack(input, start);
                    return ParseResult::failure(NAME, e);
                }
            }
        }
    }
}

type MapFn = dyn Fn(Item) -> Item + Send + Sync;

// Map: transforms the item of a successful match
#[derive(Clone)]
pub struct Map {
    parser: BoxedParser,
    f: Arc<MapFn>,
}

impl Map {
    pub fn new<F>(parser: BoxedParser, f: F) -> Self
    where
        F: Fn(Item) -> Item + Send + Sync + 'static,
    {
        Self {
            parser,
            f: Arc::new(f),
        }
    }
}

impl Parser for Map {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        self.parser.parse(input).map_item(|item| (self.f)(item))
    }
}

// Label: renames the result, successful or not
#[derive(Clone)]
pub struct Label {
    name: String,
    parser: BoxedParser,
}

impl Label {
    pub fn new(name: impl Into<String>, parser: BoxedParser) -> Self {
        Self {
            name: name.into(),
            parser,
        }
    }
}

impl Parser for Label {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        self.parser.parse(input).with_name(self.name.clone())
    }
}

// WithContext: wraps the error of a failed match with a message
#[derive(Clone)]
pub struct WithContext {
    message: String,
    parser: BoxedParser,
}

impl WithContext {
    pub fn new(message: impl Into<String>, parser: BoxedParser) -> Self {
        Self {
            message: message.into(),
            parser,
        }
    }
}

impl Parser for WithContext {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        let result = self.parser.parse(input);
        if result.is_success() {
            return result;
        }
        result.map_error(|inner| ParseError::WithContext {
            message: self.message.clone(),
            inner: Box::new(inner),
        })
    }
}

type Thunk = dyn Fn() -> BoxedParser + Send + Sync;

/// Builds its parser on every use, which lets a grammar refer to itself.
#[derive(Clone)]
pub struct Lazy {
    f: Arc<Thunk>,
}

impl Lazy {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> BoxedParser + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }
}

impl Parser for Lazy {
    fn parse(&self, input: &mut dyn Input) -> ParseResult {
        (self.f)().parse(input)
    }
}

// Succeed: matches nothing and yields a fixed item
#[derive(Debug, Clone)]
pub struct Succeed {
    item: Item,
}

impl Succeed {
    pub fn new(item: Item) -> Self {
        Self { item }
    }
}

impl Parser for Succeed {
    fn parse(&self, _input: &mut dyn Input) -> ParseResult {
        ParseResult::success("succeed", self.item.clone(), None)
    }
}

// Fail: never matches
#[derive(Debug, Clone)]
pub struct Fail {
    message: String,
}

impl Fail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Parser for Fail {
    fn parse(&self, _input: &mut dyn Input) -> ParseResult {
        ParseResult::failure("fail", ParseError::Fail(self.message.clone()))
    }
}
