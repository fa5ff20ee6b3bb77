//! Builder functions for writing grammars.
//!
//! Every builder returns a [`BoxedParser`], so grammars compose without
//! naming the combinator structs.

use std::ops::RangeInclusive;
use std::sync::Arc;

use lazy_static::lazy_static;

use super::combinators::*;
use super::core::FnParser;
use super::primitives::{AnyRune, Literal, Rune, RuneWhere};
pub use super::combiner::Combiner;
pub use super::core::{BoxedParser, ParseError, ParseResult, Parser};
pub use super::item::Item;
pub use super::primitives::CharClass;
pub use crate::input::Input;

lazy_static! {
    pub static ref LETTER: BoxedParser = rune_in_class(CharClass::Letter);
    pub static ref ZERO_TO_NINE: BoxedParser = rune_in_ranges(vec!['0'..='9']);
    pub static ref WHITESPACE: BoxedParser = rune_in_class(CharClass::Whitespace);
}

pub fn rune(expected: char) -> BoxedParser {
    Arc::new(Rune::new(expected))
}

pub fn rune_where<F>(predicate: F) -> BoxedParser
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    Arc::new(RuneWhere::new(predicate))
}

pub fn rune_in(set: &str) -> BoxedParser {
    Arc::new(RuneWhere::in_set(set))
}

pub fn rune_not_in(set: &str) -> BoxedParser {
    Arc::new(RuneWhere::not_in_set(set))
}

pub fn rune_in_ranges(ranges: Vec<RangeInclusive<char>>) -> BoxedParser {
    Arc::new(RuneWhere::in_ranges(ranges))
}

pub fn rune_in_class(class: CharClass) -> BoxedParser {
    rune_in_classes(&[class])
}

pub fn rune_in_classes(classes: &[CharClass]) -> BoxedParser {
    Arc::new(RuneWhere::in_classes(classes))
}

pub fn any_rune() -> BoxedParser {
    Arc::new(AnyRune::new())
}

pub fn letter() -> BoxedParser {
    LETTER.clone()
}

pub fn zero_to_nine() -> BoxedParser {
    ZERO_TO_NINE.clone()
}

pub fn whitespace() -> BoxedParser {
    WHITESPACE.clone()
}

pub fn string(expected: &str) -> BoxedParser {
    Arc::new(Literal::new(expected))
}

pub fn string_insensitive(expected: &str) -> BoxedParser {
    Arc::new(Literal::insensitive(expected))
}

pub fn all(combiner: Combiner, parsers: Vec<BoxedParser>) -> BoxedParser {
    Arc::new(All::new(combiner, parsers))
}

pub fn any(parsers: Vec<BoxedParser>) -> BoxedParser {
    Arc::new(AnyOf::new(parsers))
}

pub fn or(a: BoxedParser, b: BoxedParser) -> BoxedParser {
    any(vec![a, b])
}

pub fn then(combiner: Combiner, first: BoxedParser, second: BoxedParser) -> BoxedParser {
    Arc::new(Then::new(combiner, first, second))
}

/// `at_most = None` means unbounded.
pub fn many(
    combiner: Combiner,
    at_least: usize,
    at_most: Option<usize>,
    parser: BoxedParser,
) -> BoxedParser {
    Arc::new(Many::new(combiner, at_least, at_most, parser))
}

pub fn times(combiner: Combiner, n: usize, parser: BoxedParser) -> BoxedParser {
    many(combiner, n, Some(n), parser)
}

pub fn at_least(combiner: Combiner, n: usize, parser: BoxedParser) -> BoxedParser {
    many(combiner, n, None, parser)
}

/// One to `n` matches.
pub fn at_most(combiner: Combiner, n: usize, parser: BoxedParser) -> BoxedParser {
    many(combiner, 1, Some(n), parser)
}

pub fn optional(combiner: Combiner, parser: BoxedParser) -> BoxedParser {
    many(combiner, 0, Some(1), parser)
}

pub fn string_until(delimiter: BoxedParser) -> BoxedParser {
    Arc::new(StringUntil::new(delimiter))
}

pub fn string_until_or_eof(delimiter: BoxedParser) -> BoxedParser {
    Arc::new(StringUntil::or_end(delimiter))
}

pub fn map<F>(parser: BoxedParser, f: F) -> BoxedParser
where
    F: Fn(Item) -> Item + Send + Sync + 'static,
{
    Arc::new(Map::new(parser, f))
}

pub fn label(name: &str, parser: BoxedParser) -> BoxedParser {
    Arc::new(Label::new(name, parser))
}

pub fn with_context(parser: BoxedParser, message: &str) -> BoxedParser {
    Arc::new(WithContext::new(message, parser))
}

pub fn lazy<F>(f: F) -> BoxedParser
where
    F: Fn() -> BoxedParser + Send + Sync + 'static,
{
    Arc::new(Lazy::new(f))
}

pub fn succeed(item: Item) -> BoxedParser {
    Arc::new(Succeed::new(item))
}

pub fn fail(message: &str) -> BoxedParser {
    Arc::new(Fail::new(message))
}

pub fn from_fn<F>(f: F) -> BoxedParser
where
    F: Fn(&mut dyn Input) -> ParseResult + Send + Sync + 'static,
{
    Arc::new(FnParser::new(f))
}

pub fn concat_to_string() -> Combiner {
    Combiner::concat_to_string()
}

pub fn to_integer() -> Combiner {
    Combiner::to_integer()
}

pub fn sequence() -> Combiner {
    Combiner::sequence()
}

pub fn nth(index: usize) -> Combiner {
    Combiner::nth(index)
}

pub fn tagged(tag: &str, inner: Combiner) -> Combiner {
    Combiner::tagged(tag, inner)
}
