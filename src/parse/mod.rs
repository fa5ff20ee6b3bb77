//! # Parse
//!
//! Parsers, the values they produce, and the combinators that build bigger
//! parsers out of smaller ones. Grammars are normally written with the
//! builder functions in [`prelude`]:
//!
//! ```
//! use runeparse::input::Stream;
//! use runeparse::parse::prelude::*;
//!
//! let open_tag = all(
//!     concat_to_string(),
//!     vec![rune('<'), string_until(rune('>')), rune('>')],
//! );
//! let mut stream = Stream::from_text("<a>Example</a>");
//! let result = open_tag.parse(&mut stream);
//! assert_eq!(result.into_item(), Some(Item::from("<a>")));
//! ```

pub mod combiner;
pub mod combinators;
pub mod core;
pub mod item;
pub mod prelude;
pub mod primitives;

pub use self::combiner::Combiner;
pub use self::core::{BoxedParser, FnParser, ParseError, ParseResult, Parser};
pub use self::item::Item;
pub use self::primitives::CharClass;
