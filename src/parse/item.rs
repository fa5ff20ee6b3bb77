use std::fmt;

/// A value captured by a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Rune(char),
    Text(String),
    Integer(i64),
    /// Items of several children, kept apart.
    Sequence(Vec<Item>),
    /// An item labelled by the grammar, e.g. a token kind.
    Tagged { tag: String, item: Box<Item> },
}

impl Item {
    pub fn tagged(tag: impl Into<String>, item: Item) -> Self {
        Item::Tagged {
            tag: tag.into(),
            item: Box::new(item),
        }
    }

    pub fn as_rune(&self) -> Option<char> {
        match self {
            Item::Rune(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Item::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Item::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Item]> {
        match self {
            Item::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// `(tag, inner)` of a tagged item.
    pub fn as_tagged(&self) -> Option<(&str, &Item)> {
        match self {
            Item::Tagged { tag, item } => Some((tag, item)),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_tagged().map(|(tag, _)| tag)
    }
}

/// Renders the textual content: sequences concatenate, tags are transparent.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Rune(c) => write!(f, "{}", c),
            Item::Text(s) => f.write_str(s),
            Item::Integer(i) => write!(f, "{}", i),
            Item::Sequence(items) => items.iter().try_for_each(|item| write!(f, "{}", item)),
            Item::Tagged { item, .. } => write!(f, "{}", item),
        }
    }
}

impl From<char> for Item {
    fn from(c: char) -> Self {
        Item::Rune(c)
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Text(s)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Text(s.to_string())
    }
}

impl From<i64> for Item {
    fn from(i: i64) -> Self {
        Item::Integer(i)
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::Sequence(items)
    }
}
