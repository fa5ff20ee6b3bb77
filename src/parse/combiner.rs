use std::fmt;
use std::sync::Arc;

use super::item::Item;

type CombineFn = dyn Fn(Vec<Item>) -> Option<Item> + Send + Sync;

/// Merges the items produced by the children of a sequence into one item.
///
/// Returning `None` turns the sequence into a failure.
#[derive(Clone)]
pub struct Combiner {
    name: &'static str,
    f: Arc<CombineFn>,
}

impl Combiner {
    pub fn new<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(Vec<Item>) -> Option<Item> + Send + Sync + 'static,
    {
        Self {
            name,
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn combine(&self, items: Vec<Item>) -> Option<Item> {
        (self.f)(items)
    }

    /// Concatenates the textual form of every item.
    pub fn concat_to_string() -> Self {
        Self::new("concat_to_string", |items| {
            Some(Item::Text(items.iter().map(Item::to_string).collect()))
        })
    }

    /// Concatenates runes and text, then reads the result as a base-10
    /// signed integer. Any other item kind, an empty concatenation, or text
    /// that does not fit an `i64` is a failure.
    pub fn to_integer() -> Self {
        Self::new("to_integer", |items| {
            let mut digits = String::new();
            for item in &items {
                match item {
                    Item::Rune(c) => digits.push(*c),
                    Item::Text(s) => digits.push_str(s),
                    _ => return None,
                }
            }
            digits.parse::<i64>().ok().map(Item::Integer)
        })
    }

    /// Keeps every item as a sequence.
    pub fn sequence() -> Self {
        Self::new("sequence", |items| Some(Item::Sequence(items)))
    }

    /// Keeps only the item at `index`.
    pub fn nth(index: usize) -> Self {
        Self::new("nth", move |items| items.into_iter().nth(index))
    }

    /// Runs `inner` and labels its output.
    pub fn tagged(tag: impl Into<String>, inner: Combiner) -> Self {
        let tag = tag.into();
        Self::new("tagged", move |items| {
            inner.combine(items).map(|item| Item::tagged(tag.clone(), item))
        })
    }
}

impl fmt::Debug for Combiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combiner").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<Item> {
        s.chars().map(Item::Rune).collect()
    }

    #[test]
    fn test_concat_to_string() {
        let combined = Combiner::concat_to_string().combine(vec![
            Item::Rune('<'),
            Item::from("div"),
            Item::Sequence(runes(" id")),
            Item::Rune('>'),
        ]);
        assert_eq!(combined, Some(Item::from("<div id>")));
        assert_eq!(
            Combiner::concat_to_string().combine(vec![]),
            Some(Item::from(""))
        );
    }

    #[test]
    fn test_to_integer() {
        let to_integer = Combiner::to_integer();
        assert_eq!(to_integer.combine(runes("2024")), Some(Item::Integer(2024)));
        assert_eq!(
            to_integer.combine(vec![Item::Rune('-'), Item::from("17")]),
            Some(Item::Integer(-17))
        );
        assert_eq!(to_integer.combine(runes("0042")), Some(Item::Integer(42)));
    }

    #[test]
    fn test_to_integer_rejects() {
        let to_integer = Combiner::to_integer();
        assert_eq!(to_integer.combine(vec![]), None);
        assert_eq!(to_integer.combine(runes("12a")), None);
        assert_eq!(to_integer.combine(vec![Item::Integer(1)]), None);
        assert_eq!(to_integer.combine(runes("99999999999999999999")), None);
    }

    #[test]
    fn test_nth_and_tagged() {
        let items = runes("xyz");
        assert_eq!(Combiner::nth(1).combine(items.clone()), Some(Item::Rune('y')));
        assert_eq!(Combiner::nth(5).combine(items.clone()), None);

        let tagged = Combiner::tagged("word", Combiner::concat_to_string());
        assert_eq!(
            tagged.combine(items),
            Some(Item::tagged("word", Item::from("xyz")))
        );
    }

    #[test]
    fn test_custom_combiner() {
        let count = Combiner::new("count", |items| Some(Item::Integer(items.len() as i64)));
        assert_eq!(count.name(), "count");
        assert_eq!(count.combine(runes("abcd")), Some(Item::Integer(4)));
        assert_eq!(format!("{:?}", count), "Combiner { name: \"count\" }");
    }
}
